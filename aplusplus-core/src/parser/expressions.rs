use num_enum::IntoPrimitive;

use super::error::ParseError;
use super::statements::parse_block_statement;
use crate::ast::{Expression, Identifier, InfixOperator, Operand, PrefixOperator};
use crate::parser::Parser;
use crate::token::TokenType;

/// Binding power of an operator, weakest first. The `u8` rank is what the
/// climbing loop compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive)]
#[repr(u8)]
pub enum Precedence {
    Lowest = 0,
    Equals,
    LessGreater,
    Sum,
    Product,
    Prefix,
    Call,
}

pub fn precedence_of(token_type: TokenType) -> Precedence {
    match token_type {
        TokenType::Equal => Precedence::Equals,
        TokenType::NotEqual => Precedence::Equals,
        TokenType::LessThan => Precedence::LessGreater,
        TokenType::GreaterThan => Precedence::LessGreater,
        TokenType::Plus => Precedence::Sum,
        TokenType::Minus => Precedence::Sum,
        TokenType::Asterisk => Precedence::Product,
        TokenType::Slash => Precedence::Product,
        TokenType::LParen => Precedence::Call,
        _ => Precedence::Lowest,
    }
}

/// Handler for a token that can start an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixHandler {
    Identifier,
    IntegerLiteral,
    Boolean,
    Operator(PrefixOperator),
    Grouped,
    If,
    FunctionLiteral,
}

/// Handler for a token that continues an already parsed left expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfixHandler {
    Operator(InfixOperator),
    Call,
}

pub fn prefix_handler(token_type: TokenType) -> Option<PrefixHandler> {
    match token_type {
        TokenType::Ident => Some(PrefixHandler::Identifier),
        TokenType::Int => Some(PrefixHandler::IntegerLiteral),
        TokenType::True | TokenType::False => Some(PrefixHandler::Boolean),
        TokenType::Bang => Some(PrefixHandler::Operator(PrefixOperator::Bang)),
        TokenType::Minus => Some(PrefixHandler::Operator(PrefixOperator::Minus)),
        TokenType::LParen => Some(PrefixHandler::Grouped),
        TokenType::If => Some(PrefixHandler::If),
        TokenType::Function => Some(PrefixHandler::FunctionLiteral),
        _ => None,
    }
}

pub fn infix_handler(token_type: TokenType) -> Option<InfixHandler> {
    use InfixOperator as Op;

    match token_type {
        TokenType::Plus => Some(InfixHandler::Operator(Op::Plus)),
        TokenType::Minus => Some(InfixHandler::Operator(Op::Minus)),
        TokenType::Asterisk => Some(InfixHandler::Operator(Op::Multiply)),
        TokenType::Slash => Some(InfixHandler::Operator(Op::Divide)),
        TokenType::LessThan => Some(InfixHandler::Operator(Op::LessThan)),
        TokenType::GreaterThan => Some(InfixHandler::Operator(Op::GreaterThan)),
        TokenType::Equal => Some(InfixHandler::Operator(Op::Equal)),
        TokenType::NotEqual => Some(InfixHandler::Operator(Op::NotEqual)),
        TokenType::LParen => Some(InfixHandler::Call),
        _ => None,
    }
}

impl PrefixHandler {
    fn parse(self, parser: &mut Parser) -> Option<Expression> {
        match self {
            PrefixHandler::Identifier => Some(Expression::Identifier(parse_identifier(parser))),
            PrefixHandler::IntegerLiteral => parse_integer_literal(parser),
            PrefixHandler::Boolean => Some(Expression::Boolean {
                token: parser.cur_token.clone(),
                value: parser.cur_token_is(TokenType::True),
            }),
            PrefixHandler::Operator(operator) => Some(parse_prefix_expression(parser, operator)),
            PrefixHandler::Grouped => parse_grouped_expression(parser),
            PrefixHandler::If => parse_if_expression(parser),
            PrefixHandler::FunctionLiteral => parse_function_literal(parser),
        }
    }
}

impl InfixHandler {
    fn parse(self, parser: &mut Parser, left: Operand) -> Option<Expression> {
        match self {
            InfixHandler::Operator(operator) => {
                Some(parse_infix_expression(parser, operator, left))
            }
            InfixHandler::Call => parse_call_expression(parser, left),
        }
    }
}

// Stack left before growing, and the size of each new segment.
const STACK_RED_ZONE: usize = 64 * 1024;
const STACK_SEGMENT: usize = 1024 * 1024;

/// Parses the expression starting at `cur_token`, absorbing infix operators
/// that bind tighter than `precedence`.
///
/// Nesting depth is bounded only by memory: the stack is grown on demand.
pub fn parse_expression(parser: &mut Parser, precedence: Precedence) -> Option<Expression> {
    stacker::maybe_grow(STACK_RED_ZONE, STACK_SEGMENT, || {
        climb(parser, precedence)
    })
}

fn climb(parser: &mut Parser, precedence: Precedence) -> Option<Expression> {
    let Some(prefix) = prefix_handler(parser.cur_token.token_type) else {
        parser.record_error(ParseError::NoPrefixParseFn(parser.cur_token.token_type));
        return None;
    };
    let mut left_expression = prefix.parse(parser);

    let threshold = u8::from(precedence);
    while !parser.peek_token_is(TokenType::SemiColon)
        && threshold < u8::from(parser.peek_precedence())
    {
        let Some(infix) = infix_handler(parser.peek_token.token_type) else {
            return left_expression;
        };

        parser.next_token();
        left_expression = infix.parse(parser, left_expression.map(Box::new));
    }

    left_expression
}

impl Parser<'_> {
    fn peek_precedence(&self) -> Precedence {
        precedence_of(self.peek_token.token_type)
    }

    fn cur_precedence(&self) -> Precedence {
        precedence_of(self.cur_token.token_type)
    }
}

fn parse_identifier(parser: &Parser) -> Identifier {
    Identifier {
        token: parser.cur_token.clone(),
        name: parser.cur_token.literal.clone(),
    }
}

fn parse_integer_literal(parser: &mut Parser) -> Option<Expression> {
    let token = parser.cur_token.clone();

    match parse_integer(&token.literal) {
        Ok(value) => Some(Expression::IntegerLiteral { token, value }),
        Err(_) => {
            parser.record_error(ParseError::InvalidInteger(token.literal));
            None
        }
    }
}

// A leading zero selects octal, so `010` is 8 and `09` is rejected.
fn parse_integer(literal: &str) -> Result<i64, std::num::ParseIntError> {
    match literal.strip_prefix('0') {
        Some(octal) if !octal.is_empty() => i64::from_str_radix(octal, 8),
        _ => literal.parse(),
    }
}

fn parse_prefix_expression(parser: &mut Parser, operator: PrefixOperator) -> Expression {
    let token = parser.cur_token.clone();

    parser.next_token();
    let right = parse_expression(parser, Precedence::Prefix).map(Box::new);

    Expression::PrefixExpression {
        token,
        operator,
        right,
    }
}

// The right operand is parsed at the operator's own precedence, which makes
// chains of equal precedence group to the left.
fn parse_infix_expression(
    parser: &mut Parser,
    operator: InfixOperator,
    left: Operand,
) -> Expression {
    let token = parser.cur_token.clone();
    let precedence = parser.cur_precedence();

    parser.next_token();
    let right = parse_expression(parser, precedence).map(Box::new);

    Expression::InfixExpression {
        token,
        operator,
        left,
        right,
    }
}

fn parse_grouped_expression(parser: &mut Parser) -> Option<Expression> {
    parser.next_token();
    let expression = parse_expression(parser, Precedence::Lowest);
    parser.expect_peek(TokenType::RParen)?;

    expression
}

fn parse_if_expression(parser: &mut Parser) -> Option<Expression> {
    let token = parser.cur_token.clone();

    parser.expect_peek(TokenType::LParen)?;
    parser.next_token();
    let condition = parse_expression(parser, Precedence::Lowest).map(Box::new);
    parser.expect_peek(TokenType::RParen)?;

    parser.expect_peek(TokenType::LBrace)?;
    let consequence = parse_block_statement(parser);

    let alternative = if parser.peek_token_is(TokenType::Else) {
        parser.next_token();
        parser.expect_peek(TokenType::LBrace)?;
        Some(parse_block_statement(parser))
    } else {
        None
    };

    Some(Expression::IfExpression {
        token,
        condition,
        consequence,
        alternative,
    })
}

fn parse_function_literal(parser: &mut Parser) -> Option<Expression> {
    let token = parser.cur_token.clone();

    parser.expect_peek(TokenType::LParen)?;
    let parameters = parse_function_parameters(parser)?;

    parser.expect_peek(TokenType::LBrace)?;
    let body = parse_block_statement(parser);

    Some(Expression::FunctionLiteral {
        token,
        parameters,
        body,
    })
}

fn parse_function_parameters(parser: &mut Parser) -> Option<Vec<Identifier>> {
    let mut identifiers = Vec::new();

    if parser.peek_token_is(TokenType::RParen) {
        parser.next_token();
        return Some(identifiers);
    }

    parser.expect_peek(TokenType::Ident)?;
    identifiers.push(parse_identifier(parser));

    while parser.peek_token_is(TokenType::Comma) {
        parser.next_token();
        parser.expect_peek(TokenType::Ident)?;
        identifiers.push(parse_identifier(parser));
    }

    parser.expect_peek(TokenType::RParen)?;

    Some(identifiers)
}

fn parse_call_expression(parser: &mut Parser, function: Operand) -> Option<Expression> {
    let token = parser.cur_token.clone();
    let arguments = parse_call_arguments(parser)?;

    Some(Expression::CallExpression {
        token,
        function,
        arguments,
    })
}

fn parse_call_arguments(parser: &mut Parser) -> Option<Vec<Option<Expression>>> {
    let mut arguments = Vec::new();

    if parser.peek_token_is(TokenType::RParen) {
        parser.next_token();
        return Some(arguments);
    }

    parser.next_token();
    arguments.push(parse_expression(parser, Precedence::Lowest));

    while parser.peek_token_is(TokenType::Comma) {
        parser.next_token();
        parser.next_token();
        arguments.push(parse_expression(parser, Precedence::Lowest));
    }

    parser.expect_peek(TokenType::RParen)?;

    Some(arguments)
}
