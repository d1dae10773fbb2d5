use log::trace;

use crate::ast::{
    BlockStatement, ExpressionStatement, Identifier, LetStatement, ReturnStatement, Statement,
};
use crate::parser::expressions::{parse_expression, Precedence};
use crate::parser::Parser;
use crate::token::TokenType;

pub fn parse_statement(parser: &mut Parser) -> Option<Statement> {
    trace!("statement at {}", parser.cur_token);
    match parser.cur_token.token_type {
        TokenType::Let => parse_let_statement(parser).map(Statement::Let),
        TokenType::Return => Some(Statement::Return(parse_return_statement(parser))),
        _ => Some(Statement::Expression(parse_expression_statement(parser))),
    }
}

fn parse_let_statement(parser: &mut Parser) -> Option<LetStatement> {
    let token = parser.cur_token.clone();

    parser.expect_peek(TokenType::Ident)?;
    let name = Identifier {
        token: parser.cur_token.clone(),
        name: parser.cur_token.literal.clone(),
    };

    parser.expect_peek(TokenType::Assign)?;
    parser.next_token();
    let value = parse_expression(parser, Precedence::Lowest);
    skip_semicolon(parser);

    Some(LetStatement { token, name, value })
}

fn parse_return_statement(parser: &mut Parser) -> ReturnStatement {
    let token = parser.cur_token.clone();

    parser.next_token();
    let value = parse_expression(parser, Precedence::Lowest);
    skip_semicolon(parser);

    ReturnStatement { token, value }
}

fn parse_expression_statement(parser: &mut Parser) -> ExpressionStatement {
    let token = parser.cur_token.clone();

    let expression = parse_expression(parser, Precedence::Lowest);
    skip_semicolon(parser);

    ExpressionStatement { token, expression }
}

/// Parses statements up to the closing brace, which is left as `cur_token`.
/// Expects `cur_token` to be the opening brace.
pub fn parse_block_statement(parser: &mut Parser) -> BlockStatement {
    let token = parser.cur_token.clone();
    let mut statements = Vec::new();

    parser.next_token();
    while !parser.cur_token_is(TokenType::RBrace) && !parser.cur_token_is(TokenType::Eof) {
        if let Some(statement) = parse_statement(parser) {
            statements.push(statement);
        }
        parser.next_token();
    }

    BlockStatement { token, statements }
}

// The trailing semicolon of a statement is optional
fn skip_semicolon(parser: &mut Parser) {
    if parser.peek_token_is(TokenType::SemiColon) {
        parser.next_token();
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{Expression, Statement};
    use crate::lexer::Lexer;
    use crate::parser::Parser;

    fn parse_single(input: &str) -> Statement {
        let mut parser = Parser::new(Lexer::new(input));
        let mut program = parser.parse_program();

        assert_eq!(parser.error_messages(), Vec::<String>::new());
        assert_eq!(program.statements.len(), 1, "input: {input}");
        program.statements.remove(0)
    }

    #[test]
    fn test_statement_dispatch() {
        assert!(matches!(parse_single("let a = 1;"), Statement::Let(_)));
        assert!(matches!(parse_single("return a;"), Statement::Return(_)));
        assert!(matches!(parse_single("a;"), Statement::Expression(_)));
        assert!(matches!(parse_single("if (a) { b }"), Statement::Expression(_)));
    }

    #[test]
    fn test_block_statement_keeps_order() {
        let Statement::Expression(statement) =
            parse_single("fn() { let a = 1; return a; a }")
        else {
            panic!("expected an expression statement");
        };
        let Some(Expression::FunctionLiteral { body, .. }) = statement.expression else {
            panic!("expected a function literal");
        };

        assert_eq!(body.statements.len(), 3);
        assert!(matches!(body.statements[0], Statement::Let(_)));
        assert!(matches!(body.statements[1], Statement::Return(_)));
        assert!(matches!(body.statements[2], Statement::Expression(_)));
        assert_eq!(body.to_string(), "{let a = 1;return a;a;}");
    }

    #[test]
    fn test_empty_block() {
        let statement = parse_single("if (x) {}");
        assert_eq!(statement.to_string(), "if (x) {};");
    }

    #[test]
    fn test_unterminated_block() {
        let mut parser = Parser::new(Lexer::new("if (x) { y"));
        let program = parser.parse_program();

        assert!(parser.errors().is_empty());
        assert_eq!(program.to_string(), "if (x) {y;};\n");
    }
}
