pub mod error;
pub mod expressions;
pub mod statements;

use log::{debug, trace};

use crate::ast::Program;
use crate::lexer::Lexer;
use crate::token::{Token, TokenType};
pub use error::ParseError;
use statements::parse_statement;

/// Parser over a two token window.
///
/// Every parse function starts with `cur_token` on the first token of its
/// construct and returns with `cur_token` on the last token it consumed.
/// Failures are recorded in `errors` and surface as absent nodes, so a
/// program is always produced.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    pub(crate) cur_token: Token,
    pub(crate) peek_token: Token,
    errors: Vec<ParseError>,
}

impl<'a> Parser<'a> {
    pub fn new(mut lexer: Lexer<'a>) -> Self {
        let cur_token = lexer.next_token();
        let peek_token = lexer.next_token();
        Self {
            lexer,
            cur_token,
            peek_token,
            errors: Vec::new(),
        }
    }

    pub fn parse_program(&mut self) -> Program {
        let mut statements = Vec::new();

        while !self.cur_token_is(TokenType::Eof) {
            if let Some(statement) = parse_statement(self) {
                statements.push(statement);
            }
            self.next_token();
        }

        Program { statements }
    }

    /// Errors recorded so far, in the order they were found.
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    pub(crate) fn next_token(&mut self) {
        self.cur_token = std::mem::replace(&mut self.peek_token, self.lexer.next_token());
        trace!("window: {} {}", self.cur_token, self.peek_token);
    }

    pub(crate) fn cur_token_is(&self, token_type: TokenType) -> bool {
        self.cur_token.is(token_type)
    }

    pub(crate) fn peek_token_is(&self, token_type: TokenType) -> bool {
        self.peek_token.is(token_type)
    }

    /// Advances onto the peek token if it has the expected type. Otherwise
    /// records the mismatch and leaves the window untouched.
    pub(crate) fn expect_peek(&mut self, token_type: TokenType) -> Option<()> {
        if self.peek_token_is(token_type) {
            self.next_token();
            Some(())
        } else {
            self.record_error(ParseError::UnexpectedPeek {
                expected: token_type,
                got: self.peek_token.token_type,
            });
            None
        }
    }

    pub(crate) fn record_error(&mut self, error: ParseError) {
        debug!("parse error at {}: {}", self.cur_token, error);
        self.errors.push(error);
    }
}
