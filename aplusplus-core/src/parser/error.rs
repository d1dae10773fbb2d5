use std::rc::Rc;

use thiserror::Error;

use crate::token::TokenType;

/// A recorded parse failure. The `Display` text is the message reported to
/// users, one line per error.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ParseError {
    #[error("Expected next token to be {expected}, got {got} instead")]
    UnexpectedPeek { expected: TokenType, got: TokenType },
    #[error("no prefix parse function for {0} found")]
    NoPrefixParseFn(TokenType),
    #[error("could not parse {0:?} as integer")]
    InvalidInteger(Rc<str>),
}
