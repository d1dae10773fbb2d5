use log::trace;

use crate::token::{lookup_ident, lookup_operator, Token, TokenType};

/// Pull based scanner over a source string.
///
/// `position` is the byte offset of `ch`, `read_position` the byte offset
/// right after it. `ch` is `None` once the input is exhausted, and stays
/// `None` no matter how often the lexer is advanced.
#[derive(Clone)]
pub struct Lexer<'a> {
    input: &'a str,
    position: usize,
    read_position: usize,
    ch: Option<char>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        let mut lexer = Self {
            input,
            position: 0,
            read_position: 0,
            ch: None,
        };
        lexer.read_char();
        lexer
    }

    /// Scans the next token. Keeps returning `EOF` once the input is exhausted.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let start = self.position;
        let token = self.scan();
        trace!("scanned {} at byte {}", token, start);
        token
    }

    fn scan(&mut self) -> Token {
        let Some(ch) = self.ch else {
            return Token::eof();
        };

        let token = match ch {
            '=' => self.one_or_two_char_token(TokenType::Assign, '='),
            '!' => self.one_or_two_char_token(TokenType::Bang, '='),
            ';' => self.single_char_token(TokenType::SemiColon),
            '(' => self.single_char_token(TokenType::LParen),
            ')' => self.single_char_token(TokenType::RParen),
            '{' => self.single_char_token(TokenType::LBrace),
            '}' => self.single_char_token(TokenType::RBrace),
            ',' => self.single_char_token(TokenType::Comma),
            '+' => self.single_char_token(TokenType::Plus),
            '-' => self.single_char_token(TokenType::Minus),
            '<' => self.single_char_token(TokenType::LessThan),
            '>' => self.single_char_token(TokenType::GreaterThan),
            '*' => self.single_char_token(TokenType::Asterisk),
            '/' => self.single_char_token(TokenType::Slash),
            // identifiers and numbers leave `ch` on the first character after them
            c if Self::is_letter(c) => return self.read_identifier(),
            c if c.is_ascii_digit() => return self.read_number(),
            _ => self.single_char_token(TokenType::Illegal),
        };

        self.read_char();
        token
    }

    fn read_char(&mut self) {
        self.ch = self.input[self.read_position..].chars().next();
        self.position = self.read_position;
        self.read_position += self.ch.map_or(0, char::len_utf8);
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.read_position..].chars().next()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.ch, Some(' ' | '\t' | '\n' | '\r')) {
            self.read_char();
        }
    }

    fn is_letter(ch: char) -> bool {
        ch.is_ascii_alphabetic() || ch == '_'
    }

    fn single_char_token(&self, token_type: TokenType) -> Token {
        Token::new(token_type, &self.input[self.position..self.read_position])
    }

    /// `=` and `!` become `==` and `!=` when followed by `second`.
    fn one_or_two_char_token(&mut self, token_type: TokenType, second: char) -> Token {
        if self.peek_char() != Some(second) {
            return self.single_char_token(token_type);
        }

        let start = self.position;
        self.read_char();
        Self::two_char_token(&self.input[start..self.read_position])
    }

    fn two_char_token(literal: &str) -> Token {
        Token::new(lookup_operator(literal), literal)
    }

    // Digits are not letters, so `abc1` scans as `abc` followed by `1`.
    fn read_identifier(&mut self) -> Token {
        let start = self.position;
        while self.ch.is_some_and(Self::is_letter) {
            self.read_char();
        }

        let ident = &self.input[start..self.position];
        Token::new(lookup_ident(ident), ident)
    }

    fn read_number(&mut self) -> Token {
        let start = self.position;
        while self.ch.is_some_and(|ch| ch.is_ascii_digit()) {
            self.read_char();
        }

        Token::new(TokenType::Int, &self.input[start..self.position])
    }
}

/// Yields every token up to, but not including, `EOF`.
impl<'a> Iterator for Lexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let token = self.next_token();
        if token.is(TokenType::Eof) {
            None
        } else {
            Some(token)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_types(input: &str) -> Vec<TokenType> {
        Lexer::new(input).map(|token| token.token_type).collect()
    }

    #[test]
    fn test_single_characters() {
        let input = "=+(){},;";
        let mut lexer = Lexer::new(input);

        let expected = vec![
            Token::new(TokenType::Assign, "="),
            Token::new(TokenType::Plus, "+"),
            Token::new(TokenType::LParen, "("),
            Token::new(TokenType::RParen, ")"),
            Token::new(TokenType::LBrace, "{"),
            Token::new(TokenType::RBrace, "}"),
            Token::new(TokenType::Comma, ","),
            Token::new(TokenType::SemiColon, ";"),
            Token::new(TokenType::Eof, ""),
        ];

        for expected_token in expected {
            assert_eq!(lexer.next_token(), expected_token);
        }
    }

    #[test]
    fn test_eof_is_idempotent() {
        let mut lexer = Lexer::new("x");

        assert_eq!(lexer.next_token(), Token::new(TokenType::Ident, "x"));
        for _ in 0..5 {
            assert_eq!(lexer.next_token(), Token::eof());
        }

        let mut empty = Lexer::new("");
        assert_eq!(empty.next_token(), Token::eof());
        assert_eq!(empty.next_token(), Token::eof());
        assert_eq!(empty.next(), None);
    }

    #[test]
    fn test_program() {
        let input = "let five = 5;
    let ten = 10;
    let add = fn(x, y) {
    x + y;
    };
    let result = add(five, ten);
    ";
        let expected = vec![
            (TokenType::Let, "let"),
            (TokenType::Ident, "five"),
            (TokenType::Assign, "="),
            (TokenType::Int, "5"),
            (TokenType::SemiColon, ";"),
            (TokenType::Let, "let"),
            (TokenType::Ident, "ten"),
            (TokenType::Assign, "="),
            (TokenType::Int, "10"),
            (TokenType::SemiColon, ";"),
            (TokenType::Let, "let"),
            (TokenType::Ident, "add"),
            (TokenType::Assign, "="),
            (TokenType::Function, "fn"),
            (TokenType::LParen, "("),
            (TokenType::Ident, "x"),
            (TokenType::Comma, ","),
            (TokenType::Ident, "y"),
            (TokenType::RParen, ")"),
            (TokenType::LBrace, "{"),
            (TokenType::Ident, "x"),
            (TokenType::Plus, "+"),
            (TokenType::Ident, "y"),
            (TokenType::SemiColon, ";"),
            (TokenType::RBrace, "}"),
            (TokenType::SemiColon, ";"),
            (TokenType::Let, "let"),
            (TokenType::Ident, "result"),
            (TokenType::Assign, "="),
            (TokenType::Ident, "add"),
            (TokenType::LParen, "("),
            (TokenType::Ident, "five"),
            (TokenType::Comma, ","),
            (TokenType::Ident, "ten"),
            (TokenType::RParen, ")"),
            (TokenType::SemiColon, ";"),
        ];

        let output = Lexer::new(input).collect::<Vec<_>>();
        assert_eq!(
            output,
            expected
                .into_iter()
                .map(|(token_type, literal)| Token::new(token_type, literal))
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_operators() {
        let input = "
    !-/*5;
    5 < 10 > 5;
    ";

        assert_eq!(
            token_types(input),
            vec![
                TokenType::Bang,
                TokenType::Minus,
                TokenType::Slash,
                TokenType::Asterisk,
                TokenType::Int,
                TokenType::SemiColon,
                TokenType::Int,
                TokenType::LessThan,
                TokenType::Int,
                TokenType::GreaterThan,
                TokenType::Int,
                TokenType::SemiColon,
            ]
        );
    }

    #[test]
    fn test_keywords() {
        let input = "if (5 < 10) {
    return true;
    } else {
    return false;
    }";

        assert_eq!(
            token_types(input),
            vec![
                TokenType::If,
                TokenType::LParen,
                TokenType::Int,
                TokenType::LessThan,
                TokenType::Int,
                TokenType::RParen,
                TokenType::LBrace,
                TokenType::Return,
                TokenType::True,
                TokenType::SemiColon,
                TokenType::RBrace,
                TokenType::Else,
                TokenType::LBrace,
                TokenType::Return,
                TokenType::False,
                TokenType::SemiColon,
                TokenType::RBrace,
            ]
        );
    }

    #[test]
    fn test_two_char_operators() {
        let output = Lexer::new("10 == 10; 10 != 9; a = !b; !!c").collect::<Vec<_>>();

        assert_eq!(
            output,
            vec![
                Token::new(TokenType::Int, "10"),
                Token::new(TokenType::Equal, "=="),
                Token::new(TokenType::Int, "10"),
                Token::new(TokenType::SemiColon, ";"),
                Token::new(TokenType::Int, "10"),
                Token::new(TokenType::NotEqual, "!="),
                Token::new(TokenType::Int, "9"),
                Token::new(TokenType::SemiColon, ";"),
                Token::new(TokenType::Ident, "a"),
                Token::new(TokenType::Assign, "="),
                Token::new(TokenType::Bang, "!"),
                Token::new(TokenType::Ident, "b"),
                Token::new(TokenType::SemiColon, ";"),
                Token::new(TokenType::Bang, "!"),
                Token::new(TokenType::Bang, "!"),
                Token::new(TokenType::Ident, "c"),
            ]
        );
    }

    #[test]
    fn test_identifiers_stop_at_digits() {
        let output = Lexer::new("abc1 _under_score x2y").collect::<Vec<_>>();

        assert_eq!(
            output,
            vec![
                Token::new(TokenType::Ident, "abc"),
                Token::new(TokenType::Int, "1"),
                Token::new(TokenType::Ident, "_under_score"),
                Token::new(TokenType::Ident, "x"),
                Token::new(TokenType::Int, "2"),
                Token::new(TokenType::Ident, "y"),
            ]
        );
    }

    #[test]
    fn test_illegal_characters() {
        let output = Lexer::new("a @ \"s\" é 1.5").collect::<Vec<_>>();

        assert_eq!(
            output,
            vec![
                Token::new(TokenType::Ident, "a"),
                Token::new(TokenType::Illegal, "@"),
                Token::new(TokenType::Illegal, "\""),
                Token::new(TokenType::Ident, "s"),
                Token::new(TokenType::Illegal, "\""),
                Token::new(TokenType::Illegal, "é"),
                Token::new(TokenType::Int, "1"),
                Token::new(TokenType::Illegal, "."),
                Token::new(TokenType::Int, "5"),
            ]
        );
    }

    #[test]
    fn test_trailing_operator_before_eof() {
        let mut lexer = Lexer::new("a =");

        assert_eq!(lexer.next_token(), Token::new(TokenType::Ident, "a"));
        assert_eq!(lexer.next_token(), Token::new(TokenType::Assign, "="));
        assert_eq!(lexer.next_token(), Token::eof());
    }

    #[test]
    fn test_whitespace_before_token() {
        let mut lexer = Lexer::new("  \t\r\n  ab");

        assert_eq!(lexer.next_token(), Token::new(TokenType::Ident, "ab"));
        assert_eq!(lexer.position, 9);
        assert_eq!(lexer.next_token(), Token::eof());

        let mut blank = Lexer::new(" \n\t ");
        assert_eq!(blank.next_token(), Token::eof());
        assert_eq!(blank.position, 4);
    }
}
