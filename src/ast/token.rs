use crate::ast::Number;
use crate::error::LexError;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    End,
    Number(Number),
    Identifier(String),
    Plus,
    Minus,
    Multiply,
    Divide,
    OpenParen,
    CloseParen,
}

impl Token {
    /// Maps the single-character operators and parentheses to their token.
    pub fn from_symbol(c: char) -> Option<Token> {
        match c {
            '+' => Some(Token::Plus),
            '-' => Some(Token::Minus),
            '*' => Some(Token::Multiply),
            '/' => Some(Token::Divide),
            '(' => Some(Token::OpenParen),
            ')' => Some(Token::CloseParen),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::End => f.write_str("end of input"),
            Token::Number(value) => write!(f, "{value}"),
            Token::Identifier(name) => f.write_str(name),
            Token::Plus => f.write_str("+"),
            Token::Minus => f.write_str("-"),
            Token::Multiply => f.write_str("*"),
            Token::Divide => f.write_str("/"),
            Token::OpenParen => f.write_str("("),
            Token::CloseParen => f.write_str(")"),
        }
    }
}

/// A pull-based token source with one token of lookahead.
///
/// Implemented by [`Lexer`](crate::ast::Lexer), which scans lazily, and by
/// [`TokenBuffer`] for token sequences that were realised up front.
pub trait TokenStream {
    /// Returns the lookahead token without consuming it.
    fn peek_token(&mut self) -> Result<&Token, LexError>;

    /// Takes the lookahead token. Returns `None` when nothing has been peeked
    /// since the last call.
    fn consume_token(&mut self) -> Option<Token>;

    /// Start position of the lookahead token.
    fn position(&self) -> usize;

    fn at_end(&mut self) -> Result<bool, LexError> {
        Ok(matches!(self.peek_token()?, Token::End))
    }
}

static END: Token = Token::End;

/// An already-lexed token sequence. Positions are token indices. Reading
/// past the last token yields `End`, as does a sequence with no `End`.
#[derive(Debug, Clone, Default)]
pub struct TokenBuffer {
    tokens: Vec<Token>,
    index: usize,
    peeked: bool,
}

impl TokenBuffer {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            index: 0,
            peeked: false,
        }
    }
}

impl From<Vec<Token>> for TokenBuffer {
    fn from(tokens: Vec<Token>) -> Self {
        TokenBuffer::new(tokens)
    }
}

impl TokenStream for TokenBuffer {
    fn peek_token(&mut self) -> Result<&Token, LexError> {
        self.peeked = true;
        Ok(self.tokens.get(self.index).unwrap_or(&END))
    }

    fn consume_token(&mut self) -> Option<Token> {
        if !self.peeked {
            return None;
        }
        self.peeked = false;
        let token = self.tokens.get(self.index).cloned().unwrap_or(Token::End);
        if self.index < self.tokens.len() && token != Token::End {
            self.index += 1;
        }
        Some(token)
    }

    fn position(&self) -> usize {
        self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Token::Number(Number::Integer(12)).to_string(), "12");
        assert_eq!(Token::Identifier("abc".to_string()).to_string(), "abc");
        assert_eq!(Token::CloseParen.to_string(), ")");
        assert_eq!(Token::End.to_string(), "end of input");
    }

    #[test]
    fn test_equality_is_by_tag_and_payload() {
        assert_eq!(Token::Plus, Token::Plus);
        assert_ne!(Token::Plus, Token::Minus);
        assert_eq!(
            Token::Identifier("a".to_string()),
            Token::Identifier("a".to_string())
        );
        assert_ne!(
            Token::Number(Number::Integer(1)),
            Token::Number(Number::Integer(2))
        );
        assert_ne!(
            Token::Number(Number::Integer(1)),
            Token::Number(Number::Float(1.0))
        );
    }

    #[test]
    fn test_buffer_consume_requires_peek() {
        let mut buffer = TokenBuffer::new(vec![Token::Number(Number::Integer(1)), Token::End]);
        assert_eq!(buffer.consume_token(), None);
        assert_eq!(buffer.peek_token().unwrap(), &Token::Number(Number::Integer(1)));
        assert_eq!(buffer.consume_token(), Some(Token::Number(Number::Integer(1))));
        assert_eq!(buffer.position(), 1);
        assert!(buffer.at_end().unwrap());
    }

    #[test]
    fn test_buffer_keeps_returning_end() {
        let mut buffer = TokenBuffer::new(vec![Token::Plus]);
        buffer.peek_token().unwrap();
        buffer.consume_token();
        for _ in 0..3 {
            assert_eq!(buffer.peek_token().unwrap(), &Token::End);
            assert_eq!(buffer.consume_token(), Some(Token::End));
        }
    }
}
