use crate::ast::{Operator, Token};
use thiserror::Error;

/// Errors raised while scanning source text into tokens.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexError {
    #[error("Unexpected input \"{input}\" at position {position}")]
    UnexpectedInput { input: char, position: usize },

    #[error("Malformed number \"{text}\" at position {position}")]
    MalformedNumber { text: String, position: usize },
}

impl LexError {
    /// Byte offset where the offending token starts.
    pub fn position(&self) -> usize {
        match self {
            LexError::UnexpectedInput { position, .. }
            | LexError::MalformedNumber { position, .. } => *position,
        }
    }
}

/// Errors raised when a well-formed token sequence is not a valid expression.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Illegal token in factor: {token}")]
    IllegalToken { token: Token, position: usize },

    #[error("Missing closing parenthesis")]
    MissingClosingParenthesis { position: usize },

    #[error("Trailing tokens after expression")]
    TrailingTokens { token: Token, position: usize },

    #[error("Expression nested deeper than {limit} levels at position {position}")]
    NestingTooDeep { limit: usize, position: usize },
}

impl ParseError {
    pub fn position(&self) -> usize {
        match self {
            ParseError::IllegalToken { position, .. }
            | ParseError::MissingClosingParenthesis { position }
            | ParseError::TrailingTokens { position, .. }
            | ParseError::NestingTooDeep { position, .. } => *position,
        }
    }
}

/// Errors raised while evaluating a parsed or compiled expression.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvaluationError {
    #[error("No binding for \"{0}\"")]
    Unbound(String),

    #[error("Unknown binding \"{0}\"")]
    UnknownBinding(String),

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Integer overflow in {0}")]
    Overflow(Operator),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
