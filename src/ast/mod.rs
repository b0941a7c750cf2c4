use std::collections::HashMap;
use std::fmt;

mod compiler;
mod evaluator;
mod lexer;
mod number;
mod parser;
mod token;
mod visitor;

pub use compiler::*;
pub use evaluator::*;
pub use lexer::{CharacterStream, Lexer};
pub use number::Number;
pub use parser::{Parser, MAX_DEPTH};
pub use token::{Token, TokenBuffer, TokenStream};
pub use visitor::Visitor;

/// Variable values supplied by the caller for one evaluation.
pub type Bindings = HashMap<String, Number>;

#[derive(Debug, Clone, PartialEq)]
pub enum ASTNode {
    Constant(Number),
    Reference(String),
    Operation {
        left: Box<ASTNode>,
        operator: Operator,
        right: Box<ASTNode>,
    },
}

impl ASTNode {
    pub fn constant(value: impl Into<Number>) -> Self {
        ASTNode::Constant(value.into())
    }

    pub fn reference(name: impl Into<String>) -> Self {
        ASTNode::Reference(name.into())
    }

    pub fn operation(left: ASTNode, operator: Operator, right: ASTNode) -> Self {
        ASTNode::Operation {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }
    }

    /// Dispatches to the visitor method matching this node's variant.
    pub fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Output {
        match self {
            ASTNode::Constant(value) => visitor.visit_constant(*value),
            ASTNode::Reference(name) => visitor.visit_reference(name),
            ASTNode::Operation {
                left,
                operator,
                right,
            } => visitor.visit_operation(*operator, left, right),
        }
    }
}

/// Renders the tree with every operation parenthesised. The output parses
/// back to an equal tree, except for a `Constant(Integer(i64::MIN))`: its
/// digits do not fit an `i64` literal before the minus is applied.
impl fmt::Display for ASTNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ASTNode::Constant(value) => write!(f, "{value}"),
            ASTNode::Reference(name) => f.write_str(name),
            ASTNode::Operation {
                left,
                operator,
                right,
            } => write!(f, "({left} {operator} {right})"),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
        }
    }

    /// Maps an operator token to its operator, if it is one.
    pub fn from_token(token: &Token) -> Option<Operator> {
        match token {
            Token::Plus => Some(Operator::Add),
            Token::Minus => Some(Operator::Subtract),
            Token::Multiply => Some(Operator::Multiply),
            Token::Divide => Some(Operator::Divide),
            _ => None,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl TryFrom<&str> for Operator {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "+" => Ok(Operator::Add),
            "-" => Ok(Operator::Subtract),
            "*" => Ok(Operator::Multiply),
            "/" => Ok(Operator::Divide),
            _ => Err(format!("Unknown operator: {}", value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, LexError};

    #[test]
    fn test_display_parenthesises_every_operation() {
        let ast = ASTNode::operation(
            ASTNode::constant(1),
            Operator::Add,
            ASTNode::operation(
                ASTNode::reference("c"),
                Operator::Multiply,
                ASTNode::constant(-5),
            ),
        );
        assert_eq!(ast.to_string(), "(1 + (c * -5))");
        assert_eq!(ASTNode::constant(2.5).to_string(), "2.5");
        assert_eq!(ASTNode::reference("rate").to_string(), "rate");
    }

    #[test]
    fn test_constants_of_different_kinds_differ() {
        assert_ne!(ASTNode::constant(2), ASTNode::constant(2.0));
        assert_eq!(ASTNode::constant(2.5), ASTNode::constant(2.5));
    }

    #[test]
    fn test_minimum_integer_does_not_reparse() {
        let rendered = ASTNode::constant(i64::MIN).to_string();
        assert_eq!(rendered, "-9223372036854775808");
        assert_eq!(
            Parser::parse_str(&rendered).unwrap_err(),
            Error::Lex(LexError::MalformedNumber {
                text: "9223372036854775808".to_string(),
                position: 1,
            })
        );

        let rendered = ASTNode::constant(i64::MIN + 1).to_string();
        assert_eq!(
            Parser::parse_str(&rendered).unwrap(),
            ASTNode::constant(i64::MIN + 1)
        );
    }

    #[test]
    fn test_operator_conversions() {
        assert_eq!(Operator::try_from("/"), Ok(Operator::Divide));
        assert!(Operator::try_from("%").is_err());
        assert_eq!(Operator::from_token(&Token::Minus), Some(Operator::Subtract));
        assert_eq!(Operator::from_token(&Token::OpenParen), None);
        assert_eq!(Operator::Multiply.to_string(), "*");
    }

    #[test]
    fn test_ast_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ASTNode>();
    }
}
