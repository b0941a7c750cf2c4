//! Arithmetic expressions over integers, floats and named variables.
//!
//! An expression is lexed, parsed into an [`ast::ASTNode`], and then either
//! evaluated directly or compiled into a reusable [`ast::CompiledExpression`].
//!
//! ```
//! use rechner_rs::ast::{Bindings, Number};
//!
//! let compiled = rechner_rs::compile("1 + 2*a").unwrap();
//! let mut bindings = Bindings::new();
//! bindings.insert("a".to_string(), Number::Integer(3));
//! assert_eq!(compiled.invoke(&bindings).unwrap(), Number::Integer(7));
//! ```

pub mod ast;
pub mod calculator;
pub mod error;

use ast::{ASTNode, Bindings, CompiledExpression, Compiler, Number, Parser};
pub use calculator::{Calculator, CalculatorConfig};
pub use error::{Error, Result};

/// Parses `expression` into a tree without evaluating it.
pub fn parse(expression: &str) -> Result<ASTNode> {
    Parser::parse_str(expression)
}

/// Parses and evaluates `expression` in one step.
pub fn calculate(expression: &str, bindings: &Bindings) -> Result<Number> {
    let ast = parse(expression)?;
    Ok(ast.calculate(bindings)?)
}

/// Parses and compiles `expression` into a reusable callable.
pub fn compile(expression: &str) -> Result<CompiledExpression> {
    Compiler::new().compile_expression(expression)
}
