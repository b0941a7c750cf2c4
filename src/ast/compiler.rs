use crate::ast::{ASTNode, Bindings, Number, Parser};
use crate::error::{Error, EvaluationError};
use log::{debug, trace};
use std::fmt;
use std::sync::Arc;

/// A compiled node: takes the caller's bindings, yields the node's value.
pub type CompiledFn = Arc<dyn Fn(&Bindings) -> Result<Number, EvaluationError> + Send + Sync>;

/// Output of compiling one node. `constant` is set when the node's value
/// is already known without any bindings.
struct Compiled {
    function: CompiledFn,
    constant: Option<Number>,
}

impl Compiled {
    fn constant(value: Number) -> Self {
        Self {
            function: Arc::new(move |_: &Bindings| Ok::<_, EvaluationError>(value)),
            constant: Some(value),
        }
    }

    fn dynamic(function: CompiledFn) -> Self {
        Self {
            function,
            constant: None,
        }
    }
}

/// Turns an [`ASTNode`] into a tree of closures that can be invoked many
/// times without walking the tree again.
#[derive(Debug, Clone, Copy)]
pub struct Compiler {
    fold_constants: bool,
}

impl Default for Compiler {
    fn default() -> Self {
        Self {
            fold_constants: true,
        }
    }
}

impl Compiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Controls whether operations over constants are computed once at
    /// compile time.
    pub fn with_constant_folding(mut self, fold_constants: bool) -> Self {
        self.fold_constants = fold_constants;
        self
    }

    pub fn compile(&self, ast: &ASTNode) -> CompiledExpression {
        debug!("Compiling expression: {}", ast);
        let compiled = self.compile_node(ast);
        CompiledExpression {
            function: compiled.function,
            references: ast.references(),
            source: ast.to_string(),
        }
    }

    /// Parses `expression` and compiles the result.
    pub fn compile_expression(&self, expression: &str) -> Result<CompiledExpression, Error> {
        let ast = Parser::parse_str(expression)?;
        Ok(self.compile(&ast))
    }

    fn compile_node(&self, node: &ASTNode) -> Compiled {
        match node {
            ASTNode::Constant(value) => Compiled::constant(*value),
            ASTNode::Reference(name) => {
                let name = name.clone();
                Compiled::dynamic(Arc::new(move |bindings: &Bindings| {
                    bindings
                        .get(&name)
                        .copied()
                        .ok_or_else(|| EvaluationError::Unbound(name.clone()))
                }))
            }
            ASTNode::Operation {
                left,
                operator,
                right,
            } => {
                let left = self.compile_node(left);
                let right = self.compile_node(right);
                let operator = *operator;

                if self.fold_constants {
                    if let (Some(a), Some(b)) = (left.constant, right.constant) {
                        // A failing fold stays in the tree so the error surfaces on invoke.
                        if let Ok(value) = a.apply(operator, b) {
                            trace!("folded {a} {operator} {b} into {value}");
                            return Compiled::constant(value);
                        }
                    }
                }

                let (left, right) = (left.function, right.function);
                Compiled::dynamic(Arc::new(move |bindings: &Bindings| {
                    let left_value = left(bindings)?;
                    let right_value = right(bindings)?;
                    left_value.apply(operator, right_value)
                }))
            }
        }
    }
}

/// A reusable, thread-safe callable built from one expression.
#[derive(Clone)]
pub struct CompiledExpression {
    function: CompiledFn,
    references: Vec<String>,
    source: String,
}

impl CompiledExpression {
    /// Evaluates the expression against `bindings`. Extra bindings are ignored.
    pub fn invoke(&self, bindings: &Bindings) -> Result<Number, EvaluationError> {
        (self.function)(bindings)
    }

    pub fn calculate(&self, bindings: &Bindings) -> Result<Number, EvaluationError> {
        self.invoke(bindings)
    }

    /// Like [`invoke`](Self::invoke), but fails with
    /// [`EvaluationError::UnknownBinding`] when `bindings` names a variable the
    /// expression never references. The smallest such name is reported.
    pub fn invoke_strict(&self, bindings: &Bindings) -> Result<Number, EvaluationError> {
        let unknown = bindings
            .keys()
            .filter(|name| !self.references.contains(name))
            .min();
        if let Some(name) = unknown {
            return Err(EvaluationError::UnknownBinding(name.clone()));
        }
        self.invoke(bindings)
    }

    pub fn references(&self) -> &[String] {
        &self.references
    }
}

impl fmt::Display for CompiledExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl fmt::Debug for CompiledExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledExpression")
            .field("source", &self.source)
            .field("references", &self.references)
            .finish_non_exhaustive()
    }
}
