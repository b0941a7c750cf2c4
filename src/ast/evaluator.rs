use crate::ast::{ASTNode, Bindings, Number, Operator, Visitor};
use crate::error::EvaluationError;
use std::collections::HashSet;

/// Tree-walking interpreter over one binding table.
pub struct Evaluator<'b> {
    bindings: &'b Bindings,
}

impl<'b> Evaluator<'b> {
    pub fn new(bindings: &'b Bindings) -> Self {
        Self { bindings }
    }

    /// Evaluates an `ASTNode` against the bindings this evaluator was built with.
    pub fn evaluate(&mut self, ast: &ASTNode) -> Result<Number, EvaluationError> {
        ast.accept(self)
    }
}

impl Visitor for Evaluator<'_> {
    type Output = Result<Number, EvaluationError>;

    fn visit_constant(&mut self, value: Number) -> Self::Output {
        Ok(value)
    }

    fn visit_reference(&mut self, name: &str) -> Self::Output {
        self.bindings
            .get(name)
            .copied()
            .ok_or_else(|| EvaluationError::Unbound(name.to_string()))
    }

    fn visit_operation(&mut self, operator: Operator, left: &ASTNode, right: &ASTNode) -> Self::Output {
        let left_value = left.accept(self)?;
        let right_value = right.accept(self)?;
        left_value.apply(operator, right_value)
    }
}

/// Collects reference names in order of first appearance, without repeats.
#[derive(Debug, Default)]
pub struct ReferenceFinder {
    seen: HashSet<String>,
    names: Vec<String>,
}

impl ReferenceFinder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn find(mut self, ast: &ASTNode) -> Vec<String> {
        ast.accept(&mut self);
        self.names
    }
}

impl Visitor for ReferenceFinder {
    type Output = ();

    fn visit_constant(&mut self, _value: Number) {}

    fn visit_reference(&mut self, name: &str) {
        if self.seen.insert(name.to_string()) {
            self.names.push(name.to_string());
        }
    }

    fn visit_operation(&mut self, _operator: Operator, left: &ASTNode, right: &ASTNode) {
        left.accept(self);
        right.accept(self);
    }
}

impl ASTNode {
    /// Names of the variables this expression needs, first occurrence first.
    pub fn references(&self) -> Vec<String> {
        ReferenceFinder::new().find(self)
    }

    pub fn calculate(&self, bindings: &Bindings) -> Result<Number, EvaluationError> {
        Evaluator::new(bindings).evaluate(self)
    }
}
