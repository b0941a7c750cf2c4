use crate::ast::{ASTNode, Number, Operator};

/// A walk over an [`ASTNode`] tree producing one result per node.
///
/// [`ASTNode::accept`] picks the method for the node's variant; visiting the
/// children of an operation is up to the implementation, which calls
/// `accept` on them as needed.
pub trait Visitor {
    type Output;

    fn visit_constant(&mut self, value: Number) -> Self::Output;

    fn visit_reference(&mut self, name: &str) -> Self::Output;

    fn visit_operation(
        &mut self,
        operator: Operator,
        left: &ASTNode,
        right: &ASTNode,
    ) -> Self::Output;
}
