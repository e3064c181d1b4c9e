use crate::interpreter::operator::{BinaryOperator, Function};
use crate::interpreter::syntax::expression_tree::Node;

/// If a method is not implemented, the default implementation will continue in a pre-order
/// traversal of the tree.
pub(crate) trait SyntaxVisitor: Sized {
    fn visit_literal_integer(&mut self, _value: i64) {}
    fn visit_identifier(&mut self, _name: &str) {}
    fn visit_binary_operation(
        &mut self,
        _operation: &BinaryOperator,
        left_operand: &Node,
        right_operand: &Node,
    ) {
        walk_binary_operation(self, left_operand, right_operand)
    }
    fn visit_function_call(&mut self, _function: &Function, argument: &Node) {
        walk_function_call(self, argument)
    }
}

pub(crate) fn walk_binary_operation(
    visitor: &mut impl SyntaxVisitor,
    left_operand: &Node,
    right_operand: &Node,
) {
    left_operand.accept(visitor);
    right_operand.accept(visitor);
}

pub(crate) fn walk_function_call(visitor: &mut impl SyntaxVisitor, argument: &Node) {
    argument.accept(visitor);
}

/// Finds out whether a tree mentions a given identifier anywhere.
pub(crate) struct IdentifierSearchVisitor<'a> {
    pub(crate) name: &'a str,
    pub(crate) found: bool,
}

impl SyntaxVisitor for IdentifierSearchVisitor<'_> {
    fn visit_identifier(&mut self, name: &str) {
        self.found |= name == self.name;
    }
}
