//! Core evaluation logic.

use crate::{ast::BinaryOp, visitor::NodeVisitor};

/// Evaluator bound to one argument vector.
///
/// Callers guarantee `args` covers every parameter index in the tree;
/// [`evaluate`](super::evaluate) does so by checking arity against a
/// validated expression.
pub(super) struct Evaluator<'args> {
    args: &'args [f64],
}

impl<'args> Evaluator<'args> {
    pub(super) fn new(args: &'args [f64]) -> Self {
        Self { args }
    }
}

impl<'a> NodeVisitor<'a> for Evaluator<'_> {
    type Output = f64;

    fn visit_constant(&mut self, value: f64) -> f64 {
        value
    }

    fn visit_parameter(&mut self, index: u32, _name: &'a str) -> f64 {
        self.args[index as usize]
    }

    fn visit_binary(&mut self, op: BinaryOp, left: f64, right: f64) -> f64 {
        op.apply(left, right)
    }
}
