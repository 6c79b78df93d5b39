//! Generic recursive dispatch over expression trees.
//!
//! Every consumer of a tree (validation, prefix rendering, bytecode
//! emission, direct evaluation) implements [`NodeVisitor`], a set of
//! per-kind combinators, and lets [`dispatch`] do the walking. The walk is
//! always the same: leaves are handed to their handler directly, binary
//! nodes visit `left`, then `right`, then combine the two results. A
//! visitor therefore observes its binary handlers in postorder.
//!
//! Output can be:
//! - `()` for side-effect traversals (validation, bytecode emission)
//! - `String` for rendering
//! - `f64` for evaluation

use crate::{
    ToString,
    ast::{BinaryOp, Node},
    errors::Error,
};

/// Per-kind handlers for a tree walk.
///
/// The four binary handlers default to [`NodeVisitor::visit_binary`], so a
/// visitor that treats all operators alike only implements three methods.
pub trait NodeVisitor<'a> {
    type Output;

    fn visit_constant(&mut self, value: f64) -> Self::Output;

    /// `name` is the declared name of parameter `index`.
    fn visit_parameter(&mut self, index: u32, name: &'a str) -> Self::Output;

    fn visit_binary(
        &mut self,
        op: BinaryOp,
        left: Self::Output,
        right: Self::Output,
    ) -> Self::Output;

    fn visit_add(&mut self, left: Self::Output, right: Self::Output) -> Self::Output {
        self.visit_binary(BinaryOp::Add, left, right)
    }

    fn visit_subtract(&mut self, left: Self::Output, right: Self::Output) -> Self::Output {
        self.visit_binary(BinaryOp::Subtract, left, right)
    }

    fn visit_multiply(&mut self, left: Self::Output, right: Self::Output) -> Self::Output {
        self.visit_binary(BinaryOp::Multiply, left, right)
    }

    fn visit_divide(&mut self, left: Self::Output, right: Self::Output) -> Self::Output {
        self.visit_binary(BinaryOp::Divide, left, right)
    }
}

/// Route `node` to exactly one handler of `visitor`, recursing into children
/// first.
///
/// Fails with [`Error::UnsupportedNodeKind`] on `Node::Other` and with
/// [`Error::InvalidParameterIndex`] when a parameter index is not covered by
/// `params`. Recursion depth equals tree depth.
pub fn dispatch<'a, V>(
    visitor: &mut V,
    node: &'a Node<'a>,
    params: &[&'a str],
) -> Result<V::Output, Error>
where
    V: NodeVisitor<'a> + ?Sized,
{
    match *node {
        Node::Constant(value) => Ok(visitor.visit_constant(value)),
        Node::Parameter(index) => match params.get(index as usize) {
            Some(&name) => Ok(visitor.visit_parameter(index, name)),
            None => Err(Error::InvalidParameterIndex {
                index,
                len: params.len(),
            }),
        },
        Node::Add(left, right) => {
            let left = dispatch(visitor, left, params)?;
            let right = dispatch(visitor, right, params)?;
            Ok(visitor.visit_add(left, right))
        }
        Node::Subtract(left, right) => {
            let left = dispatch(visitor, left, params)?;
            let right = dispatch(visitor, right, params)?;
            Ok(visitor.visit_subtract(left, right))
        }
        Node::Multiply(left, right) => {
            let left = dispatch(visitor, left, params)?;
            let right = dispatch(visitor, right, params)?;
            Ok(visitor.visit_multiply(left, right))
        }
        Node::Divide(left, right) => {
            let left = dispatch(visitor, left, params)?;
            let right = dispatch(visitor, right, params)?;
            Ok(visitor.visit_divide(left, right))
        }
        Node::Other { kind, .. } => Err(Error::UnsupportedNodeKind {
            kind: kind.to_string(),
        }),
    }
}
