//! Arithmetic expression trees.
//!
//! Nodes are arena-allocated and immutable: a tree is built once by an
//! external producer (usually through [`ExpressionBuilder`]), validated into
//! an [`Expression`], consumed by the visitors, and dropped together with its
//! arena. Nothing compiled from a tree keeps a reference to it.

mod builder;

pub use builder::ExpressionBuilder;

use core::fmt;

use hashbrown::HashSet;

use crate::{
    ToString,
    errors::Error,
    visitor::{NodeVisitor, dispatch},
};

/// The four supported binary operators.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl BinaryOp {
    pub const ALL: [BinaryOp; 4] = [
        BinaryOp::Add,
        BinaryOp::Subtract,
        BinaryOp::Multiply,
        BinaryOp::Divide,
    ];

    /// Apply the operator with IEEE-754 double semantics.
    ///
    /// Division by zero yields `±inf` or `NaN`, never an error.
    #[inline]
    pub fn apply(self, left: f64, right: f64) -> f64 {
        match self {
            BinaryOp::Add => left + right,
            BinaryOp::Subtract => left - right,
            BinaryOp::Multiply => left * right,
            BinaryOp::Divide => left / right,
        }
    }

    /// Name used by the prefix renderer and the bytecode listing.
    pub fn mnemonic(self) -> &'static str {
        match self {
            BinaryOp::Add => "add",
            BinaryOp::Subtract => "sub",
            BinaryOp::Multiply => "mul",
            BinaryOp::Divide => "div",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// A node of an arithmetic expression tree.
///
/// Children are borrowed from the arena the tree was built in. Each child
/// belongs to exactly one parent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Node<'a> {
    Constant(f64),
    /// Index into the enclosing expression's parameter list.
    Parameter(u32),
    Add(&'a Node<'a>, &'a Node<'a>),
    Subtract(&'a Node<'a>, &'a Node<'a>),
    Multiply(&'a Node<'a>, &'a Node<'a>),
    Divide(&'a Node<'a>, &'a Node<'a>),
    /// An operator the producer emitted that this compiler does not lower
    /// (negation, modulo, calls, ...). Rejected on dispatch.
    Other {
        kind: &'a str,
        operands: &'a [&'a Node<'a>],
    },
}

impl<'a> Node<'a> {
    /// Split a binary node into its operator and operands.
    pub fn as_binary(&self) -> Option<(BinaryOp, &'a Node<'a>, &'a Node<'a>)> {
        match *self {
            Node::Add(l, r) => Some((BinaryOp::Add, l, r)),
            Node::Subtract(l, r) => Some((BinaryOp::Subtract, l, r)),
            Node::Multiply(l, r) => Some((BinaryOp::Multiply, l, r)),
            Node::Divide(l, r) => Some((BinaryOp::Divide, l, r)),
            _ => None,
        }
    }

    pub fn kind_name(&self) -> &'a str {
        match *self {
            Node::Constant(_) => "constant",
            Node::Parameter(_) => "parameter",
            Node::Add(..) => "add",
            Node::Subtract(..) => "subtract",
            Node::Multiply(..) => "multiply",
            Node::Divide(..) => "divide",
            Node::Other { kind, .. } => kind,
        }
    }

    /// Length of the longest root-to-leaf path, counting both ends.
    pub fn depth(&self) -> usize {
        match *self {
            Node::Constant(_) | Node::Parameter(_) => 1,
            Node::Add(l, r) | Node::Subtract(l, r) | Node::Multiply(l, r) | Node::Divide(l, r) => {
                1 + l.depth().max(r.depth())
            }
            Node::Other { operands, .. } => {
                1 + operands.iter().map(|n| n.depth()).max().unwrap_or(0)
            }
        }
    }
}

/// A validated expression: a tree plus the ordered parameter list that fixes
/// the arity and argument order of the function it denotes.
///
/// Every `Expression` satisfies:
/// - parameter names are unique;
/// - every `Parameter(index)` has `index < params.len()`;
/// - the tree contains only the six supported node kinds.
#[derive(Debug, Clone, Copy)]
pub struct Expression<'a> {
    root: &'a Node<'a>,
    params: &'a [&'a str],
}

impl<'a> Expression<'a> {
    /// Validate a tree assembled by the caller.
    pub fn new(root: &'a Node<'a>, params: &'a [&'a str]) -> Result<Self, Error> {
        let mut seen = HashSet::with_capacity(params.len());
        for name in params {
            if !seen.insert(*name) {
                return Err(Error::DuplicateParameter {
                    name: name.to_string(),
                });
            }
        }

        dispatch(&mut Validator, root, params)?;

        tracing::debug!(
            arity = params.len(),
            depth = root.depth(),
            "expression validated"
        );
        Ok(Self { root, params })
    }

    pub fn root(&self) -> &'a Node<'a> {
        self.root
    }

    pub fn params(&self) -> &'a [&'a str] {
        self.params
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Walk the tree with `visitor`.
    pub fn visit<V>(&self, visitor: &mut V) -> Result<V::Output, Error>
    where
        V: NodeVisitor<'a> + ?Sized,
    {
        dispatch(visitor, self.root, self.params)
    }
}

impl fmt::Display for Expression<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = crate::render::prefix(self).map_err(|_| fmt::Error)?;
        f.write_str(&rendered)
    }
}

/// Walks a tree only for the checks `dispatch` performs on the way.
struct Validator;

impl<'a> NodeVisitor<'a> for Validator {
    type Output = ();

    fn visit_constant(&mut self, _value: f64) {}

    fn visit_parameter(&mut self, _index: u32, _name: &'a str) {}

    fn visit_binary(&mut self, _op: BinaryOp, _left: (), _right: ()) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use bumpalo::Bump;

    #[test]
    fn test_rejects_out_of_bounds_parameter() {
        let arena = Bump::new();
        let a = arena.alloc(Node::Parameter(0));
        let b = arena.alloc(Node::Parameter(2));
        let root = arena.alloc(Node::Add(a, b));
        let params = arena.alloc_slice_copy(&["a", "b"]);

        let err = Expression::new(root, params).unwrap_err();
        assert_eq!(err, Error::InvalidParameterIndex { index: 2, len: 2 });
    }

    #[test]
    fn test_rejects_duplicate_parameter_names() {
        let arena = Bump::new();
        let root = arena.alloc(Node::Parameter(0));
        let params = arena.alloc_slice_copy(&["x", "y", "x"]);

        let err = Expression::new(root, params).unwrap_err();
        assert_eq!(
            err,
            Error::DuplicateParameter {
                name: "x".to_string()
            }
        );
    }

    #[test]
    fn test_rejects_unsupported_kind_anywhere_in_tree() {
        let arena = Bump::new();
        let x = arena.alloc(Node::Parameter(0));
        let operands = arena.alloc_slice_copy(&[&*x]);
        let neg = arena.alloc(Node::Other {
            kind: "negate",
            operands,
        });
        let one = arena.alloc(Node::Constant(1.0));
        let root = arena.alloc(Node::Multiply(one, neg));
        let params = arena.alloc_slice_copy(&["x"]);

        let err = Expression::new(root, params).unwrap_err();
        assert_eq!(
            err,
            Error::UnsupportedNodeKind {
                kind: "negate".to_string()
            }
        );
    }

    #[test]
    fn test_accepts_unused_parameters() {
        let arena = Bump::new();
        let root = arena.alloc(Node::Constant(7.0));
        let params = arena.alloc_slice_copy(&["unused"]);

        let expr = Expression::new(root, params).unwrap();
        assert_eq!(expr.arity(), 1);
        assert_eq!(expr.root().depth(), 1);
    }

    #[test]
    fn test_binary_op_apply_follows_ieee() {
        assert_eq!(BinaryOp::Divide.apply(1.0, 0.0), f64::INFINITY);
        assert_eq!(BinaryOp::Divide.apply(-1.0, 0.0), f64::NEG_INFINITY);
        assert!(BinaryOp::Divide.apply(0.0, 0.0).is_nan());
        assert_eq!(BinaryOp::Subtract.apply(3.0, 5.0), -2.0);
    }

    #[test]
    fn test_as_binary() {
        let arena = Bump::new();
        let l = arena.alloc(Node::Constant(1.0));
        let r = arena.alloc(Node::Constant(2.0));
        let node = Node::Divide(l, r);
        let (op, left, right) = node.as_binary().unwrap();
        assert_eq!(op, BinaryOp::Divide);
        assert_eq!(*left, Node::Constant(1.0));
        assert_eq!(*right, Node::Constant(2.0));
        assert!(Node::Constant(0.0).as_binary().is_none());
    }
}
