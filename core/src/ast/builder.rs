//! Arena-backed construction of expression trees.

use core::cell::RefCell;

use bumpalo::Bump;
use hashbrown::HashMap;

use super::{Expression, Node};
use crate::{ToString, Vec, errors::Error};

/// Builds expression trees in an arena, resolving parameter names to
/// indices as they are first mentioned.
///
/// All methods take `&self` so nested calls compose naturally:
///
/// ```
/// use arith_core::ast::ExpressionBuilder;
/// use bumpalo::Bump;
///
/// let arena = Bump::new();
/// let b = ExpressionBuilder::new(&arena);
/// let root = b.add(b.param("x"), b.mul(b.param("y"), b.constant(2.0)));
/// let expr = b.build(root).unwrap();
/// assert_eq!(expr.params(), &["x", "y"]);
/// ```
pub struct ExpressionBuilder<'a> {
    arena: &'a Bump,
    params: RefCell<Vec<&'a str>>,
    indices: RefCell<HashMap<&'a str, u32>>,
}

impl<'a> ExpressionBuilder<'a> {
    pub fn new(arena: &'a Bump) -> Self {
        Self {
            arena,
            params: RefCell::new(Vec::new()),
            indices: RefCell::new(HashMap::new()),
        }
    }

    /// Create a builder with the parameter list declared up front.
    ///
    /// Later `param` calls with these names resolve to their declared
    /// positions regardless of the order they appear in the tree.
    pub fn with_params(arena: &'a Bump, names: &[&str]) -> Result<Self, Error> {
        let builder = Self::new(arena);
        for name in names {
            if builder.indices.borrow().contains_key(name) {
                return Err(Error::DuplicateParameter {
                    name: name.to_string(),
                });
            }
            builder.param(name);
        }
        Ok(builder)
    }

    pub fn arena(&self) -> &'a Bump {
        self.arena
    }

    pub fn constant(&self, value: f64) -> &'a Node<'a> {
        self.arena.alloc(Node::Constant(value))
    }

    /// Reference a parameter by name, declaring it if it is new.
    pub fn param(&self, name: &str) -> &'a Node<'a> {
        let existing = self.indices.borrow().get(name).copied();
        let index = match existing {
            Some(index) => index,
            None => {
                let name: &'a str = self.arena.alloc_str(name);
                let mut params = self.params.borrow_mut();
                let index = params.len() as u32;
                params.push(name);
                self.indices.borrow_mut().insert(name, index);
                index
            }
        };
        self.arena.alloc(Node::Parameter(index))
    }

    pub fn add(&self, left: &'a Node<'a>, right: &'a Node<'a>) -> &'a Node<'a> {
        self.arena.alloc(Node::Add(left, right))
    }

    pub fn sub(&self, left: &'a Node<'a>, right: &'a Node<'a>) -> &'a Node<'a> {
        self.arena.alloc(Node::Subtract(left, right))
    }

    pub fn mul(&self, left: &'a Node<'a>, right: &'a Node<'a>) -> &'a Node<'a> {
        self.arena.alloc(Node::Multiply(left, right))
    }

    pub fn div(&self, left: &'a Node<'a>, right: &'a Node<'a>) -> &'a Node<'a> {
        self.arena.alloc(Node::Divide(left, right))
    }

    /// A node of a kind this compiler does not support.
    ///
    /// Building an expression that contains one fails with
    /// [`Error::UnsupportedNodeKind`].
    pub fn other(&self, kind: &str, operands: &[&'a Node<'a>]) -> &'a Node<'a> {
        let kind: &'a str = self.arena.alloc_str(kind);
        let operands = self.arena.alloc_slice_copy(operands);
        self.arena.alloc(Node::Other { kind, operands })
    }

    /// Validate `root` against the parameters declared so far.
    pub fn build(&self, root: &'a Node<'a>) -> Result<Expression<'a>, Error> {
        let params = self.arena.alloc_slice_copy(&self.params.borrow());
        Expression::new(root, params)
    }
}
