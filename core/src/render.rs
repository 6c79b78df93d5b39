//! Prefix (Polish-notation) rendering of expression trees, for diagnostics.
//!
//! `a + b - c * d / 2 + e * 3` renders as
//! `add(sub(add(a, b), div(mul(c, d), 2)), mul(e, 3))`. The output is fully
//! parenthesized, so it reflects the tree shape and nothing else.

use core::fmt;

use crate::{
    String, ToString,
    ast::{BinaryOp, Expression, Node},
    errors::Error,
    format,
    visitor::{NodeVisitor, dispatch},
};

/// Displays a constant in shortest round-trip form, switching to exponent
/// notation for very large or very small magnitudes (`1e300`, `2.5e-7`).
#[derive(Debug, Clone, Copy)]
pub struct DisplayConstant(pub f64);

impl fmt::Display for DisplayConstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let magnitude = self.0.abs();
        if self.0.is_finite() && magnitude != 0.0 && !(1e-5..1e16).contains(&magnitude) {
            write!(f, "{:e}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Visitor producing `op(left, right)` strings.
pub struct PrefixRenderer;

impl<'a> NodeVisitor<'a> for PrefixRenderer {
    type Output = String;

    fn visit_constant(&mut self, value: f64) -> String {
        DisplayConstant(value).to_string()
    }

    fn visit_parameter(&mut self, _index: u32, name: &'a str) -> String {
        name.to_string()
    }

    fn visit_binary(&mut self, op: BinaryOp, left: String, right: String) -> String {
        format!("{}({}, {})", op.mnemonic(), left, right)
    }
}

pub fn prefix(expr: &Expression<'_>) -> Result<String, Error> {
    expr.visit(&mut PrefixRenderer)
}

/// Render a tree that has not been validated into an [`Expression`].
pub fn prefix_node<'a>(node: &'a Node<'a>, params: &[&'a str]) -> Result<String, Error> {
    dispatch(&mut PrefixRenderer, node, params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::ExpressionBuilder;
    use bumpalo::Bump;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_canonical_sample() {
        let arena = Bump::new();
        let b = ExpressionBuilder::new(&arena);
        // a + b - c * d / 2 + e * 3
        let root = b.add(
            b.sub(
                b.add(b.param("a"), b.param("b")),
                b.div(b.mul(b.param("c"), b.param("d")), b.constant(2.0)),
            ),
            b.mul(b.param("e"), b.constant(3.0)),
        );
        let expr = b.build(root).unwrap();

        assert_eq!(
            prefix(&expr).unwrap(),
            "add(sub(add(a, b), div(mul(c, d), 2)), mul(e, 3))"
        );
        assert_eq!(
            expr.to_string(),
            "add(sub(add(a, b), div(mul(c, d), 2)), mul(e, 3))"
        );
    }

    #[test]
    fn test_structure_not_precedence() {
        let arena = Bump::new();
        let b = ExpressionBuilder::new(&arena);
        // a * (b + c), which infix would need parentheses for
        let expr = b
            .build(b.mul(b.param("a"), b.add(b.param("b"), b.param("c"))))
            .unwrap();
        assert_eq!(prefix(&expr).unwrap(), "mul(a, add(b, c))");
    }

    #[test]
    fn test_constants() {
        let arena = Bump::new();
        let b = ExpressionBuilder::new(&arena);
        let expr = b
            .build(b.sub(b.constant(0.5), b.constant(-1.25)))
            .unwrap();
        assert_eq!(prefix(&expr).unwrap(), "sub(0.5, -1.25)");

        let leaf = b.build(b.constant(42.0)).unwrap();
        assert_eq!(prefix(&leaf).unwrap(), "42");
    }

    #[test]
    fn test_extreme_constants_use_exponent_form() {
        let arena = Bump::new();
        let b = ExpressionBuilder::new(&arena);
        let expr = b
            .build(b.mul(b.constant(1e300), b.constant(-2.5e-300)))
            .unwrap();
        assert_eq!(prefix(&expr).unwrap(), "mul(1e300, -2.5e-300)");

        assert_eq!(DisplayConstant(1e16).to_string(), "1e16");
        assert_eq!(DisplayConstant(123456789.0).to_string(), "123456789");
        assert_eq!(DisplayConstant(0.00001).to_string(), "0.00001");
        assert_eq!(DisplayConstant(0.000001).to_string(), "1e-6");
        assert_eq!(DisplayConstant(-0.0).to_string(), "-0");
        assert_eq!(DisplayConstant(f64::INFINITY).to_string(), "inf");
        assert_eq!(DisplayConstant(f64::NAN).to_string(), "NaN");
    }

    #[test]
    fn test_unvalidated_tree_reports_unsupported_kind() {
        let arena = Bump::new();
        let b = ExpressionBuilder::new(&arena);
        let node = b.add(b.constant(1.0), b.other("pow", &[b.constant(2.0), b.constant(3.0)]));
        let err = prefix_node(node, &[]).unwrap_err();
        assert_eq!(
            err,
            Error::UnsupportedNodeKind {
                kind: "pow".to_string()
            }
        );
    }
}
