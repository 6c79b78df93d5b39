//! Unit tests for the evaluator.

use super::*;
use crate::ast::ExpressionBuilder;
use bumpalo::Bump;

#[test]
fn test_canonical_sample() {
    let arena = Bump::new();
    let b = ExpressionBuilder::with_params(&arena, &["a", "b", "c", "d", "e"]).unwrap();
    let expr = b
        .build(b.add(
            b.sub(
                b.add(b.param("a"), b.param("b")),
                b.div(b.mul(b.param("c"), b.param("d")), b.constant(2.0)),
            ),
            b.mul(b.param("e"), b.constant(3.0)),
        ))
        .unwrap();

    assert_eq!(evaluate(&expr, &[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap(), 12.0);
}

#[test]
fn test_argument_order_follows_declaration() {
    let arena = Bump::new();
    let b = ExpressionBuilder::with_params(&arena, &["x", "y"]).unwrap();
    // Mentions y before x; arguments still bind in declaration order.
    let expr = b.build(b.sub(b.param("y"), b.param("x"))).unwrap();

    assert_eq!(evaluate(&expr, &[1.0, 10.0]).unwrap(), 9.0);
}

#[test]
fn test_ieee_edge_cases() {
    let arena = Bump::new();
    let b = ExpressionBuilder::with_params(&arena, &["x", "y"]).unwrap();
    let div = b.build(b.div(b.param("x"), b.param("y"))).unwrap();
    let mul = b.build(b.mul(b.param("x"), b.param("y"))).unwrap();

    assert_eq!(evaluate(&div, &[3.0, 0.0]).unwrap(), f64::INFINITY);
    assert_eq!(evaluate(&div, &[-3.0, 0.0]).unwrap(), f64::NEG_INFINITY);
    let nan = evaluate(&div, &[0.0, 0.0]).unwrap();
    assert!(nan.is_nan());
    assert_ne!(nan, nan);

    assert_eq!(evaluate(&mul, &[f64::MAX, 2.0]).unwrap(), f64::INFINITY);
    assert!(evaluate(&mul, &[f64::INFINITY, 0.0]).unwrap().is_nan());
    assert!(evaluate(&mul, &[f64::NAN, 1.0]).unwrap().is_nan());
}

#[test]
fn test_arity_mismatch() {
    let arena = Bump::new();
    let b = ExpressionBuilder::with_params(&arena, &["x", "y"]).unwrap();
    let expr = b.build(b.add(b.param("x"), b.param("y"))).unwrap();

    assert_eq!(
        evaluate(&expr, &[1.0]).unwrap_err(),
        Error::ArityMismatch {
            expected: 2,
            actual: 1
        }
    );
    assert_eq!(
        evaluate(&expr, &[1.0, 2.0, 3.0]).unwrap_err(),
        Error::ArityMismatch {
            expected: 2,
            actual: 3
        }
    );
}

#[test]
fn test_nullary_expression() {
    let arena = Bump::new();
    let b = ExpressionBuilder::with_params(&arena, &[]).unwrap();
    let expr = b
        .build(b.div(b.constant(1.0), b.constant(3.0)))
        .unwrap();

    assert_eq!(evaluate(&expr, &[]).unwrap(), 1.0 / 3.0);
}
