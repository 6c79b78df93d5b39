//! Algebraic property checks over binary operators.
//!
//! These are pointwise checks: each call tests one choice of operands.
//! Callers decide which operands to sample. Results are compared as IEEE
//! values except that two NaNs count as equal, so `f(a, b)` producing NaN
//! on both sides still satisfies the property.

/// `f(a, b) == f(b, a)`.
pub fn is_commutative<F>(f: F, a: f64, b: f64) -> bool
where
    F: Fn(f64, f64) -> f64,
{
    same(f(a, b), f(b, a))
}

/// `f(f(a, b), c) == f(a, f(b, c))`.
pub fn is_associative<F>(f: F, a: f64, b: f64, c: f64) -> bool
where
    F: Fn(f64, f64) -> f64,
{
    same(f(f(a, b), c), f(a, f(b, c)))
}

fn same(x: f64, y: f64) -> bool {
    x == y || (x.is_nan() && y.is_nan())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::BinaryOp;

    // Small integers keep sums and products exact.
    fn samples() -> impl Iterator<Item = f64> + Clone {
        (-4..=4).map(f64::from)
    }

    fn always_commutative(f: impl Fn(f64, f64) -> f64 + Copy) -> bool {
        samples().all(|a| samples().all(|b| is_commutative(f, a, b)))
    }

    fn always_associative(f: impl Fn(f64, f64) -> f64 + Copy) -> bool {
        samples().all(|a| samples().all(|b| samples().all(|c| is_associative(f, a, b, c))))
    }

    #[test]
    fn test_addition() {
        let add = |a: f64, b: f64| a + b;
        assert!(always_commutative(add));
        assert!(always_associative(add));
    }

    #[test]
    fn test_multiply_then_add_one() {
        let f = |a: f64, b: f64| a * b + 1.0;
        assert!(always_commutative(f));
        assert!(!always_associative(f));
        assert!(!is_associative(f, 1.0, 2.0, 3.0));
    }

    #[test]
    fn test_left_projection() {
        let first = |a: f64, _: f64| a;
        assert!(!always_commutative(first));
        assert!(always_associative(first));
    }

    #[test]
    fn test_subtraction() {
        let sub = |a: f64, b: f64| a - b;
        assert!(!is_commutative(sub, 1.0, 2.0));
        assert!(!is_associative(sub, 1.0, 2.0, 3.0));
        assert!(!always_commutative(sub));
        assert!(!always_associative(sub));
    }

    #[test]
    fn test_binary_op_semantics() {
        let apply = |op: BinaryOp| move |a: f64, b: f64| op.apply(a, b);

        assert!(always_commutative(apply(BinaryOp::Add)));
        assert!(always_commutative(apply(BinaryOp::Multiply)));
        assert!(always_associative(apply(BinaryOp::Add)));
        assert!(always_associative(apply(BinaryOp::Multiply)));

        assert!(!always_commutative(apply(BinaryOp::Subtract)));
        assert!(!always_commutative(apply(BinaryOp::Divide)));
        assert!(!is_associative(apply(BinaryOp::Divide), 8.0, 4.0, 2.0));
    }

    #[test]
    fn test_nan_compares_equal_to_itself() {
        let div = |a: f64, b: f64| a / b;
        assert!(is_commutative(div, 0.0, 0.0));
        assert!(!same(f64::NAN, 1.0));
    }
}
