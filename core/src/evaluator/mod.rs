//! Direct tree-walking evaluation of expressions.
//!
//! This is the semantic reference the bytecode backends are checked
//! against: every binary node applies
//! [`BinaryOp::apply`](crate::ast::BinaryOp::apply) to its evaluated
//! children, left first.
//!
//! ## Example
//!
//! ```
//! use arith_core::{ast::ExpressionBuilder, evaluator};
//! use bumpalo::Bump;
//!
//! let arena = Bump::new();
//! let b = ExpressionBuilder::new(&arena);
//! let expr = b.build(b.div(b.param("x"), b.constant(4.0))).unwrap();
//!
//! assert_eq!(evaluator::evaluate(&expr, &[2.0]).unwrap(), 0.5);
//! ```

mod eval;

#[cfg(test)]
mod eval_test;

use eval::Evaluator;

use crate::{ast::Expression, errors::Error};

/// Evaluate `expr` with `args` bound to its parameters, in declaration order.
pub fn evaluate(expr: &Expression<'_>, args: &[f64]) -> Result<f64, Error> {
    if args.len() != expr.arity() {
        return Err(Error::ArityMismatch {
            expected: expr.arity(),
            actual: args.len(),
        });
    }
    expr.visit(&mut Evaluator::new(args))
}
