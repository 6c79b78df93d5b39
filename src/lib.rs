//! Arith - compile arithmetic expression trees into callable functions
//!
//! # Overview
//!
//! An expression is a tree of constants, named parameters and the four
//! binary operators. Arith lowers it to postfix bytecode and runs that
//! bytecode either on a stack-machine interpreter or, with the `jit`
//! feature, as Cranelift-generated machine code. Both backends give the
//! same IEEE-754 results.
//!
//! # Quick Start
//!
//! ```
//! use arith::{Engine, ExpressionBuilder};
//! use bumpalo::Bump;
//!
//! let arena = Bump::new();
//! let b = ExpressionBuilder::new(&arena);
//! // a + b - c * d / 2 + e * 3
//! let root = b.add(
//!     b.sub(
//!         b.add(b.param("a"), b.param("b")),
//!         b.div(b.mul(b.param("c"), b.param("d")), b.constant(2.0)),
//!     ),
//!     b.mul(b.param("e"), b.constant(3.0)),
//! );
//! let expr = b.build(root).unwrap();
//!
//! assert_eq!(
//!     expr.to_string(),
//!     "add(sub(add(a, b), div(mul(c, d), 2)), mul(e, 3))"
//! );
//!
//! let function = Engine::default().compile(&expr).unwrap();
//! assert_eq!(function.call(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap(), 12.0);
//! ```
//!
//! # Errors
//!
//! Every failure is an [`Error`]. [`ErrorReport`] wraps one as a
//! [`miette::Diagnostic`] with a stable code and a help line, and the
//! `render_error*` functions print it.

mod error_renderer;
pub mod samples;

// Re-export public API from arith_core
pub use arith_core::api::{
    Backend, CompilationOptions, CompiledFunction, Engine, EngineOptions, Executor,
};
pub use arith_core::ast::{BinaryOp, Expression, ExpressionBuilder, Node};
pub use arith_core::errors::Error;
pub use arith_core::vm::{Code, Instruction};

// Re-export modules for lower-level access
#[cfg(feature = "jit")]
pub use arith_core::jit;
pub use arith_core::{algebra, compiler, evaluator, render, visitor, vm};

pub use error_renderer::{
    ErrorReport, render_error, render_error_to, render_error_to_string,
    render_error_to_string_no_color,
};
