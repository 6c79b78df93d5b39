#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]

//! Arithmetic expression trees, their postfix bytecode, and the backends
//! that execute it.
//!
//! The pipeline is:
//!
//! 1. Build an [`Expression`] with [`ast::ExpressionBuilder`]. Parameter
//!    names are resolved to indices here, once.
//! 2. Walk it with any [`visitor::NodeVisitor`]: the prefix renderer, the
//!    reference evaluator and the bytecode compiler are all visitors.
//! 3. Hand the resulting [`vm::Code`] to an [`api::Engine`], which wraps
//!    the interpreter or (with the `jit` feature) native code in a
//!    [`CompiledFunction`].

extern crate alloc;

// Re-export for convenience so other modules don't need alloc:: prefix
#[allow(unused_imports)]
pub(crate) use alloc::{boxed::Box, format, string::String, string::ToString, vec, vec::Vec};

pub mod algebra;
pub mod api;
pub mod ast;
pub mod compiler;
pub mod errors;
pub mod evaluator;
#[cfg(feature = "jit")]
pub mod jit;
pub mod render;
pub mod visitor;
pub mod vm;

pub use api::{Backend, CompilationOptions, CompiledFunction, Engine, EngineOptions};
pub use ast::{BinaryOp, Expression, ExpressionBuilder, Node};
pub use errors::Error;

/// Test utilities for enabling logging in tests
#[cfg(test)]
pub mod test_utils {
    /// Initialize tracing subscriber for tests with DEBUG level
    /// Call this at the start of tests where you want to see logging output
    ///
    /// # Example
    /// ```ignore
    /// #[test]
    /// fn test_emission() {
    ///     test_utils::init_test_logging();
    ///     // ... your test code
    /// }
    /// ```
    pub fn init_test_logging() {
        use tracing_subscriber::{EnvFilter, fmt};

        // Try to initialize, ignore error if already initialized
        let _ = fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .with_test_writer()
            .try_init();
    }
}
