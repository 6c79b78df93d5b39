//! Public API for compiling and calling arithmetic expressions.
//!
//! An [`Engine`] turns a validated [`Expression`](crate::ast::Expression)
//! into a [`CompiledFunction`]. Lowering always goes through bytecode; the
//! [`Backend`] chosen in [`CompilationOptions`] decides whether that
//! bytecode is interpreted or translated to machine code.
//!
//! # Example
//!
//! ```
//! use arith_core::api::{CompilationOptions, Engine, EngineOptions};
//! use arith_core::ast::ExpressionBuilder;
//! use bumpalo::Bump;
//!
//! let arena = Bump::new();
//! let b = ExpressionBuilder::new(&arena);
//! let expr = b.build(b.add(b.param("x"), b.constant(1.0))).unwrap();
//!
//! let engine = Engine::new(EngineOptions::default());
//! let function = engine
//!     .compile_with(&expr, &CompilationOptions::default())
//!     .unwrap();
//! assert_eq!(function.call(&[41.0]).unwrap(), 42.0);
//! ```

pub mod compiled;
pub mod engine;
pub mod options;

pub use compiled::{CompiledFunction, Executor};
pub use engine::Engine;
pub use options::{Backend, CompilationOptions, EngineOptions};
