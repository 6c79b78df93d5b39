//! Bytecode compiler for arithmetic expressions.
//!
//! This module lowers an [`Expression`](crate::ast::Expression) into a flat
//! postfix instruction sequence. The compiler is a
//! [`NodeVisitor`](crate::visitor::NodeVisitor): dispatch hands it nodes in
//! postorder and it appends one instruction per node.
//!
//! ## Design
//!
//! - Structure-preserving lowering: no folding, reordering or simplification
//! - Tracks stack depth precisely, so `Code::max_stack_size` is exact
//! - Parameters are emitted by index; names were resolved when the tree was
//!   built

mod bytecode;


pub use bytecode::BytecodeCompiler;
