//! Error type shared by every stage of the pipeline.
//!
//! Errors fall into three groups:
//!
//! - **Tree errors** (`UnsupportedNodeKind`, `InvalidParameterIndex`,
//!   `DuplicateParameter`): the tree handed over by the producer violates the
//!   expression contract. Raised at construction or dispatch time.
//! - **Call errors** (`ArityMismatch`): a compiled function was invoked with
//!   the wrong number of arguments. Raised before any computation happens.
//! - **Backend errors** (`MalformedBytecode`, `BackendUnavailable`,
//!   `Codegen`): a hand-built instruction sequence is unbalanced, or native
//!   code generation is unavailable or failed.
//!
//! Floating-point edge cases (division by zero, overflow, NaN) are never
//! errors; they are ordinary IEEE-754 results.

use crate::String;
use crate::api::Backend;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("unsupported node kind `{kind}`")]
    UnsupportedNodeKind { kind: String },

    #[error("parameter index {index} is out of bounds for {len} declared parameter(s)")]
    InvalidParameterIndex { index: u32, len: usize },

    #[error("parameter `{name}` is declared more than once")]
    DuplicateParameter { name: String },

    #[error("expected {expected} argument(s), got {actual}")]
    ArityMismatch { expected: usize, actual: usize },

    #[error("malformed bytecode at instruction {position}: {reason}")]
    MalformedBytecode { position: usize, reason: &'static str },

    #[error("the {backend} backend is not available in this build")]
    BackendUnavailable { backend: Backend },

    #[error("native code generation failed: {message}")]
    Codegen { message: String },
}

impl Error {
    /// Short machine-friendly name of the error variant.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Error::UnsupportedNodeKind { .. } => "unsupported_node_kind",
            Error::InvalidParameterIndex { .. } => "invalid_parameter_index",
            Error::DuplicateParameter { .. } => "duplicate_parameter",
            Error::ArityMismatch { .. } => "arity_mismatch",
            Error::MalformedBytecode { .. } => "malformed_bytecode",
            Error::BackendUnavailable { .. } => "backend_unavailable",
            Error::Codegen { .. } => "codegen",
        }
    }
}
