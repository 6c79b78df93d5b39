//! Configuration options for the compilation engine.

use core::fmt;

/// Which executor turns bytecode into a callable.
///
/// Both backends implement the same contract and produce bit-identical
/// results; `Native` only trades compile time for call speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Backend {
    /// Portable stack-machine interpreter.
    #[default]
    Interpreter,
    /// Cranelift-generated machine code (requires the `jit` feature).
    Native,
}

impl Backend {
    /// Whether this build can produce functions for the backend.
    pub fn is_available(self) -> bool {
        match self {
            Backend::Interpreter => true,
            Backend::Native => cfg!(feature = "jit"),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Interpreter => f.write_str("interpreter"),
            Backend::Native => f.write_str("native"),
        }
    }
}

/// Configuration options for compilation.
///
/// # Example
///
/// ```
/// use arith_core::api::{Backend, CompilationOptions};
///
/// let options = CompilationOptions {
///     backend: Backend::Interpreter,
/// };
/// assert_eq!(options.backend, CompilationOptions::default().backend);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CompilationOptions {
    /// Default: `Backend::Interpreter`
    pub backend: Backend,
}

/// Configuration options for the engine.
///
/// These set the defaults for compilation, which can be overridden on a
/// per-call basis with [`Engine::compile_with`](super::Engine::compile_with).
#[derive(Debug, Clone, Default)]
pub struct EngineOptions {
    pub default_compilation_options: CompilationOptions,
}
