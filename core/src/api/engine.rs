//! The compilation engine.

use alloc::sync::Arc;

use super::{Backend, CompilationOptions, CompiledFunction, EngineOptions, Executor};
use crate::{
    String, Vec,
    ast::Expression,
    compiler::BytecodeCompiler,
    errors::Error,
    format,
    vm::{Code, Interpreter},
};

/// Compiles expressions and bytecode into [`CompiledFunction`]s.
///
/// The engine only holds configuration; it allocates nothing and keeps no
/// state between calls, so one engine can be shared freely.
///
/// # Example
///
/// ```
/// use arith_core::api::{Backend, CompilationOptions, Engine, EngineOptions};
/// use arith_core::ast::ExpressionBuilder;
/// use bumpalo::Bump;
///
/// let arena = Bump::new();
/// let b = ExpressionBuilder::new(&arena);
/// let expr = b.build(b.div(b.param("a"), b.param("b"))).unwrap();
///
/// let engine = Engine::new(EngineOptions::default());
/// let function = engine.compile(&expr).unwrap();
/// assert_eq!(function.backend(), Backend::Interpreter);
/// assert_eq!(function.call(&[1.0, 4.0]).unwrap(), 0.25);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Engine {
    options: EngineOptions,
}

impl Engine {
    pub fn new(options: EngineOptions) -> Self {
        Self { options }
    }

    /// Access the engine options.
    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Compile an expression with the engine's default options.
    pub fn compile(&self, expr: &Expression<'_>) -> Result<CompiledFunction, Error> {
        self.compile_with(expr, &self.options.default_compilation_options)
    }

    /// Compile an expression, overriding the engine's default options.
    ///
    /// The expression is lowered to bytecode once and the requested backend
    /// builds its executor from that bytecode.
    pub fn compile_with(
        &self,
        expr: &Expression<'_>,
        options: &CompilationOptions,
    ) -> Result<CompiledFunction, Error> {
        let code = BytecodeCompiler::compile(expr)?;
        let params = expr.params().iter().map(|name| String::from(*name)).collect();
        self.link(params, code, options.backend)
    }

    /// Build a callable directly from verified bytecode.
    ///
    /// Parameters are named `$0`, `$1`, ... since bytecode carries no names.
    pub fn load(&self, code: Code, options: &CompilationOptions) -> Result<CompiledFunction, Error> {
        let params = (0..code.arity()).map(|i| format!("${i}")).collect();
        self.link(params, code, options.backend)
    }

    fn link(
        &self,
        params: Vec<String>,
        code: Code,
        backend: Backend,
    ) -> Result<CompiledFunction, Error> {
        let code = Arc::new(code);
        let executor = executor_for(backend, &code)?;

        tracing::debug!(
            %backend,
            arity = code.arity(),
            instructions = code.len(),
            "compiled function"
        );
        Ok(CompiledFunction::new(params.into(), code, executor))
    }
}

fn executor_for(backend: Backend, code: &Arc<Code>) -> Result<Arc<dyn Executor>, Error> {
    match backend {
        Backend::Interpreter => Ok(Arc::new(Interpreter::new(Arc::clone(code)))),
        #[cfg(feature = "jit")]
        Backend::Native => Ok(Arc::new(crate::jit::compile(code)?)),
        #[cfg(not(feature = "jit"))]
        Backend::Native => Err(Error::BackendUnavailable { backend }),
    }
}
