//! Compiled functions.

use alloc::sync::Arc;
use core::fmt;

use super::Backend;
use crate::{String, errors::Error, vm::Code};

/// Turns argument vectors into results for one compiled program.
///
/// Implementations must not touch process-wide state, so a single executor
/// can be called from many threads at once.
pub trait Executor: Send + Sync + fmt::Debug {
    fn backend(&self) -> Backend;

    /// Run the program. Callers have already checked `args.len()` against
    /// the program's arity.
    fn execute(&self, args: &[f64]) -> Result<f64, Error>;
}

/// A callable of fixed arity produced by [`Engine`](super::Engine).
///
/// Compiled functions own their bytecode and executor and keep no reference
/// to the tree they came from. Cloning is cheap and clones share the
/// executor; the type is `Send + Sync`.
///
/// # Example
///
/// ```
/// use arith_core::{api::Engine, ast::ExpressionBuilder};
/// use bumpalo::Bump;
///
/// let function = {
///     let arena = Bump::new();
///     let b = ExpressionBuilder::new(&arena);
///     let expr = b.build(b.mul(b.param("x"), b.param("y"))).unwrap();
///     Engine::default().compile(&expr).unwrap()
/// };
/// // The arena and tree are gone; the function still works.
/// assert_eq!(function.call(&[6.0, 7.0]).unwrap(), 42.0);
/// assert!(function.call(&[6.0]).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct CompiledFunction {
    params: Arc<[String]>,
    code: Arc<Code>,
    executor: Arc<dyn Executor>,
}

impl CompiledFunction {
    pub(crate) fn new(params: Arc<[String]>, code: Arc<Code>, executor: Arc<dyn Executor>) -> Self {
        debug_assert_eq!(params.len(), code.arity());
        Self {
            params,
            code,
            executor,
        }
    }

    /// Call the function with exactly `arity()` arguments, in declaration
    /// order.
    ///
    /// A wrong argument count fails with [`Error::ArityMismatch`] before
    /// anything is computed.
    pub fn call(&self, args: &[f64]) -> Result<f64, Error> {
        if args.len() != self.arity() {
            return Err(Error::ArityMismatch {
                expected: self.arity(),
                actual: args.len(),
            });
        }
        self.executor.execute(args)
    }

    /// Convert into a closure whose arity is checked by the type system.
    ///
    /// Fails with [`Error::ArityMismatch`] when `N` differs from the
    /// function's arity, so the returned closure cannot be mis-called.
    ///
    /// ```
    /// # use arith_core::{api::Engine, ast::ExpressionBuilder};
    /// # use bumpalo::Bump;
    /// # let arena = Bump::new();
    /// # let b = ExpressionBuilder::new(&arena);
    /// # let expr = b.build(b.sub(b.param("a"), b.param("b"))).unwrap();
    /// let function = Engine::default().compile(&expr).unwrap();
    /// let sub = function.to_fn::<2>().unwrap();
    /// assert_eq!(sub([5.0, 3.0]).unwrap(), 2.0);
    /// assert!(function.to_fn::<3>().is_err());
    /// ```
    pub fn to_fn<const N: usize>(
        &self,
    ) -> Result<impl Fn([f64; N]) -> Result<f64, Error> + Send + Sync + 'static, Error> {
        if N != self.arity() {
            return Err(Error::ArityMismatch {
                expected: self.arity(),
                actual: N,
            });
        }
        let executor = Arc::clone(&self.executor);
        Ok(move |args: [f64; N]| executor.execute(&args))
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Parameter names, in argument order.
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// The bytecode this function executes.
    pub fn code(&self) -> &Code {
        &self.code
    }

    pub fn backend(&self) -> Backend {
        self.executor.backend()
    }
}
