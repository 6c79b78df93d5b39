use alloc::sync::Arc;

use super::instruction_set::Instruction;

use crate::{
    api::{Backend, Executor},
    ast::BinaryOp,
    errors::Error,
    vm::{Code, Stack},
};

/// Stack-machine interpreter for a single [`Code`].
pub struct VM<'c> {
    code: &'c Code,
    stack: Stack<f64>,
}

impl<'c> VM<'c> {
    pub fn new(code: &'c Code) -> Self {
        VM {
            code,
            stack: Stack::new(code.max_stack_size()),
        }
    }

    /// Run `code` once with a fresh VM.
    pub fn execute(code: &Code, args: &[f64]) -> Result<f64, Error> {
        VM::new(code).run(args)
    }

    /// Run the program on `args`, which must match the code's arity.
    ///
    /// Binary instructions pop `b` (pushed last) and then `a`, and push
    /// `a op b`, so operand order is the order the emitter recorded.
    pub fn run(&mut self, args: &[f64]) -> Result<f64, Error> {
        if args.len() != self.code.arity() {
            return Err(Error::ArityMismatch {
                expected: self.code.arity(),
                actual: args.len(),
            });
        }

        self.stack.clear();
        for (position, instruction) in self.code.instructions().iter().enumerate() {
            tracing::trace!(position, %instruction, depth = self.stack.len(), "execute");

            use Instruction::*;
            match *instruction {
                LoadConstant(value) => {
                    self.stack.push(value);
                }
                LoadParameter(index) => {
                    let value = args.get(index as usize).copied().ok_or(
                        Error::InvalidParameterIndex {
                            index,
                            len: args.len(),
                        },
                    )?;
                    self.stack.push(value);
                }
                Add => self.binary(position, BinaryOp::Add)?,
                Subtract => self.binary(position, BinaryOp::Subtract)?,
                Multiply => self.binary(position, BinaryOp::Multiply)?,
                Divide => self.binary(position, BinaryOp::Divide)?,
            }
        }

        let result = self.pop(self.code.len())?;
        debug_assert!(self.stack.is_empty(), "values left on the stack");
        Ok(result)
    }

    #[inline]
    fn binary(&mut self, position: usize, op: BinaryOp) -> Result<(), Error> {
        let b = self.pop(position)?;
        let a = self.pop(position)?;
        self.stack.push(op.apply(a, b));
        Ok(())
    }

    #[inline]
    fn pop(&mut self, position: usize) -> Result<f64, Error> {
        self.stack.pop().ok_or(Error::MalformedBytecode {
            position,
            reason: "operand stack underflow",
        })
    }
}

/// The portable backend: interprets shared bytecode on every call.
#[derive(Debug, Clone)]
pub struct Interpreter {
    code: Arc<Code>,
}

impl Interpreter {
    pub fn new(code: Arc<Code>) -> Self {
        Self { code }
    }
}

impl Executor for Interpreter {
    fn backend(&self) -> Backend {
        Backend::Interpreter
    }

    fn execute(&self, args: &[f64]) -> Result<f64, Error> {
        VM::execute(&self.code, args)
    }
}
