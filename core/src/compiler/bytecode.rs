//! Bytecode compiler implementation.

use crate::{
    Vec,
    ast::{BinaryOp, Expression},
    errors::Error,
    visitor::NodeVisitor,
    vm::{Code, Instruction},
};

/// Bytecode compiler that lowers expressions into postfix instructions.
///
/// The compiler implements [`NodeVisitor`] with `Output = ()`: each handler
/// appends its instruction, and because dispatch finishes both children
/// before calling a binary handler, the result is left, right, operator.
/// It tracks the operand stack precisely to set an exact `max_stack_size`.
pub struct BytecodeCompiler {
    /// Bytecode instructions
    instructions: Vec<Instruction>,

    /// Number of declared parameters
    arity: usize,

    /// Current stack depth during compilation
    current_stack_depth: usize,

    /// Maximum stack depth observed
    max_stack_size: usize,
}

impl BytecodeCompiler {
    /// Create a new bytecode compiler for a function of `arity` parameters.
    pub fn new(arity: usize) -> Self {
        Self {
            instructions: Vec::new(),
            arity,
            current_stack_depth: 0,
            max_stack_size: 0,
        }
    }

    /// Finalize compilation and return the bytecode.
    pub fn finalize(self) -> Code {
        debug_assert_eq!(self.current_stack_depth, 1, "Unbalanced stack");
        Code::from_parts(self.instructions, self.arity, self.max_stack_size)
    }

    /// Convenience method to compile an expression in one call.
    pub fn compile(expr: &Expression<'_>) -> Result<Code, Error> {
        let mut compiler = Self::new(expr.arity());
        expr.visit(&mut compiler)?;
        let code = compiler.finalize();

        tracing::debug!(
            instructions = code.len(),
            max_stack_size = code.max_stack_size(),
            arity = code.arity(),
            "emitted bytecode"
        );
        Ok(code)
    }

    // === Stack Management ===

    /// Push a value onto the stack (increases depth by 1).
    fn push_stack(&mut self) {
        self.current_stack_depth += 1;
        if self.current_stack_depth > self.max_stack_size {
            self.max_stack_size = self.current_stack_depth;
        }
    }

    /// Pop N values from the stack.
    fn pop_stack_n(&mut self, n: usize) {
        debug_assert!(
            self.current_stack_depth >= n,
            "Stack underflow: trying to pop {} but depth is {}",
            n,
            self.current_stack_depth
        );
        self.current_stack_depth -= n;
    }

    // === Instruction Emission ===

    fn emit(&mut self, instruction: Instruction) {
        self.pop_stack_n(instruction.pops());
        self.push_stack();
        self.instructions.push(instruction);
    }
}

impl<'a> NodeVisitor<'a> for BytecodeCompiler {
    type Output = ();

    fn visit_constant(&mut self, value: f64) {
        self.emit(Instruction::LoadConstant(value));
    }

    fn visit_parameter(&mut self, index: u32, _name: &'a str) {
        self.emit(Instruction::LoadParameter(index));
    }

    fn visit_binary(&mut self, op: BinaryOp, _left: (), _right: ()) {
        self.emit(Instruction::binary(op));
    }
}
