//! Stack-machine instruction set.
//!
//! Programs are postfix: operands are pushed, operators pop two values and
//! push one.
//!
//! Stack effect notation: `[..., operand1, operand2] -> [..., result]`

use core::fmt;

use crate::{ast::BinaryOp, render::DisplayConstant};

/// Operation selector of an [`Instruction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    Add,
    Subtract,
    Multiply,
    Divide,
    LoadConstant,
    LoadParameter,
}

/// Immediate carried by a load instruction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operand {
    Constant(f64),
    Index(u32),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Instruction {
    /// Push a constant.
    /// Stack: [...] -> [..., value]
    LoadConstant(f64),

    /// Push argument `index`.
    /// Stack: [...] -> [..., args[index]]
    LoadParameter(u32),

    /// Stack: [..., a, b] -> [..., a + b]
    Add,

    /// Stack: [..., a, b] -> [..., a - b]
    Subtract,

    /// Stack: [..., a, b] -> [..., a * b]
    Multiply,

    /// IEEE-754 division; never traps.
    /// Stack: [..., a, b] -> [..., a / b]
    Divide,
}

impl Instruction {
    pub fn binary(op: BinaryOp) -> Self {
        match op {
            BinaryOp::Add => Instruction::Add,
            BinaryOp::Subtract => Instruction::Subtract,
            BinaryOp::Multiply => Instruction::Multiply,
            BinaryOp::Divide => Instruction::Divide,
        }
    }

    pub fn opcode(&self) -> Opcode {
        match self {
            Instruction::LoadConstant(_) => Opcode::LoadConstant,
            Instruction::LoadParameter(_) => Opcode::LoadParameter,
            Instruction::Add => Opcode::Add,
            Instruction::Subtract => Opcode::Subtract,
            Instruction::Multiply => Opcode::Multiply,
            Instruction::Divide => Opcode::Divide,
        }
    }

    /// Arithmetic instructions carry no operand.
    pub fn operand(&self) -> Option<Operand> {
        match *self {
            Instruction::LoadConstant(value) => Some(Operand::Constant(value)),
            Instruction::LoadParameter(index) => Some(Operand::Index(index)),
            _ => None,
        }
    }

    pub fn binary_op(&self) -> Option<BinaryOp> {
        match self {
            Instruction::Add => Some(BinaryOp::Add),
            Instruction::Subtract => Some(BinaryOp::Subtract),
            Instruction::Multiply => Some(BinaryOp::Multiply),
            Instruction::Divide => Some(BinaryOp::Divide),
            _ => None,
        }
    }

    /// Values popped before the instruction pushes its single result.
    pub fn pops(&self) -> usize {
        match self {
            Instruction::LoadConstant(_) | Instruction::LoadParameter(_) => 0,
            _ => 2,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::LoadConstant(value) => write!(f, "ldc {}", DisplayConstant(*value)),
            Instruction::LoadParameter(index) => write!(f, "ldarg {}", index),
            Instruction::Add => f.write_str("add"),
            Instruction::Subtract => f.write_str("sub"),
            Instruction::Multiply => f.write_str("mul"),
            Instruction::Divide => f.write_str("div"),
        }
    }
}
