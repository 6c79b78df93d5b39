//! Stack-machine bytecode and its interpreter.

mod code;
mod instruction_set;
mod runtime;
mod stack;

pub use code::Code;
pub use instruction_set::{Instruction, Opcode, Operand};
pub use runtime::{Interpreter, VM};

pub(crate) use stack::Stack;
