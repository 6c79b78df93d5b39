use crate::{ToString, Vec, errors::Error, vm::Instruction};

/// A verified postfix program.
///
/// Every `Code` satisfies the stack-balance invariant: running it never pops
/// an empty stack and leaves exactly one value behind. It also records the
/// exact maximum stack depth, so executors can size their stack once.
///
/// `Code` owns its instructions and knows nothing about the tree it was
/// emitted from.
#[derive(Clone, PartialEq)]
pub struct Code {
    instructions: Vec<Instruction>,
    arity: usize,
    max_stack_size: usize,
}

impl Code {
    /// Verify a hand-built instruction sequence for a function of `arity`
    /// parameters.
    pub fn from_instructions(instructions: Vec<Instruction>, arity: usize) -> Result<Self, Error> {
        let max_stack_size = verify(&instructions, arity)?;
        Ok(Self {
            instructions,
            arity,
            max_stack_size,
        })
    }

    /// Used by the emitter, which tracks depth itself while emitting.
    pub(crate) fn from_parts(
        instructions: Vec<Instruction>,
        arity: usize,
        max_stack_size: usize,
    ) -> Self {
        debug_assert_eq!(verify(&instructions, arity), Ok(max_stack_size));
        Self {
            instructions,
            arity,
            max_stack_size,
        }
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn max_stack_size(&self) -> usize {
        self.max_stack_size
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Stack depth after each instruction.
    pub fn stack_depths(&self) -> Vec<usize> {
        let mut depth = 0;
        self.instructions
            .iter()
            .map(|instruction| {
                depth = depth - instruction.pops() + 1;
                depth
            })
            .collect()
    }
}

/// Simulate `instructions` on an operand stack, returning the maximum depth.
fn verify(instructions: &[Instruction], arity: usize) -> Result<usize, Error> {
    if instructions.is_empty() {
        return Err(Error::MalformedBytecode {
            position: 0,
            reason: "program is empty",
        });
    }

    let mut depth = 0usize;
    let mut max_depth = 0usize;
    for (position, instruction) in instructions.iter().enumerate() {
        if let Instruction::LoadParameter(index) = *instruction {
            if index as usize >= arity {
                return Err(Error::InvalidParameterIndex { index, len: arity });
            }
        }
        let pops = instruction.pops();
        if depth < pops {
            return Err(Error::MalformedBytecode {
                position,
                reason: "operand stack underflow",
            });
        }
        depth = depth - pops + 1;
        max_depth = max_depth.max(depth);
    }

    if depth != 1 {
        return Err(Error::MalformedBytecode {
            position: instructions.len(),
            reason: "program must leave exactly one value on the stack",
        });
    }
    Ok(max_depth)
}

impl core::fmt::Debug for Code {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "Code {{")?;
        writeln!(f, "  arity: {}", self.arity)?;
        writeln!(f, "  max_stack_size: {}", self.max_stack_size)?;
        writeln!(f, "  instructions:")?;
        for (addr, (instr, depth)) in self
            .instructions
            .iter()
            .zip(self.stack_depths())
            .enumerate()
        {
            writeln!(f, "    {:4}  {:<12} ; depth {}", addr, instr.to_string(), depth)?;
        }
        write!(f, "}}")
    }
}
