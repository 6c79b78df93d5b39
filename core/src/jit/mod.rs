//! Native backend: translates verified bytecode to machine code with
//! Cranelift.
//!
//! The operand stack disappears during translation. Each instruction's
//! result becomes an SSA value and the stack is simulated at compile time,
//! so the generated function is straight-line floating-point code of the
//! shape `extern "C" fn(args: *const f64) -> f64`.
//!
//! Every [`NativeFunction`] owns its own `JITModule`, and dropping the
//! function frees the generated code.

use core::{
    fmt,
    mem::{self, ManuallyDrop},
    ops::{Deref, DerefMut},
};

use cranelift::prelude::*;
use cranelift_jit::{JITBuilder, JITModule};
use cranelift_module::{Linkage, Module};

use crate::{
    ToString, Vec,
    api::{Backend, Executor},
    ast::BinaryOp,
    errors::Error,
    vm::{Code, Instruction},
};

type Entry = unsafe extern "C" fn(*const f64) -> f64;

/// Machine code for one program.
pub struct NativeFunction {
    entry: Entry,
    arity: usize,
    // Keeps `entry` alive; must be dropped after the last call.
    _module: OwnedModule,
}

// SAFETY: the generated code reads only its argument slice and touches no
// shared state. The module is never accessed again after finalization
// except to free it on drop, which requires ownership.
unsafe impl Send for NativeFunction {}
unsafe impl Sync for NativeFunction {}

impl NativeFunction {
    pub fn arity(&self) -> usize {
        self.arity
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFunction")
            .field("entry", &(self.entry as *const u8))
            .field("arity", &self.arity)
            .finish()
    }
}

impl Executor for NativeFunction {
    fn backend(&self) -> Backend {
        Backend::Native
    }

    fn execute(&self, args: &[f64]) -> Result<f64, Error> {
        // The generated code reads `arity` values unchecked.
        if args.len() != self.arity {
            return Err(Error::ArityMismatch {
                expected: self.arity,
                actual: args.len(),
            });
        }
        // SAFETY: `entry` was finalized by the module we own and `args`
        // holds exactly the number of values the code loads.
        Ok(unsafe { (self.entry)(args.as_ptr()) })
    }
}

struct OwnedModule(ManuallyDrop<JITModule>);

impl Deref for OwnedModule {
    type Target = JITModule;

    fn deref(&self) -> &JITModule {
        &self.0
    }
}

impl DerefMut for OwnedModule {
    fn deref_mut(&mut self) -> &mut JITModule {
        &mut self.0
    }
}

impl Drop for OwnedModule {
    fn drop(&mut self) {
        // SAFETY: the only function pointer into this module lives in the
        // `NativeFunction` being dropped.
        unsafe { ManuallyDrop::take(&mut self.0).free_memory() }
    }
}

/// Compile verified bytecode into a [`NativeFunction`].
pub fn compile(code: &Code) -> Result<NativeFunction, Error> {
    let mut flags = settings::builder();
    flags.set("opt_level", "speed").map_err(codegen_error)?;
    let isa = cranelift_native::builder()
        .map_err(codegen_error)?
        .finish(settings::Flags::new(flags))
        .map_err(codegen_error)?;

    let mut module = OwnedModule(ManuallyDrop::new(JITModule::new(JITBuilder::with_isa(
        isa,
        cranelift_module::default_libcall_names(),
    ))));

    let pointer = module.target_config().pointer_type();
    let mut signature = module.make_signature();
    signature.params.push(AbiParam::new(pointer));
    signature.returns.push(AbiParam::new(types::F64));

    let id = module
        .declare_function("expression", Linkage::Local, &signature)
        .map_err(codegen_error)?;

    let mut ctx = module.make_context();
    ctx.func.signature = signature;
    let mut builder_ctx = FunctionBuilderContext::new();
    translate(code, FunctionBuilder::new(&mut ctx.func, &mut builder_ctx))?;

    module.define_function(id, &mut ctx).map_err(codegen_error)?;
    module.clear_context(&mut ctx);
    module.finalize_definitions().map_err(codegen_error)?;

    let entry = module.get_finalized_function(id);
    // SAFETY: the function was declared with the signature of `Entry`.
    let entry = unsafe { mem::transmute::<*const u8, Entry>(entry) };

    tracing::debug!(
        instructions = code.len(),
        arity = code.arity(),
        "generated native code"
    );
    Ok(NativeFunction {
        entry,
        arity: code.arity(),
        _module: module,
    })
}

fn translate(code: &Code, mut builder: FunctionBuilder<'_>) -> Result<(), Error> {
    let block = builder.create_block();
    builder.append_block_params_for_function_params(block);
    builder.switch_to_block(block);
    builder.seal_block(block);
    let args = builder.block_params(block)[0];

    let mut stack: Vec<Value> = Vec::with_capacity(code.max_stack_size());
    for (position, instruction) in code.instructions().iter().enumerate() {
        let value = match *instruction {
            Instruction::LoadConstant(value) => builder.ins().f64const(value),
            Instruction::LoadParameter(index) => {
                let offset = (index as usize)
                    .checked_mul(mem::size_of::<f64>())
                    .and_then(|offset| i32::try_from(offset).ok())
                    .ok_or_else(|| Error::Codegen {
                        message: "parameter offset does not fit in 32 bits".to_string(),
                    })?;
                builder
                    .ins()
                    .load(types::F64, MemFlags::trusted(), args, offset)
            }
            Instruction::Add => binary(&mut builder, &mut stack, position, BinaryOp::Add)?,
            Instruction::Subtract => {
                binary(&mut builder, &mut stack, position, BinaryOp::Subtract)?
            }
            Instruction::Multiply => {
                binary(&mut builder, &mut stack, position, BinaryOp::Multiply)?
            }
            Instruction::Divide => binary(&mut builder, &mut stack, position, BinaryOp::Divide)?,
        };
        stack.push(value);
    }

    let result = pop(&mut stack, code.len())?;
    builder.ins().return_(&[result]);
    builder.finalize();
    Ok(())
}

fn binary(
    builder: &mut FunctionBuilder<'_>,
    stack: &mut Vec<Value>,
    position: usize,
    op: BinaryOp,
) -> Result<Value, Error> {
    let b = pop(stack, position)?;
    let a = pop(stack, position)?;
    Ok(match op {
        BinaryOp::Add => builder.ins().fadd(a, b),
        BinaryOp::Subtract => builder.ins().fsub(a, b),
        BinaryOp::Multiply => builder.ins().fmul(a, b),
        BinaryOp::Divide => builder.ins().fdiv(a, b),
    })
}

fn pop(stack: &mut Vec<Value>, position: usize) -> Result<Value, Error> {
    stack.pop().ok_or(Error::MalformedBytecode {
        position,
        reason: "operand stack underflow",
    })
}

fn codegen_error(err: impl fmt::Display) -> Error {
    Error::Codegen {
        message: err.to_string(),
    }
}
