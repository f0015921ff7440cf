use thiserror::Error;

/// Errors surfaced by ROM loading and cycle execution.
///
/// Unknown opcodes are produced by the decoder but swallowed by
/// [`Chip8::step`](crate::Chip8::step), which skips them instead of
/// halting; the stack errors are fatal to the cycle that caused them.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum VmError {
    #[error("program is {size} bytes, maximum is {max} bytes")]
    ProgramTooLarge { size: usize, max: usize },

    #[error("unknown opcode {opcode:#06X}")]
    UnknownOpcode { opcode: u16 },

    #[error("call stack overflow: deeper than {depth} nested calls")]
    StackOverflow { depth: usize },

    #[error("call stack underflow: return with no caller")]
    StackUnderflow,
}
