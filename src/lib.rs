//! A CHIP-8 virtual machine core: the machine state model and the
//! fetch-decode-execute engine, with no I/O of its own.
//!
//! Rendering, input mapping, ROM storage, and the timing loop belong to
//! the embedder; the machine exposes [`Chip8::step`] for the cycle loop,
//! [`Chip8::tick_timers`] for a 60Hz driver, key press/release for an
//! input adapter, and the framebuffer for a display.

pub use crate::chip8::Chip8;
pub use crate::error::VmError;
pub use crate::instruction::Instruction;
pub use crate::opcode::Opcode;
pub use crate::state::{FrameBuffer, Keys, State};

mod chip8;
pub mod constants;
mod error;
mod instruction;
mod opcode;
mod operations;
mod state;
