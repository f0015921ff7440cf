use crate::constants::{
    DISPLAY_HEIGHT, DISPLAY_WIDTH, FONT_SET, MAX_PROGRAM_SIZE, MEM_SIZE, NUM_KEYS, PROG_START,
    STACK_DEPTH,
};
use crate::error::VmError;

/// The framebuffer is indexed as [y][x]; each cell is 0 or 1.
pub type FrameBuffer = [[u8; DISPLAY_WIDTH]; DISPLAY_HEIGHT];

/// Pressed status of the 16 hexadecimal keys, written by the input adapter.
pub type Keys = [bool; NUM_KEYS];

/// A snapshot of the machine's internal state
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) doubles as the carry/borrow/collision flag
/// - (i) a 16-bit memory address register
///
/// Counter
/// - (pc) a 16-bit program counter, starting at 0x200
///
/// Pointer
/// - (sp) an 8-bit stack pointer; points at the next free slot
///
/// Timers
/// - 2 8-bit timers (delay & sound), decremented by an external 60Hz driver
///
/// ## Memory
/// - a 16 slot stack of return addresses
/// - 4096 bytes of addressable memory; 0x000..0x050 holds the font sheet
///   and 0x200.. is program space
/// - a 64x32 one-bit-per-pixel frame buffer, one byte per pixel
#[derive(Copy, Clone)]
pub struct State {
    pub v: [u8; 16],
    pub i: u16,
    pub pc: u16,
    pub sp: u8,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub stack: [u16; STACK_DEPTH],
    pub memory: [u8; MEM_SIZE],
    pub frame_buffer: FrameBuffer,
    pub draw_flag: bool,
}

impl State {
    pub fn new() -> Self {
        // 0x000..0x050 is reserved for the font sheet
        let mut memory = [0; MEM_SIZE];
        memory[0..FONT_SET.len()].copy_from_slice(&FONT_SET);

        State {
            v: [0; 16],
            i: 0,
            pc: PROG_START as u16,
            sp: 0,
            delay_timer: 0,
            sound_timer: 0,
            stack: [0; STACK_DEPTH],
            memory,
            frame_buffer: [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
            draw_flag: false,
        }
    }

    /// Restores the freshly-initialized image; idempotent.
    pub fn reset(&mut self) {
        *self = State::new();
    }

    /// Copies a program into memory starting at 0x200.
    ///
    /// Fails without touching memory if the program would overrun the
    /// address space; exactly `MAX_PROGRAM_SIZE` bytes still fit.
    pub fn load_program(&mut self, bytes: &[u8]) -> Result<(), VmError> {
        if bytes.len() > MAX_PROGRAM_SIZE {
            return Err(VmError::ProgramTooLarge {
                size: bytes.len(),
                max: MAX_PROGRAM_SIZE,
            });
        }
        self.memory[PROG_START..PROG_START + bytes.len()].copy_from_slice(bytes);
        Ok(())
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}
