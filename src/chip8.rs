use crate::constants::{MEM_SIZE, NUM_KEYS};
use crate::error::VmError;
use crate::instruction::Instruction;
use crate::opcode::Opcode;
use crate::state::{FrameBuffer, Keys, State};

/// # Chip-8
/// The assembled machine: one state snapshot plus the keypad.
///
/// Supplies interfaces for:
/// - loading roms
/// - pressing and releasing keys
/// - advancing the CPU one fetch-decode-execute cycle at a time
/// - advancing its timers, driven externally at 60Hz
/// - inspecting its frame buffer for rendering by some display
///
/// The machine never sleeps or blocks; the embedding loop decides how many
/// cycles to run per time slice and when to tick the timers.
pub struct Chip8 {
    state: State,
    pressed_keys: Keys,
    unknown_opcodes: u64,
}

impl Chip8 {
    pub fn new() -> Self {
        Chip8 {
            state: State::new(),
            pressed_keys: [false; NUM_KEYS],
            unknown_opcodes: 0,
        }
    }

    /// Restarts execution from scratch; callable at any time.
    pub fn reset(&mut self) {
        self.state.reset();
        self.pressed_keys = [false; NUM_KEYS];
        self.unknown_opcodes = 0;
    }

    /// Copies a ROM image into program memory.
    ///
    /// # Arguments
    /// * `rom` the program bytes, two bytes per instruction, high byte first
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<(), VmError> {
        self.state.load_program(rom)
    }

    /// A read-only view of the machine state.
    pub fn state(&self) -> &State {
        &self.state
    }

    /// The 64x32 framebuffer, one byte per pixel.
    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.state.frame_buffer
    }

    /// Returns the framebuffer if it changed since the last take,
    /// so a display can redraw only when something was drawn.
    pub fn take_frame(&mut self) -> Option<FrameBuffer> {
        if self.state.draw_flag {
            self.state.draw_flag = false;
            Some(self.state.frame_buffer)
        } else {
            None
        }
    }

    /// Set the pressed status of a key
    ///
    /// # Arguments
    /// * `key` the hexadecimal key 0x0..=0xF that was pressed
    pub fn key_press(&mut self, key: u8) {
        self.pressed_keys[(key & 0xF) as usize] = true;
    }

    /// Unset the pressed status of a key
    ///
    /// # Arguments
    /// * `key` the hexadecimal key 0x0..=0xF that was released
    pub fn key_release(&mut self, key: u8) {
        self.pressed_keys[(key & 0xF) as usize] = false;
    }

    /// How many unrecognized opcodes have been skipped so far.
    pub fn unknown_opcode_count(&self) -> u64 {
        self.unknown_opcodes
    }

    /// Runs exactly one fetch-decode-execute cycle.
    ///
    /// An opcode the decoder doesn't recognize is logged, counted, and
    /// skipped so malformed ROM bytes never halt emulation. Stack faults
    /// abort the cycle with the state left as it was.
    pub fn step(&mut self) -> Result<(), VmError> {
        let op = self.fetch();
        log::trace!(
            "{:04X} v{:02X?} i{:04X} pc{:04X}",
            op.raw(),
            self.state.v,
            self.state.i,
            self.state.pc
        );
        match Instruction::decode(op) {
            Ok(instruction) => {
                self.state = instruction.execute(&self.state, &self.pressed_keys)?;
            }
            Err(error) => {
                log::warn!("{} at pc {:#05X}; skipping", error, self.state.pc);
                self.unknown_opcodes += 1;
                self.state.pc += 0x2;
            }
        }
        Ok(())
    }

    /// Decrements both timers, clamped at zero.
    ///
    /// Owned by an external driver running at a fixed 60Hz cadence;
    /// `step` only ever reads the timers.
    pub fn tick_timers(&mut self) {
        self.state.delay_timer = self.state.delay_timer.saturating_sub(1);
        self.state.sound_timer = self.state.sound_timer.saturating_sub(1);
    }

    /// Reads the two bytes at [PC, PC + 1] as one big-endian opcode.
    /// Memory is stored as bytes but opcodes are 16 bits, so two
    /// subsequent bytes are combined.
    fn fetch(&self) -> Opcode {
        let pc = self.state.pc as usize % MEM_SIZE;
        Opcode::from_bytes(self.state.memory[pc], self.state.memory[(pc + 1) % MEM_SIZE])
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}
