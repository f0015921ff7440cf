use crate::error::VmError;
use crate::opcode::Opcode;
use crate::operations;
use crate::state::{Keys, State};

/// A fully decoded instruction carrying its operands.
///
/// Decoding the raw word into a sum type up front keeps the dispatch a
/// single exhaustive match; a word that fits no variant is reported by
/// [`Instruction::decode`] rather than half-executing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// 00E0 - clear the framebuffer
    Clear,
    /// 00EE - return from a subroutine
    Return,
    /// 1nnn - jump to nnn
    Jump { nnn: u16 },
    /// 2nnn - call the subroutine at nnn
    Call { nnn: u16 },
    /// 3xkk - skip the next instruction if Vx == kk
    SkipEq { x: u8, kk: u8 },
    /// 4xkk - skip the next instruction if Vx != kk
    SkipNe { x: u8, kk: u8 },
    /// 5xy0 - skip the next instruction if Vx == Vy
    SkipEqReg { x: u8, y: u8 },
    /// 6xkk - Vx = kk
    Load { x: u8, kk: u8 },
    /// 7xkk - Vx += kk, no carry flag
    Add { x: u8, kk: u8 },
    /// 8xy0 - Vx = Vy
    Move { x: u8, y: u8 },
    /// 8xy1 - Vx |= Vy
    Or { x: u8, y: u8 },
    /// 8xy2 - Vx &= Vy
    And { x: u8, y: u8 },
    /// 8xy3 - Vx ^= Vy
    Xor { x: u8, y: u8 },
    /// 8xy4 - Vx += Vy, VF = carry
    AddReg { x: u8, y: u8 },
    /// 8xy5 - Vx -= Vy, VF = NOT borrow
    Sub { x: u8, y: u8 },
    /// 8xy6 - Vx >>= 1, VF = the bit shifted out
    ShiftRight { x: u8 },
    /// 8xy7 - Vx = Vy - Vx, VF = NOT borrow
    SubNeg { x: u8, y: u8 },
    /// 8xyE - Vx <<= 1, VF = the bit shifted out
    ShiftLeft { x: u8 },
    /// 9xy0 - skip the next instruction if Vx != Vy
    SkipNeReg { x: u8, y: u8 },
    /// Annn - I = nnn
    LoadI { nnn: u16 },
    /// Bnnn - jump to nnn + V0
    JumpV0 { nnn: u16 },
    /// Cxkk - Vx = random byte & kk
    Random { x: u8, kk: u8 },
    /// Dxyn - draw the n-byte sprite at memory[I..] at (Vx, Vy)
    Draw { x: u8, y: u8, n: u8 },
    /// Ex9E - skip the next instruction if key Vx is pressed
    SkipKeyPressed { x: u8 },
    /// ExA1 - skip the next instruction if key Vx is not pressed
    SkipKeyNotPressed { x: u8 },
    /// Fx07 - Vx = DT
    ReadDelay { x: u8 },
    /// Fx0A - stall until a key is pressed, then Vx = that key
    WaitKey { x: u8 },
    /// Fx15 - DT = Vx
    SetDelay { x: u8 },
    /// Fx18 - ST = Vx
    SetSound { x: u8 },
    /// Fx1E - I += Vx
    AddI { x: u8 },
    /// Fx29 - I = the font sprite address for digit Vx
    LoadFont { x: u8 },
    /// Fx33 - store the decimal digits of Vx at memory[I..I+3]
    Bcd { x: u8 },
    /// Fx55 - store V0..=Vx at memory[I..]
    Store { x: u8 },
    /// Fx65 - load V0..=Vx from memory[I..]
    Read { x: u8 },
}

impl Instruction {
    /// Selects the instruction a raw word encodes.
    ///
    /// The top nibble picks the family; families 0x0, 0x8, 0xE and 0xF
    /// sub-dispatch on their low byte or nibble.
    pub fn decode(op: Opcode) -> Result<Self, VmError> {
        use Instruction::*;

        let (x, y) = (op.x(), op.y());
        let instruction = match op.nibbles() {
            (0x0, 0x0, 0xE, 0x0) => Clear,
            (0x0, 0x0, 0xE, 0xE) => Return,
            (0x1, ..) => Jump { nnn: op.nnn() },
            (0x2, ..) => Call { nnn: op.nnn() },
            (0x3, ..) => SkipEq { x, kk: op.kk() },
            (0x4, ..) => SkipNe { x, kk: op.kk() },
            (0x5, .., 0x0) => SkipEqReg { x, y },
            (0x6, ..) => Load { x, kk: op.kk() },
            (0x7, ..) => Add { x, kk: op.kk() },
            (0x8, .., 0x0) => Move { x, y },
            (0x8, .., 0x1) => Or { x, y },
            (0x8, .., 0x2) => And { x, y },
            (0x8, .., 0x3) => Xor { x, y },
            (0x8, .., 0x4) => AddReg { x, y },
            (0x8, .., 0x5) => Sub { x, y },
            (0x8, .., 0x6) => ShiftRight { x },
            (0x8, .., 0x7) => SubNeg { x, y },
            (0x8, .., 0xE) => ShiftLeft { x },
            (0x9, .., 0x0) => SkipNeReg { x, y },
            (0xA, ..) => LoadI { nnn: op.nnn() },
            (0xB, ..) => JumpV0 { nnn: op.nnn() },
            (0xC, ..) => Random { x, kk: op.kk() },
            (0xD, ..) => Draw { x, y, n: op.n() },
            (0xE, .., 0x9, 0xE) => SkipKeyPressed { x },
            (0xE, .., 0xA, 0x1) => SkipKeyNotPressed { x },
            (0xF, .., 0x0, 0x7) => ReadDelay { x },
            (0xF, .., 0x0, 0xA) => WaitKey { x },
            (0xF, .., 0x1, 0x5) => SetDelay { x },
            (0xF, .., 0x1, 0x8) => SetSound { x },
            (0xF, .., 0x1, 0xE) => AddI { x },
            (0xF, .., 0x2, 0x9) => LoadFont { x },
            (0xF, .., 0x3, 0x3) => Bcd { x },
            (0xF, .., 0x5, 0x5) => Store { x },
            (0xF, .., 0x6, 0x5) => Read { x },
            _ => return Err(VmError::UnknownOpcode { opcode: op.raw() }),
        };
        Ok(instruction)
    }

    /// Applies the instruction to a state snapshot, yielding the next one.
    ///
    /// Every instruction either moves PC or is the deliberate `WaitKey`
    /// stall, which leaves the snapshot untouched until a key is down.
    pub fn execute(self, state: &State, keys: &Keys) -> Result<State, VmError> {
        use Instruction::*;

        let next = match self {
            Clear => operations::clr(state),
            Return => return operations::rts(state),
            Jump { nnn } => operations::jump(nnn, state),
            Call { nnn } => return operations::call(nnn, state),
            SkipEq { x, kk } => operations::ske(x, kk, state),
            SkipNe { x, kk } => operations::skne(x, kk, state),
            SkipEqReg { x, y } => operations::skre(x, y, state),
            Load { x, kk } => operations::load(x, kk, state),
            Add { x, kk } => operations::add(x, kk, state),
            Move { x, y } => operations::mv(x, y, state),
            Or { x, y } => operations::or(x, y, state),
            And { x, y } => operations::and(x, y, state),
            Xor { x, y } => operations::xor(x, y, state),
            AddReg { x, y } => operations::addr(x, y, state),
            Sub { x, y } => operations::sub(x, y, state),
            ShiftRight { x } => operations::shr(x, state),
            SubNeg { x, y } => operations::subn(x, y, state),
            ShiftLeft { x } => operations::shl(x, state),
            SkipNeReg { x, y } => operations::skrne(x, y, state),
            LoadI { nnn } => operations::loadi(nnn, state),
            JumpV0 { nnn } => operations::jumpi(nnn, state),
            Random { x, kk } => operations::random(x, kk, state),
            Draw { x, y, n } => operations::draw(x, y, n, state),
            SkipKeyPressed { x } => operations::skpr(x, state, keys),
            SkipKeyNotPressed { x } => operations::skup(x, state, keys),
            ReadDelay { x } => operations::moved(x, state),
            WaitKey { x } => operations::keyd(x, state, keys),
            SetDelay { x } => operations::loads(x, state),
            SetSound { x } => operations::loadst(x, state),
            AddI { x } => operations::addi(x, state),
            LoadFont { x } => operations::ldspr(x, state),
            Bcd { x } => operations::bcd(x, state),
            Store { x } => operations::stor(x, state),
            Read { x } => operations::read(x, state),
        };
        Ok(next)
    }
}
