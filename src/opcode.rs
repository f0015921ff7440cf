/// A raw 16-bit instruction word.
///
/// Behavior is cased on some combination of its nibbles:
/// - `(n, _, _, _)` broad categorization; applies to all opcodes
/// - `(_, _, _, n)` specific behavior within a category
/// - `(_, _, n, n)` more specific behavior within a category
/// - `(_, n, n, n)` some fixed function that takes no operands (e.g. CLS)
///
/// Nibbles not used to select the operation carry the operands:
/// - `(_, n, n, n)` a 12-bit address
/// - `(_, _, n, n)` a byte compared with or assigned to Vx
/// - `(_, n, _, _)` the register Vx or the register range V0..Vx
/// - `(_, _, n, _)` the register Vy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opcode(u16);

impl Opcode {
    /// Combines the two bytes at [PC, PC + 1] big-endian.
    pub fn from_bytes(high: u8, low: u8) -> Self {
        Opcode(u16::from(high) << 8 | u16::from(low))
    }

    pub fn raw(self) -> u16 {
        self.0
    }

    /// The component nibbles, most significant first.
    pub fn nibbles(self) -> (u8, u8, u8, u8) {
        (((self.0 & 0xF000) >> 12) as u8, self.x(), self.y(), self.n())
    }

    /// The second nibble. `[_x__]`
    pub fn x(self) -> u8 {
        ((self.0 & 0x0F00) >> 8) as u8
    }

    /// The third nibble. `[__y_]`
    pub fn y(self) -> u8 {
        ((self.0 & 0x00F0) >> 4) as u8
    }

    /// The fourth nibble. `[___n]`
    pub fn n(self) -> u8 {
        (self.0 & 0x000F) as u8
    }

    /// The least significant byte. `[__kk]`
    pub fn kk(self) -> u8 {
        (self.0 & 0x00FF) as u8
    }

    /// Everything but the most significant nibble. `[_nnn]`
    pub fn nnn(self) -> u16 {
        self.0 & 0x0FFF
    }
}

impl From<u16> for Opcode {
    fn from(raw: u16) -> Self {
        Opcode(raw)
    }
}

#[cfg(test)]
mod test_opcode {
    use super::*;

    #[test]
    fn test_from_bytes_is_big_endian() {
        assert_eq!(Opcode::from_bytes(0xAB, 0xCD), Opcode(0xABCD));
    }

    #[test]
    fn test_nibbles() {
        assert_eq!(Opcode(0xABCD).nibbles(), (0xA, 0xB, 0xC, 0xD));
    }

    #[test]
    fn test_x() {
        assert_eq!(Opcode(0xABCD).x(), 0xB);
    }

    #[test]
    fn test_y() {
        assert_eq!(Opcode(0xABCD).y(), 0xC);
    }

    #[test]
    fn test_n() {
        assert_eq!(Opcode(0xABCD).n(), 0xD);
    }

    #[test]
    fn test_kk() {
        assert_eq!(Opcode(0xABCD).kk(), 0xCD);
    }

    #[test]
    fn test_nnn() {
        assert_eq!(Opcode(0xABCD).nnn(), 0x0BCD);
    }
}
