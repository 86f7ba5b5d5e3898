/// # Opcodes
///
/// Chip-8 opcodes are 16 bits each. Their behavior is cased on some combination of:
/// - `(n, _, _, _)` broad categorization; applies to all opcodes
/// - `(_, _, _, n)` specific behavior within a category
/// - `(_, _, n, n)` more specific behavior within a category
/// - `(_, n, n, n)` some fixed function that doesn't require variables (e.g. CLS; clear screen)
///
/// Nibbles not used to determine the operation often (but not always) carry important data.
/// - `(_, n, n, n)` represent a 12-bit address
/// - `(_, _, n, n)` encodes some data that is assigned to and/or compared with Vx
/// - `(_, n, _, _)` refers either to the register Vx or a range of registers V0..Vx
/// - `(_, _, n, _)` refers to the the register Vy
pub trait Opcode {
    /// The Opcode's second nibble.
    /// `[_x__]`
    fn x(&self) -> u8;

    /// The Opcode's third nibble.
    /// `[__y_]`
    fn y(&self) -> u8;

    /// The Opcode's fourth nibble.
    /// `[___n]`
    fn n(&self) -> u8;

    /// The Opcode's least significant byte.
    /// `[__kk]`
    fn kk(&self) -> u8;

    /// The Opcode's without its most significant nibble.
    /// `[_nnn]`
    fn addr(&self) -> u16;
}

impl Opcode for u16 {
    fn x(&self) -> u8 {
        ((self >> 8) & 0x000F) as u8
    }

    fn y(&self) -> u8 {
        ((self >> 4) & 0x000F) as u8
    }

    fn n(&self) -> u8 {
        (self & 0x000F) as u8
    }

    fn kk(&self) -> u8 {
        (self & 0x00FF) as u8
    }

    fn addr(&self) -> u16 {
        self & 0x0FFF
    }
}

/// The operands of a single fetched opcode.
///
/// Recomputed every cycle; handlers only ever see it by reference.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Fields {
    pub opcode: u16,
    pub nnn: u16,
    pub n: u8,
    pub x: u8,
    pub y: u8,
    pub kk: u8,
}

impl From<u16> for Fields {
    fn from(opcode: u16) -> Self {
        Fields {
            opcode,
            nnn: opcode.addr(),
            n: opcode.n(),
            x: opcode.x(),
            y: opcode.y(),
            kk: opcode.kk(),
        }
    }
}

/// Combines two subsequent bytes of memory into a big-endian opcode.
pub fn decode(bytes: [u8; 2]) -> Fields {
    Fields::from(u16::from_be_bytes(bytes))
}
