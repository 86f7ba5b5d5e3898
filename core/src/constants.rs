use std::time::Duration;

/// Bytes of addressable memory (0x000..=0xFFF)
pub const MEMORY_SIZE: usize = 0x1000;

/// Mask applied to any computed address to keep it inside memory
pub const ADDRESS_MASK: u16 = 0x0FFF;

/// Where ROMs are loaded into memory and where the pc starts
pub const PROGRAM_START: u16 = 0x200;

/// The largest ROM that can be loaded at `PROGRAM_START`
pub const MAX_ROM_SIZE: usize = 0xFFF - PROGRAM_START as usize;

/// Maximum depth of nested subroutine calls
pub const STACK_SIZE: usize = 16;

/// Number of general purpose registers (V0..VF)
pub const REGISTER_COUNT: usize = 16;

/// Number of keys on the hexadecimal keypad (0..F)
pub const KEY_COUNT: usize = 16;

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

/// Bytes in a single font glyph
pub const GLYPH_SIZE: u16 = 5;

/// Frequency the delay and sound timers count down at
pub const TIMER_HZ: u64 = 60;

/// Wall-clock time between two timer decrements
pub const TIMER_INTERVAL: Duration = Duration::from_nanos(1_000_000_000 / TIMER_HZ);

/// Default number of instructions executed per second
pub const INSTRUCTIONS_PER_SECOND: u64 = 700;

/// # Font
/// Glyphs for the hexadecimal digits 0..F, 5 bytes each, stored from address 0.
///
/// Each byte is one row of a 4 pixel wide glyph; only the high nibble is drawn.
/// ```text
/// 0xF0  ****
/// 0x90  *  *
/// 0x90  *  *
/// 0x90  *  *
/// 0xF0  ****
/// ```
#[rustfmt::skip]
pub const FONT_SET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
