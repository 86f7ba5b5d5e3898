use crate::constants::{
    ADDRESS_MASK, DISPLAY_HEIGHT, DISPLAY_WIDTH, FONT_SET, KEY_COUNT, MEMORY_SIZE, PROGRAM_START,
    REGISTER_COUNT, STACK_SIZE,
};

/// A snapshot of the Chip-8 machine state
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) doubles as the carry/borrow/collision flag
/// - (i) a 16-bit memory address register
///
/// Counter
/// - (pc) a 16-bit program counter
///
/// Pointer
/// - (sp) index of the next free slot on the stack
///
/// Timers
/// - 2 8-bit timers (delay & sound), both counting down at 60Hz
/// - the sound timer is tracked but never makes a sound
///
/// ## Memory
/// - 16 entry stack of return addresses
/// - 4096 bytes of addressable memory
///     - 0x000..0x050 holds the font
///     - 0x200.. holds the ROM
/// - 64x32 frame buffer of on/off pixels
///
/// ## Input
/// - 16 pressed flags for keys 0..F, written by the host between cycles
/// - execution is suspended while `mode` is awaiting a key
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct State {
    pub v: [u8; REGISTER_COUNT],
    pub i: u16,
    pub pc: u16,
    pub sp: u8,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub stack: [u16; STACK_SIZE],
    pub memory: [u8; MEMORY_SIZE],
    pub frame_buffer: FrameBuffer,
    pub draw_flag: bool,
    pub keypad: Keypad,
    pub mode: Mode,
}

impl State {
    pub fn new() -> Self {
        // 0x000 - 0x200 is reserved; the font lives at the very start of it
        let mut memory = [0; MEMORY_SIZE];
        memory[..FONT_SET.len()].copy_from_slice(&FONT_SET);

        State {
            v: [0; REGISTER_COUNT],
            i: 0,
            pc: PROGRAM_START,
            sp: 0,
            delay_timer: 0,
            sound_timer: 0,
            stack: [0; STACK_SIZE],
            memory,
            frame_buffer: [[false; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
            draw_flag: false,
            keypad: [false; KEY_COUNT],
            mode: Mode::Running,
        }
    }

    /// Reads the byte at `base + offset`, wrapping into memory.
    ///
    /// Returns the byte along with the unwrapped address if wrapping was needed.
    pub fn read(&self, base: u16, offset: u16) -> (u8, Option<u16>) {
        let (index, wrapped) = wrap_address(base, offset);
        (self.memory[index], wrapped)
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolves `base + offset` to an index into memory.
///
/// Anything past 0xFFF is masked back into range and the raw address is handed back
/// so the caller can report it.
pub fn wrap_address(base: u16, offset: u16) -> (usize, Option<u16>) {
    let address = base.wrapping_add(offset);
    let wrapped = if address > ADDRESS_MASK {
        Some(address)
    } else {
        None
    };
    ((address & ADDRESS_MASK) as usize, wrapped)
}

/// Execution modes of the interpreter.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    Running,
    /// Suspended by Fx0A until a key goes down.
    ///
    /// `held` is the keypad as of the last poll; only keys that are pressed now but
    /// were not held then resolve the wait.
    AwaitingKey { register: u8, held: Keypad },
}

/// The FrameBuffer is indexed as [y][x]
pub type FrameBuffer = [[bool; DISPLAY_WIDTH]; DISPLAY_HEIGHT];

/// Pressed status of keys 0..F
pub type Keypad = [bool; KEY_COUNT];
