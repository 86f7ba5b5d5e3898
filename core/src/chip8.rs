use std::convert::TryFrom;
use std::io::Read;
use std::time::Instant;

use log::{debug, trace, warn};

use crate::constants::{ADDRESS_MASK, KEY_COUNT, MAX_ROM_SIZE, PROGRAM_START, TIMER_INTERVAL};
use crate::error::{Fault, LoadError};
use crate::instruction::Instruction;
use crate::opcode::{decode, Fields};
use crate::operations::Transition;
use crate::state::{FrameBuffer, Keypad, Mode, State};
use crate::timer::Timer;

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`
///  - a `timer` that paces the delay and sound timers at 60Hz of wall-clock time
///
/// Supplies interfaces for:
/// - loading roms
/// - pressing and releasing keys
/// - advancing the CPU along with its timers
/// - inspecting its frame buffer for rendering by some display
pub struct Chip8 {
    state: State,
    timer: Timer,
}

impl Chip8 {
    /// A machine with the font loaded and nothing in program memory
    pub fn new() -> Self {
        Chip8 {
            state: State::new(),
            timer: Timer::new(TIMER_INTERVAL),
        }
    }

    /// Builds a machine with `rom` loaded at 0x200
    ///
    /// # Arguments
    /// * `rom` the raw bytes of a ROM; there is no header
    pub fn with_rom(rom: &[u8]) -> Result<Self, LoadError> {
        if rom.len() > MAX_ROM_SIZE {
            return Err(LoadError::RomTooLarge {
                size: rom.len(),
                max: MAX_ROM_SIZE,
            });
        }

        let mut chip8 = Chip8::new();
        let start = PROGRAM_START as usize;
        chip8.state.memory[start..start + rom.len()].copy_from_slice(rom);
        Ok(chip8)
    }

    /// Builds a machine from a ROM read out of `reader`
    ///
    /// Reading stops one byte past the largest ROM that fits, so an endless source is
    /// rejected as too large.
    ///
    /// # Arguments
    /// * `reader` a file reader that contains a ROM
    pub fn from_reader(reader: &mut dyn Read) -> Result<Self, LoadError> {
        let mut rom = Vec::new();
        reader.take(MAX_ROM_SIZE as u64 + 1).read_to_end(&mut rom)?;
        Chip8::with_rom(&rom)
    }

    /// Read-only view of the complete machine state
    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.state.frame_buffer
    }

    /// Returns the FrameBuffer if it changed since the last call
    pub fn take_frame(&mut self) -> Option<FrameBuffer> {
        if self.state.draw_flag {
            self.state.draw_flag = false;
            Some(self.state.frame_buffer)
        } else {
            None
        }
    }

    /// Set the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 8-bit representation of the key that was pressed
    pub fn key_press(&mut self, key: u8) {
        self.set_key(key, true);
    }

    /// Unset the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 8-bit representation of the key that was released
    pub fn key_release(&mut self, key: u8) {
        self.set_key(key, false);
    }

    /// Replace the pressed status of every key at once
    pub fn set_keypad(&mut self, keypad: Keypad) {
        self.state.keypad = keypad;
    }

    fn set_key(&mut self, key: u8, pressed: bool) {
        match self.state.keypad.get_mut(key as usize) {
            Some(status) => *status = pressed,
            None => warn!("ignoring key {:#04X}; the keypad only has {} keys", key, KEY_COUNT),
        }
    }

    /// Advances the CPU by a single cycle using the wall clock to pace the timers
    pub fn step(&mut self) -> Result<(), Fault> {
        self.step_at(Instant::now())
    }

    /// Advances the CPU by a single cycle
    /// - if awaiting a keypress, checks for a newly pressed key instead of executing
    /// - otherwise gets and executes the next opcode
    /// - decrements the timers once for every 60Hz interval elapsed by `now`
    ///
    /// Any fault has already been recovered from when it is returned.
    pub fn step_at(&mut self, now: Instant) -> Result<(), Fault> {
        let result = match self.state.mode {
            Mode::AwaitingKey { register, held } => {
                self.poll_key(register, held);
                Ok(())
            }
            Mode::Running => self.execute(),
        };
        self.advance_timers(now);
        result
    }

    fn execute(&mut self) -> Result<(), Fault> {
        let pc = self.state.pc;
        let (op, fetch_fault) = self.get_op();
        let advanced = State {
            pc: pc + 0x2,
            ..self.state
        };

        let Transition { mut state, fault } = match Instruction::from_op(op.opcode) {
            Some(instruction) => {
                trace!(
                    "{:04X} {:<4} pc{:03X} i{:04X} v{:02X?}",
                    op.opcode,
                    instruction,
                    pc,
                    self.state.i,
                    self.state.v
                );
                instruction.operation()(&op, &advanced)
            }
            None => Transition {
                state: advanced,
                fault: Some(Fault::UnknownOpcode {
                    opcode: op.opcode,
                    pc,
                }),
            },
        };

        let pc_fault = if state.pc > ADDRESS_MASK {
            let address = state.pc;
            state.pc &= ADDRESS_MASK;
            Some(Fault::AddressOutOfRange { address })
        } else {
            None
        };
        self.state = state;

        let mut first = None;
        for fault in fetch_fault.into_iter().chain(fault).chain(pc_fault) {
            warn!("{}", fault);
            first = first.or(Some(fault));
        }
        first.map_or(Ok(()), Err)
    }

    /// Resolves a pending Fx0A once a key goes down
    fn poll_key(&mut self, register: u8, held: Keypad) {
        let keypad = self.state.keypad;
        let pressed = (0..KEY_COUNT).find(|&key| keypad[key] && !held[key]);

        self.state.mode = match pressed {
            Some(key) => {
                debug!("key {:X} pressed; stored in V{:X}", key, register);
                self.state.v[register as usize] = key as u8;
                Mode::Running
            }
            None => Mode::AwaitingKey {
                register,
                held: keypad,
            },
        };
    }

    /// Decrements the timers once per elapsed 60Hz interval without going below 0
    fn advance_timers(&mut self, now: Instant) {
        let ticks = u8::try_from(self.timer.ticks(now)).unwrap_or(u8::MAX);
        if ticks > 0 {
            self.state.delay_timer = self.state.delay_timer.saturating_sub(ticks);
            self.state.sound_timer = self.state.sound_timer.saturating_sub(ticks);
        }
    }

    /// Gets the opcode currently pointed at by the pc.
    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent bytes.
    fn get_op(&self) -> (Fields, Option<Fault>) {
        let (left, _) = self.state.read(self.state.pc, 0x0);
        let (right, wrapped) = self.state.read(self.state.pc, 0x1);
        let fault = wrapped.map(|address| Fault::AddressOutOfRange { address });
        (decode([left, right]), fault)
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}
