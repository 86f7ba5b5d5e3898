use std::io;

use thiserror::Error;

/// Failures that prevent a machine from being built.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unable to read ROM: {0}")]
    Io(#[from] io::Error),

    #[error("ROM is too large ({size} bytes), max size is {max} bytes")]
    RomTooLarge { size: usize, max: usize },
}

/// Recoverable faults raised while executing a ROM.
///
/// By the time a fault is reported the machine has already recovered from it;
/// the caller is free to keep stepping.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    #[error("unknown opcode {opcode:#06X} at {pc:#05X}")]
    UnknownOpcode { opcode: u16, pc: u16 },

    #[error("call at {pc:#05X} with a full stack")]
    StackOverflow { pc: u16 },

    #[error("return at {pc:#05X} with an empty stack")]
    StackUnderflow { pc: u16 },

    #[error("address {address:#06X} is outside of memory and was wrapped")]
    AddressOutOfRange { address: u16 },
}
