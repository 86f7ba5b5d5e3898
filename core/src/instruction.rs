use std::fmt;

use crate::opcode::Fields;
use crate::operations::{self, Transition};
use crate::state::State;

/// Signature shared by every operation
pub type Operation = fn(op: &Fields, state: &State) -> Transition;

/// Every instruction the interpreter understands
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Instruction {
    Sys,
    Cls,
    Ret,
    Jump,
    Call,
    SkipEqByte,
    SkipNeByte,
    SkipEqReg,
    LoadByte,
    AddByte,
    Move,
    Or,
    And,
    Xor,
    AddReg,
    Sub,
    ShiftRight,
    SubN,
    ShiftLeft,
    SkipNeReg,
    LoadI,
    JumpV0,
    Random,
    Draw,
    SkipPressed,
    SkipNotPressed,
    LoadDelay,
    AwaitKey,
    SetDelay,
    SetSound,
    AddI,
    LoadGlyph,
    Bcd,
    Store,
    Read,
}

impl Instruction {
    /// Selects the Instruction for an opcode.
    ///
    /// The high nibble picks a family; each family is then narrowed with the smallest
    /// mask that tells its members apart. Opcodes that match nothing return `None`.
    pub fn from_op(op: u16) -> Option<Self> {
        use Instruction::*;

        let instruction = match op & 0xF000 {
            0x0000 => match op {
                0x00E0 => Cls,
                0x00EE => Ret,
                _ => Sys,
            },
            0x1000 => Jump,
            0x2000 => Call,
            0x3000 => SkipEqByte,
            0x4000 => SkipNeByte,
            0x5000 => SkipEqReg,
            0x6000 => LoadByte,
            0x7000 => AddByte,
            0x8000 => match op & 0xF00F {
                0x8000 => Move,
                0x8001 => Or,
                0x8002 => And,
                0x8003 => Xor,
                0x8004 => AddReg,
                0x8005 => Sub,
                0x8006 => ShiftRight,
                0x8007 => SubN,
                0x800E => ShiftLeft,
                _ => return None,
            },
            0x9000 => SkipNeReg,
            0xA000 => LoadI,
            0xB000 => JumpV0,
            0xC000 => Random,
            0xD000 => Draw,
            0xE000 => match op & 0xF0FF {
                0xE09E => SkipPressed,
                0xE0A1 => SkipNotPressed,
                _ => return None,
            },
            _ => match op & 0xF0FF {
                0xF007 => LoadDelay,
                0xF00A => AwaitKey,
                0xF015 => SetDelay,
                0xF018 => SetSound,
                0xF01E => AddI,
                0xF029 => LoadGlyph,
                0xF033 => Bcd,
                0xF055 => Store,
                0xF065 => Read,
                _ => return None,
            },
        };
        Some(instruction)
    }

    /// The operation that carries out this Instruction
    pub fn operation(self) -> Operation {
        use Instruction::*;

        match self {
            Sys => operations::sys,
            Cls => operations::clr,
            Ret => operations::rts,
            Jump => operations::jump,
            Call => operations::call,
            SkipEqByte => operations::ske,
            SkipNeByte => operations::skne,
            SkipEqReg => operations::skre,
            LoadByte => operations::load,
            AddByte => operations::add,
            Move => operations::mv,
            Or => operations::or,
            And => operations::and,
            Xor => operations::xor,
            AddReg => operations::addr,
            Sub => operations::sub,
            ShiftRight => operations::shr,
            SubN => operations::subn,
            ShiftLeft => operations::shl,
            SkipNeReg => operations::skrne,
            LoadI => operations::loadi,
            JumpV0 => operations::jumpi,
            Random => operations::rand,
            Draw => operations::draw,
            SkipPressed => operations::skpr,
            SkipNotPressed => operations::skup,
            LoadDelay => operations::moved,
            AwaitKey => operations::keyd,
            SetDelay => operations::loads,
            SetSound => operations::ld,
            AddI => operations::addi,
            LoadGlyph => operations::ldspr,
            Bcd => operations::bcd,
            Store => operations::stor,
            Read => operations::read,
        }
    }

    /// Conventional assembler mnemonic
    pub fn mnemonic(self) -> &'static str {
        use Instruction::*;

        match self {
            Sys => "SYS",
            Cls => "CLS",
            Ret => "RET",
            Jump | JumpV0 => "JP",
            Call => "CALL",
            SkipEqByte | SkipEqReg => "SE",
            SkipNeByte | SkipNeReg => "SNE",
            LoadByte | Move | LoadI | LoadDelay | AwaitKey | SetDelay | SetSound | LoadGlyph
            | Bcd | Store | Read => "LD",
            AddByte | AddReg | AddI => "ADD",
            Or => "OR",
            And => "AND",
            Xor => "XOR",
            Sub => "SUB",
            ShiftRight => "SHR",
            SubN => "SUBN",
            ShiftLeft => "SHL",
            Random => "RND",
            Draw => "DRW",
            SkipPressed => "SKP",
            SkipNotPressed => "SKNP",
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.mnemonic())
    }
}
