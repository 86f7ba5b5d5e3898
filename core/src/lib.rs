pub use chip8::Chip8;
pub use constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH, INSTRUCTIONS_PER_SECOND};
pub use error::{Fault, LoadError};
pub use instruction::Instruction;
pub use opcode::{decode, Fields, Opcode};
pub use operations::Transition;
pub use state::{FrameBuffer, Keypad, Mode, State};

mod chip8;
pub mod constants;
mod error;
mod instruction;
mod opcode;
mod operations;
pub mod state;
mod timer;
