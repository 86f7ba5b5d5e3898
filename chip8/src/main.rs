use std::path::PathBuf;

use clap::Parser;

use chip8_core::INSTRUCTIONS_PER_SECOND;

mod keymap;
mod run;

/// Runs a Chip-8 ROM in an SDL2 window.
///
/// Keys `1 2 3 4 / Q W E R / A S D F / Z X C V` make up the keypad. Hold Space to
/// fast-forward; Escape quits. Set `RUST_LOG` to see what the interpreter is doing.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    /// Path to the ROM file to run
    rom: PathBuf,

    /// Instructions executed per second
    #[arg(long, default_value_t = INSTRUCTIONS_PER_SECOND)]
    ips: u64,

    /// Size of each Chip-8 pixel on screen
    #[arg(long, default_value_t = 10)]
    scale: u32,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    run::run(&args)
}
