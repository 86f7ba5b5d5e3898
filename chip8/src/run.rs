use std::fs::File;
use std::io::BufReader;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context};
use log::{debug, info};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use chip8_core::Chip8;
use chip8_display::Display;

use crate::keymap::keymap;
use crate::Args;

pub fn run(args: &Args) -> anyhow::Result<()> {
    // Load ROM
    let file = File::open(&args.rom)
        .with_context(|| format!("unable to open ROM {}", args.rom.display()))?;
    let mut reader = BufReader::new(file);
    let mut chip8 = Chip8::from_reader(&mut reader)
        .with_context(|| format!("unable to load ROM {}", args.rom.display()))?;
    info!("successfully loaded ROM {}", args.rom.display());

    // Get SDL2 context
    let sdl: sdl2::Sdl = sdl2::init().map_err(|e| anyhow!(e))?;
    let mut display: Display = Display::new(&sdl, args.scale)?;
    let mut events = sdl.event_pump().map_err(|e| anyhow!(e))?;

    // Set initial timing
    let cycle_time: Duration = Duration::from_nanos(1_000_000_000 / args.ips.max(1));
    let mut last_cycle: Instant = Instant::now();

    // Whether or not the instruction rate should be respected
    let mut fast_forward: bool = false;

    'event: loop {
        // If something was drawn since the last frame, render it
        if let Some(frame) = chip8.take_frame() {
            display.render(&frame)?;
        }

        // Handle input
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. } => break 'event,
                Event::KeyDown {
                    keycode: Some(key), ..
                } => match (key, keymap(key)) {
                    (_, Some(kc)) => chip8.key_press(kc),
                    (Keycode::Space, _) => fast_forward = true,
                    (Keycode::Escape, _) => break 'event,
                    _ => continue,
                },
                Event::KeyUp {
                    keycode: Some(key), ..
                } => match (key, keymap(key)) {
                    (_, Some(kc)) => chip8.key_release(kc),
                    (Keycode::Space, _) => fast_forward = false,
                    _ => continue,
                },
                _ => continue,
            };
        }

        // Update state; faults are logged by the interpreter and already recovered from
        if let Err(fault) = chip8.step() {
            debug!("continuing after {}", fault);
        }

        // Handle timing
        let current_time = Instant::now();
        let elapsed_cycle_time = current_time - last_cycle;
        if !fast_forward && cycle_time > elapsed_cycle_time {
            std::thread::sleep(cycle_time - elapsed_cycle_time);
        }
        last_cycle = Instant::now();
    }

    Ok(())
}
