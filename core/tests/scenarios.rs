use std::io::{self, Read};
use std::time::{Duration, Instant};

use chip8_core::constants::{FONT_SET, TIMER_INTERVAL};
use chip8_core::{Chip8, Fault, LoadError};

#[test]
fn test_rom_and_font_are_loaded() {
    let chip8 = Chip8::with_rom(&[0xA2, 0x2A, 0x60, 0x0C]).unwrap();
    let memory = &chip8.state().memory;
    assert_eq!(memory[0x200], 0xA2);
    assert_eq!(memory[0x000..0x050], FONT_SET[..]);
}

/// A ROM source whose reads always fail
struct Unreadable;

impl Read for Unreadable {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::Other, "unreadable"))
    }
}

#[test]
fn test_unreadable_rom_is_a_load_error() {
    assert!(matches!(
        Chip8::from_reader(&mut Unreadable),
        Err(LoadError::Io(_))
    ));
}

/// A ROM source that never runs out of bytes and counts how many it handed over
struct Endless {
    consumed: usize,
}

impl Read for Endless {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.consumed >= 1 << 20 {
            return Err(io::Error::new(io::ErrorKind::Other, "gave up after 1 MiB"));
        }
        buf.iter_mut().for_each(|byte| *byte = 0);
        self.consumed += buf.len();
        Ok(buf.len())
    }
}

#[test]
fn test_endless_rom_is_too_large() {
    let mut reader = Endless { consumed: 0 };
    assert!(matches!(
        Chip8::from_reader(&mut reader),
        Err(LoadError::RomTooLarge { .. })
    ));
    assert!(reader.consumed < 1 << 20);
}

#[test]
fn test_index_past_memory_is_reported() {
    // AFFF: I = 0xFFF, 6101: V1 = 1, F11E: I += V1
    let mut chip8 = Chip8::with_rom(&[0xAF, 0xFF, 0x61, 0x01, 0xF1, 0x1E]).unwrap();
    chip8.step().unwrap();
    chip8.step().unwrap();
    assert_eq!(
        chip8.step(),
        Err(Fault::AddressOutOfRange { address: 0x1000 })
    );
    assert_eq!(chip8.state().i, 0x000);
    assert_eq!(chip8.state().pc, 0x206);
}

#[test]
fn test_load_then_return_with_empty_stack() {
    // 600A: V0 = 0x0A, 00EE: return with nothing on the stack
    let mut chip8 = Chip8::with_rom(&[0x60, 0x0A, 0x00, 0xEE]).unwrap();

    chip8.step().unwrap();
    assert_eq!(chip8.state().v[0x0], 10);
    assert_eq!(chip8.state().pc, 0x202);

    assert_eq!(chip8.step(), Err(Fault::StackUnderflow { pc: 0x202 }));
    assert_eq!(chip8.state().sp, 0);
    // the return is dropped and execution carries on after it
    assert_eq!(chip8.state().pc, 0x204);
}

#[test]
fn test_call_and_return() {
    // 2206: call 0x206, 1202: spin, 00E0 padding, 6105: V1 = 5, 00EE: return
    let rom = [0x22, 0x06, 0x12, 0x02, 0x00, 0xE0, 0x61, 0x05, 0x00, 0xEE];
    let mut chip8 = Chip8::with_rom(&rom).unwrap();
    chip8.step().unwrap();
    assert_eq!(chip8.state().pc, 0x206);
    assert_eq!(chip8.state().sp, 1);
    chip8.step().unwrap();
    chip8.step().unwrap();
    assert_eq!(chip8.state().pc, 0x202);
    assert_eq!(chip8.state().sp, 0);
    assert_eq!(chip8.state().v[0x1], 5);
}

#[test]
fn test_recursion_overflows_the_stack() {
    // 2200: call itself forever
    let mut chip8 = Chip8::with_rom(&[0x22, 0x00]).unwrap();
    for _ in 0..16 {
        chip8.step().unwrap();
    }
    assert_eq!(chip8.state().sp, 16);
    assert_eq!(chip8.step(), Err(Fault::StackOverflow { pc: 0x200 }));
    assert_eq!(chip8.state().sp, 16);
    assert_eq!(chip8.state().pc, 0x202);
}

#[test]
fn test_sknp_skips_only_when_released() {
    // 6107: V1 = 7, E1A1: skip if key V1 is not pressed
    let rom = [0x61, 0x07, 0xE1, 0xA1];

    let mut chip8 = Chip8::with_rom(&rom).unwrap();
    chip8.key_press(0x7);
    chip8.step().unwrap();
    chip8.step().unwrap();
    assert_eq!(chip8.state().pc, 0x204);

    let mut chip8 = Chip8::with_rom(&rom).unwrap();
    chip8.step().unwrap();
    chip8.step().unwrap();
    assert_eq!(chip8.state().pc, 0x206);
}

#[test]
fn test_wait_for_key_blocks_until_pressed() {
    // F30A: wait for a key into V3, 6401: V4 = 1
    let mut chip8 = Chip8::with_rom(&[0xF3, 0x0A, 0x64, 0x01]).unwrap();
    chip8.step().unwrap();
    for _ in 0..10 {
        chip8.step().unwrap();
    }
    assert_eq!(chip8.state().pc, 0x202);
    assert_eq!(chip8.state().v[0x4], 0);

    chip8.key_press(0xB);
    chip8.step().unwrap();
    assert_eq!(chip8.state().v[0x3], 0xB);
    assert_eq!(chip8.state().pc, 0x202);

    chip8.step().unwrap();
    assert_eq!(chip8.state().v[0x4], 1);
}

#[test]
fn test_bcd_of_157() {
    // 609D: V0 = 157, A300: I = 0x300, F033: bcd V0
    let mut chip8 = Chip8::with_rom(&[0x60, 0x9D, 0xA3, 0x00, 0xF0, 0x33]).unwrap();
    for _ in 0..3 {
        chip8.step().unwrap();
    }
    assert_eq!(chip8.state().memory[0x300..0x303], [1, 5, 7]);
}

#[test]
fn test_glyph_address_of_a() {
    // 650A: V5 = 0xA, F529: I = glyph(V5)
    let mut chip8 = Chip8::with_rom(&[0x65, 0x0A, 0xF5, 0x29]).unwrap();
    chip8.step().unwrap();
    chip8.step().unwrap();
    let i = chip8.state().i as usize;
    assert_eq!(i, 50);
    assert_eq!(
        chip8.state().memory[i..i + 5],
        [0xF0, 0x90, 0xF0, 0x90, 0x90]
    );
}

#[test]
fn test_delay_timer_decays_at_60hz() {
    // 6005: V0 = 5, F015: DT = V0, then spin on 1204
    let mut chip8 = Chip8::with_rom(&[0x60, 0x05, 0xF0, 0x15, 0x12, 0x04]).unwrap();
    let start = Instant::now();
    chip8.step_at(start).unwrap();
    chip8.step_at(start).unwrap();
    assert_eq!(chip8.state().delay_timer, 5);

    // a 1000 instructions per second host for exactly one interval
    let mut now = start;
    while now + Duration::from_millis(1) < start + TIMER_INTERVAL {
        now += Duration::from_millis(1);
        chip8.step_at(now).unwrap();
    }
    assert_eq!(chip8.state().delay_timer, 5);

    chip8.step_at(start + TIMER_INTERVAL).unwrap();
    assert_eq!(chip8.state().delay_timer, 4);

    let mut now = start + TIMER_INTERVAL;
    while now + Duration::from_millis(1) < start + TIMER_INTERVAL * 2 {
        now += Duration::from_millis(1);
        chip8.step_at(now).unwrap();
    }
    assert_eq!(chip8.state().delay_timer, 4);
}
