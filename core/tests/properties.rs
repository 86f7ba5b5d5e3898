use proptest::prelude::*;

use chip8_core::{Chip8, FrameBuffer};

const BACKGROUND: usize = 0x20;
const SPRITE: usize = 0x30;

/// Builds a ROM that draws `background` at (bx, by), then points I at `sprite` and
/// loads (sx, sy) into V2/V3, ending on two `D23n` draws of it.
fn draw_twice_rom(
    background: &[u8],
    (bx, by): (u8, u8),
    sprite: &[u8],
    (sx, sy): (u8, u8),
) -> Vec<u8> {
    #[rustfmt::skip]
    let mut rom = vec![
        0xA2, BACKGROUND as u8,
        0x60, bx,
        0x61, by,
        0xD0, 0x10 | background.len() as u8,
        0xA2, SPRITE as u8,
        0x62, sx,
        0x63, sy,
        0xD2, 0x30 | sprite.len() as u8,
        0xD2, 0x30 | sprite.len() as u8,
    ];
    rom.resize(SPRITE + sprite.len(), 0);
    rom[BACKGROUND..BACKGROUND + background.len()].copy_from_slice(background);
    rom[SPRITE..SPRITE + sprite.len()].copy_from_slice(sprite);
    rom
}

fn steps(chip8: &mut Chip8, count: usize) {
    for _ in 0..count {
        chip8.step().unwrap();
    }
}

fn pixels(frame: &FrameBuffer) -> impl Iterator<Item = &bool> {
    frame.iter().flatten()
}

proptest! {
    #[test]
    fn add_sets_carry_iff_sum_overflows(a in any::<u8>(), b in any::<u8>()) {
        // 60aa: V0 = a, 61bb: V1 = b, 8014: V0 += V1
        let mut chip8 = Chip8::with_rom(&[0x60, a, 0x61, b, 0x80, 0x14]).unwrap();
        steps(&mut chip8, 3);

        let sum = u16::from(a) + u16::from(b);
        prop_assert_eq!(chip8.state().v[0x0], (sum % 256) as u8);
        prop_assert_eq!(chip8.state().v[0xF], (sum > 255) as u8);
    }

    #[test]
    fn drawing_twice_restores_the_frame(
        background in prop::collection::vec(any::<u8>(), 1..=15),
        background_at in (any::<u8>(), any::<u8>()),
        sprite in prop::collection::vec(any::<u8>(), 1..=15),
        sprite_at in (any::<u8>(), any::<u8>()),
    ) {
        let rom = draw_twice_rom(&background, background_at, &sprite, sprite_at);
        let mut chip8 = Chip8::with_rom(&rom).unwrap();

        steps(&mut chip8, 4);
        let before = *chip8.frame_buffer();
        steps(&mut chip8, 4);
        let between = *chip8.frame_buffer();
        steps(&mut chip8, 1);

        prop_assert_eq!(*chip8.frame_buffer(), before);
        // the second draw collides with whatever the first one turned on
        let turned_on = pixels(&before).zip(pixels(&between)).any(|(was, now)| !was && *now);
        prop_assert_eq!(chip8.state().v[0xF], turned_on as u8);
    }

    #[test]
    fn clear_turns_every_pixel_off(
        sprite in prop::collection::vec(any::<u8>(), 1..=15),
        at in (any::<u8>(), any::<u8>()),
    ) {
        let mut rom = draw_twice_rom(&sprite, at, &sprite, at);
        // replace the second pair of draws with 00E0
        rom[0x0E..0x12].copy_from_slice(&[0x00, 0xE0, 0x00, 0xE0]);
        let mut chip8 = Chip8::with_rom(&rom).unwrap();

        steps(&mut chip8, 8);
        prop_assert!(pixels(chip8.frame_buffer()).all(|pixel| !pixel));
    }
}
