use log::debug;

use crate::constants::{ADDRESS_MASK, DISPLAY_HEIGHT, DISPLAY_WIDTH, GLYPH_SIZE, STACK_SIZE};
use crate::error::Fault;
use crate::opcode::Fields;
use crate::state::{wrap_address, FrameBuffer, Mode, State};

/// The state an operation leaves behind, plus anything it had to recover from.
///
/// The pc has already been moved past the opcode when an operation runs, so only
/// jumps, calls, returns and skips touch it.
#[derive(Debug, PartialEq)]
pub struct Transition {
    pub state: State,
    pub fault: Option<Fault>,
}

impl Transition {
    fn faulted(state: State, fault: Fault) -> Self {
        Transition {
            state,
            fault: Some(fault),
        }
    }
}

impl From<State> for Transition {
    fn from(state: State) -> Self {
        Transition { state, fault: None }
    }
}

fn out_of_range(address: Option<u16>) -> Option<Fault> {
    address.map(|address| Fault::AddressOutOfRange { address })
}

/// pc += 2 if `condition`
fn skip_if(condition: bool, state: &State) -> Transition {
    let pc = if condition { state.pc + 0x2 } else { state.pc };
    State { pc, ..*state }.into()
}

/// Address of the opcode being executed, for fault reports
fn current_pc(state: &State) -> u16 {
    state.pc.wrapping_sub(0x2) & ADDRESS_MASK
}

/// machine code routine; ignored
pub fn sys(op: &Fields, state: &State) -> Transition {
    debug!("ignoring machine code routine {:#05X}", op.nnn);
    (*state).into()
}

/// clear
pub fn clr(_op: &Fields, state: &State) -> Transition {
    State {
        frame_buffer: [[false; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
        draw_flag: true,
        ..*state
    }
    .into()
}

/// PC = STACK.pop()
pub fn rts(_op: &Fields, state: &State) -> Transition {
    if state.sp == 0 {
        return Transition::faulted(
            *state,
            Fault::StackUnderflow {
                pc: current_pc(state),
            },
        );
    }
    let sp = state.sp - 0x1;
    State {
        pc: state.stack[sp as usize],
        sp,
        ..*state
    }
    .into()
}

/// PC = addr
pub fn jump(op: &Fields, state: &State) -> Transition {
    State {
        pc: op.nnn,
        ..*state
    }
    .into()
}

/// STACK.push(PC); PC = addr
pub fn call(op: &Fields, state: &State) -> Transition {
    if state.sp as usize >= STACK_SIZE {
        return Transition::faulted(
            *state,
            Fault::StackOverflow {
                pc: current_pc(state),
            },
        );
    }
    let mut stack = state.stack;
    stack[state.sp as usize] = state.pc;
    State {
        pc: op.nnn,
        sp: state.sp + 0x1,
        stack,
        ..*state
    }
    .into()
}

/// if Vx == kk then pc += 2
pub fn ske(op: &Fields, state: &State) -> Transition {
    skip_if(state.v[op.x as usize] == op.kk, state)
}

/// if Vx != kk then pc += 2
pub fn skne(op: &Fields, state: &State) -> Transition {
    skip_if(state.v[op.x as usize] != op.kk, state)
}

/// if Vx == Vy then pc += 2
pub fn skre(op: &Fields, state: &State) -> Transition {
    skip_if(state.v[op.x as usize] == state.v[op.y as usize], state)
}

/// Vx = kk
pub fn load(op: &Fields, state: &State) -> Transition {
    let mut v = state.v;
    v[op.x as usize] = op.kk;
    State { v, ..*state }.into()
}

/// Vx += kk
/// Add kk to Vx; allow for overflow but implicitly drop it
pub fn add(op: &Fields, state: &State) -> Transition {
    let mut v = state.v;
    v[op.x as usize] = v[op.x as usize].wrapping_add(op.kk);
    State { v, ..*state }.into()
}

/// Vx = Vy
pub fn mv(op: &Fields, state: &State) -> Transition {
    let mut v = state.v;
    v[op.x as usize] = v[op.y as usize];
    State { v, ..*state }.into()
}

/// Vx |= Vy
pub fn or(op: &Fields, state: &State) -> Transition {
    let mut v = state.v;
    v[op.x as usize] |= v[op.y as usize];
    State { v, ..*state }.into()
}

/// Vx &= Vy
pub fn and(op: &Fields, state: &State) -> Transition {
    let mut v = state.v;
    v[op.x as usize] &= v[op.y as usize];
    State { v, ..*state }.into()
}

/// Vx ^= Vy
pub fn xor(op: &Fields, state: &State) -> Transition {
    let mut v = state.v;
    v[op.x as usize] ^= v[op.y as usize];
    State { v, ..*state }.into()
}

// The ALU operations below compute their flag from the operands before anything is
// written and store it last, so VF ends up holding the flag even when x is F.

/// Vx += Vy; VF = overflow
pub fn addr(op: &Fields, state: &State) -> Transition {
    let (res, over) = state.v[op.x as usize].overflowing_add(state.v[op.y as usize]);
    let mut v = state.v;
    v[op.x as usize] = res;
    v[0xF] = over as u8;
    State { v, ..*state }.into()
}

/// Vx -= Vy; VF = Vx > Vy
pub fn sub(op: &Fields, state: &State) -> Transition {
    let (vx, vy) = (state.v[op.x as usize], state.v[op.y as usize]);
    let mut v = state.v;
    v[op.x as usize] = vx.wrapping_sub(vy);
    v[0xF] = (vx > vy) as u8;
    State { v, ..*state }.into()
}

/// Vx >>= 1; VF = lsb
pub fn shr(op: &Fields, state: &State) -> Transition {
    let vx = state.v[op.x as usize];
    let mut v = state.v;
    v[op.x as usize] = vx >> 1;
    v[0xF] = vx & 0x1;
    State { v, ..*state }.into()
}

/// Vx = Vy - Vx; VF = Vy > Vx
pub fn subn(op: &Fields, state: &State) -> Transition {
    let (vx, vy) = (state.v[op.x as usize], state.v[op.y as usize]);
    let mut v = state.v;
    v[op.x as usize] = vy.wrapping_sub(vx);
    v[0xF] = (vy > vx) as u8;
    State { v, ..*state }.into()
}

/// Vx <<= 1; VF = msb
pub fn shl(op: &Fields, state: &State) -> Transition {
    let vx = state.v[op.x as usize];
    let mut v = state.v;
    v[op.x as usize] = vx << 1;
    v[0xF] = vx >> 7;
    State { v, ..*state }.into()
}

/// if Vx != Vy then pc +=2
pub fn skrne(op: &Fields, state: &State) -> Transition {
    skip_if(state.v[op.x as usize] != state.v[op.y as usize], state)
}

/// I = addr
pub fn loadi(op: &Fields, state: &State) -> Transition {
    State {
        i: op.nnn,
        ..*state
    }
    .into()
}

/// PC = V0 + addr
pub fn jumpi(op: &Fields, state: &State) -> Transition {
    let (pc, wrapped) = wrap_address(u16::from(state.v[0x0]), op.nnn);
    Transition {
        state: State {
            pc: pc as u16,
            ..*state
        },
        fault: out_of_range(wrapped),
    }
}

/// Vx = rand_byte & kk
pub fn rand(op: &Fields, state: &State) -> Transition {
    let rand_byte: u8 = rand::random();
    let mut v = state.v;
    v[op.x as usize] = rand_byte & op.kk;
    State { v, ..*state }.into()
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs a sprite from memory i..i+n at position x, y on the FrameBuffer with wrapping.
/// Sets VF if any pixels were erased
pub fn draw(op: &Fields, state: &State) -> Transition {
    let mut frame_buffer: FrameBuffer = state.frame_buffer;
    let mut collision = false;
    let mut fault = None;

    let origin_x = state.v[op.x as usize] as usize % DISPLAY_WIDTH;
    let origin_y = state.v[op.y as usize] as usize % DISPLAY_HEIGHT;

    for row in 0..op.n {
        let (sprite, wrapped) = state.read(state.i, u16::from(row));
        fault = fault.or_else(|| out_of_range(wrapped));

        let y = (origin_y + row as usize) % DISPLAY_HEIGHT;
        for bit in 0..8 {
            if sprite & (0x80 >> bit) == 0 {
                continue;
            }
            let x = (origin_x + bit) % DISPLAY_WIDTH;
            collision |= frame_buffer[y][x];
            frame_buffer[y][x] ^= true;
        }
    }

    let mut v = state.v;
    v[0xF] = collision as u8;

    Transition {
        state: State {
            v,
            frame_buffer,
            draw_flag: true,
            ..*state
        },
        fault,
    }
}

/// Keys are addressed by the low nibble of Vx
fn is_pressed(op: &Fields, state: &State) -> bool {
    state.keypad[(state.v[op.x as usize] & 0xF) as usize]
}

/// if Vx.pressed then pc += 2
pub fn skpr(op: &Fields, state: &State) -> Transition {
    skip_if(is_pressed(op, state), state)
}

/// if !Vx.pressed then pc += 2
pub fn skup(op: &Fields, state: &State) -> Transition {
    skip_if(!is_pressed(op, state), state)
}

/// Vx = DT
pub fn moved(op: &Fields, state: &State) -> Transition {
    let mut v = state.v;
    v[op.x as usize] = state.delay_timer;
    State { v, ..*state }.into()
}

/// await keypress for Vx
pub fn keyd(op: &Fields, state: &State) -> Transition {
    debug!("awaiting key for V{:X}", op.x);
    State {
        mode: Mode::AwaitingKey {
            register: op.x,
            held: state.keypad,
        },
        ..*state
    }
    .into()
}

/// DT = Vx
pub fn loads(op: &Fields, state: &State) -> Transition {
    State {
        delay_timer: state.v[op.x as usize],
        ..*state
    }
    .into()
}

/// ST = Vx
pub fn ld(op: &Fields, state: &State) -> Transition {
    State {
        sound_timer: state.v[op.x as usize],
        ..*state
    }
    .into()
}

/// I += Vx
/// VF is left alone; a sum past 0xFFF is masked back into range and reported
pub fn addi(op: &Fields, state: &State) -> Transition {
    let (i, wrapped) = wrap_address(state.i, u16::from(state.v[op.x as usize]));
    Transition {
        state: State {
            i: i as u16,
            ..*state
        },
        fault: out_of_range(wrapped),
    }
}

/// I = Vx * 5
/// Set I to the memory address of the font glyph for Vx
pub fn ldspr(op: &Fields, state: &State) -> Transition {
    State {
        i: u16::from(state.v[op.x as usize]) * GLYPH_SIZE,
        ..*state
    }
    .into()
}

/// mem[I..I+3] = bcd(Vx)
/// Store BCD repr of Vx in memory starting at address i
pub fn bcd(op: &Fields, state: &State) -> Transition {
    let vx = state.v[op.x as usize];
    let digits = [vx / 100, vx / 10 % 10, vx % 10];
    store(state, &digits)
}

/// mem[I..=I+x] = V0..=Vx
pub fn stor(op: &Fields, state: &State) -> Transition {
    store(state, &state.v[..=op.x as usize])
}

/// Copies `bytes` into memory starting at address i
fn store(state: &State, bytes: &[u8]) -> Transition {
    let mut memory = state.memory;
    let mut fault = None;
    for (offset, byte) in bytes.iter().enumerate() {
        let (index, wrapped) = wrap_address(state.i, offset as u16);
        fault = fault.or_else(|| out_of_range(wrapped));
        memory[index] = *byte;
    }
    Transition {
        state: State { memory, ..*state },
        fault,
    }
}

/// V0..=Vx = mem[I..=I+x]
pub fn read(op: &Fields, state: &State) -> Transition {
    let mut v = state.v;
    let mut fault = None;
    for register in 0..=op.x {
        let (byte, wrapped) = state.read(state.i, u16::from(register));
        fault = fault.or_else(|| out_of_range(wrapped));
        v[register as usize] = byte;
    }
    Transition {
        state: State { v, ..*state },
        fault,
    }
}
