use log::{debug, info};
use rand::Rng;

use crate::chip8::{Chip8, Flow};
use crate::constants::{FLAG_REGISTER_COUNT, MEMORY_SIZE, SCROLL_COLUMNS};
use crate::display::Display;
use crate::error::DecodeError;
use crate::font::{glyph_addr, hires_glyph_addr};
use crate::input::Input;
use crate::opcode::Opcode;
use crate::sprite;
use crate::state::KeyWait;

type Executed = Result<Flow, DecodeError>;

/// clear
pub fn clr<D: Display, I: Input>(cpu: &mut Chip8<D, I>, _op: u16) -> Executed {
    cpu.display.clear_screen();
    Ok(Flow::Next)
}

/// PC = STACK.pop()
pub fn rts<D: Display, I: Input>(cpu: &mut Chip8<D, I>, op: u16) -> Executed {
    match cpu.state.stack.pop() {
        Some(addr) => {
            cpu.state.pc = addr;
            Ok(Flow::Next)
        }
        None => Err(DecodeError::StackUnderflow {
            opcode: op,
            pc: cpu.current_pc(),
        }),
    }
}

/// PC = addr
pub fn jump<D: Display, I: Input>(cpu: &mut Chip8<D, I>, op: u16) -> Executed {
    cpu.state.jump_to(op.nnn());
    Ok(Flow::Next)
}

/// STACK.push(PC); PC = addr
pub fn call<D: Display, I: Input>(cpu: &mut Chip8<D, I>, op: u16) -> Executed {
    cpu.state.stack.push(cpu.state.pc);
    cpu.state.jump_to(op.nnn());
    Ok(Flow::Next)
}

/// if Vx == nn then skip
pub fn ske<D: Display, I: Input>(cpu: &mut Chip8<D, I>, op: u16) -> Executed {
    if cpu.state.v[op.x()] == op.nn() {
        cpu.state.skip();
    }
    Ok(Flow::Next)
}

/// if Vx != nn then skip
pub fn skne<D: Display, I: Input>(cpu: &mut Chip8<D, I>, op: u16) -> Executed {
    if cpu.state.v[op.x()] != op.nn() {
        cpu.state.skip();
    }
    Ok(Flow::Next)
}

/// if Vx == Vy then skip
pub fn skre<D: Display, I: Input>(cpu: &mut Chip8<D, I>, op: u16) -> Executed {
    if cpu.state.v[op.x()] == cpu.state.v[op.y()] {
        cpu.state.skip();
    }
    Ok(Flow::Next)
}

/// Vx = nn
pub fn load<D: Display, I: Input>(cpu: &mut Chip8<D, I>, op: u16) -> Executed {
    cpu.state.v[op.x()] = op.nn();
    Ok(Flow::Next)
}

/// Vx += nn
pub fn add<D: Display, I: Input>(cpu: &mut Chip8<D, I>, op: u16) -> Executed {
    let x = op.x();
    cpu.state.v[x] = cpu.state.v[x].wrapping_add(op.nn());
    Ok(Flow::Next)
}

/// Vx = Vy
pub fn mv<D: Display, I: Input>(cpu: &mut Chip8<D, I>, op: u16) -> Executed {
    cpu.state.v[op.x()] = cpu.state.v[op.y()];
    Ok(Flow::Next)
}

/// Vx |= Vy
pub fn or<D: Display, I: Input>(cpu: &mut Chip8<D, I>, op: u16) -> Executed {
    cpu.state.v[op.x()] |= cpu.state.v[op.y()];
    clear_vf_after_logic(cpu);
    Ok(Flow::Next)
}

/// Vx &= Vy
pub fn and<D: Display, I: Input>(cpu: &mut Chip8<D, I>, op: u16) -> Executed {
    cpu.state.v[op.x()] &= cpu.state.v[op.y()];
    clear_vf_after_logic(cpu);
    Ok(Flow::Next)
}

/// Vx ^= Vy
pub fn xor<D: Display, I: Input>(cpu: &mut Chip8<D, I>, op: u16) -> Executed {
    cpu.state.v[op.x()] ^= cpu.state.v[op.y()];
    clear_vf_after_logic(cpu);
    Ok(Flow::Next)
}

fn clear_vf_after_logic<D: Display, I: Input>(cpu: &mut Chip8<D, I>) {
    if cpu.ruleset.quirks.logic_clears_vf {
        cpu.state.v[0xF] = 0;
    }
}

/// Vx += Vy; VF = carry
pub fn addr<D: Display, I: Input>(cpu: &mut Chip8<D, I>, op: u16) -> Executed {
    let (sum, carry) = cpu.state.v[op.x()].overflowing_add(cpu.state.v[op.y()]);
    cpu.state.v[op.x()] = sum;
    cpu.state.v[0xF] = carry as u8;
    Ok(Flow::Next)
}

/// Vx -= Vy; VF = !borrow
pub fn sub<D: Display, I: Input>(cpu: &mut Chip8<D, I>, op: u16) -> Executed {
    let (vx, vy) = (cpu.state.v[op.x()], cpu.state.v[op.y()]);
    cpu.state.v[op.x()] = vx.wrapping_sub(vy);
    cpu.state.v[0xF] = (vx >= vy) as u8;
    Ok(Flow::Next)
}

/// Vx >>= 1; VF = the bit shifted out
pub fn shr<D: Display, I: Input>(cpu: &mut Chip8<D, I>, op: u16) -> Executed {
    let source = shift_source(cpu, op);
    cpu.state.v[op.x()] = source >> 1;
    cpu.state.v[0xF] = source & 0x1;
    Ok(Flow::Next)
}

/// Vx = Vy - Vx; VF = !borrow
pub fn subn<D: Display, I: Input>(cpu: &mut Chip8<D, I>, op: u16) -> Executed {
    let (vx, vy) = (cpu.state.v[op.x()], cpu.state.v[op.y()]);
    cpu.state.v[op.x()] = vy.wrapping_sub(vx);
    cpu.state.v[0xF] = (vy >= vx) as u8;
    Ok(Flow::Next)
}

/// Vx <<= 1; VF = the bit shifted out
pub fn shl<D: Display, I: Input>(cpu: &mut Chip8<D, I>, op: u16) -> Executed {
    let source = shift_source(cpu, op);
    cpu.state.v[op.x()] = source << 1;
    cpu.state.v[0xF] = source >> 7;
    Ok(Flow::Next)
}

fn shift_source<D: Display, I: Input>(cpu: &Chip8<D, I>, op: u16) -> u8 {
    if cpu.ruleset.quirks.shift_uses_vy {
        cpu.state.v[op.y()]
    } else {
        cpu.state.v[op.x()]
    }
}

/// if Vx != Vy then skip
pub fn skrne<D: Display, I: Input>(cpu: &mut Chip8<D, I>, op: u16) -> Executed {
    if cpu.state.v[op.x()] != cpu.state.v[op.y()] {
        cpu.state.skip();
    }
    Ok(Flow::Next)
}

/// I = addr
pub fn loadi<D: Display, I: Input>(cpu: &mut Chip8<D, I>, op: u16) -> Executed {
    cpu.state.i = op.nnn();
    Ok(Flow::Next)
}

/// PC = addr + V0 (or Vx)
pub fn jumpi<D: Display, I: Input>(cpu: &mut Chip8<D, I>, op: u16) -> Executed {
    let offset = if cpu.ruleset.quirks.jump_uses_v0 {
        cpu.state.v[0x0]
    } else {
        cpu.state.v[op.x()]
    };
    cpu.state.jump_to(op.nnn() + u16::from(offset));
    Ok(Flow::Next)
}

/// Vx = random & nn
pub fn rnd<D: Display, I: Input>(cpu: &mut Chip8<D, I>, op: u16) -> Executed {
    cpu.state.v[op.x()] = cpu.rng.gen::<u8>() & op.nn();
    Ok(Flow::Next)
}

/// Draw the sprite at I to (Vx, Vy); VF = collision
///
/// A height of 0 draws a 16x16 sprite on SUPER-CHIP.
pub fn draw<D: Display, I: Input>(cpu: &mut Chip8<D, I>, op: u16) -> Executed {
    let x = usize::from(cpu.state.v[op.x()]);
    let y = usize::from(cpu.state.v[op.y()]);
    let collided = if op.n() == 0 && cpu.ruleset.is_extended() {
        let bytes = cpu.state.read_bytes(cpu.state.i, sprite::LARGE_SIZE);
        blit(&mut cpu.display, x, y, sprite::decode_large(&bytes).as_slice(), true)
    } else {
        let bytes = cpu.state.read_bytes(cpu.state.i, usize::from(op.n()));
        blit(&mut cpu.display, x, y, sprite::decode_small(&bytes).as_slice(), false)
    };
    cpu.state.v[0xF] = collided as u8;
    Ok(Flow::Drew)
}

/// XORs `rows` onto the display with its top-left corner at the wrapped origin.
/// Rows are clipped at the bottom edge; columns either clip or wrap at the right edge.
fn blit<D: Display, const W: usize>(
    display: &mut D,
    x: usize,
    y: usize,
    rows: &[[bool; W]],
    wrap_columns: bool,
) -> bool {
    let (width, height) = (display.width(), display.height());
    let (x0, y0) = (x % width, y % height);
    let mut collided = false;
    for (row, y) in rows.iter().zip(y0..height) {
        for (dx, &lit) in row.iter().enumerate() {
            let x = if wrap_columns {
                (x0 + dx) % width
            } else if x0 + dx < width {
                x0 + dx
            } else {
                break;
            };
            if lit {
                collided |= display.flip_pixel(x, y);
            }
        }
    }
    collided
}

/// if key Vx is down then skip
pub fn skpr<D: Display, I: Input>(cpu: &mut Chip8<D, I>, op: u16) -> Executed {
    if cpu.input.is_key_down(cpu.state.v[op.x()]) {
        cpu.state.skip();
    }
    Ok(Flow::Next)
}

/// if key Vx is up then skip
pub fn skup<D: Display, I: Input>(cpu: &mut Chip8<D, I>, op: u16) -> Executed {
    if !cpu.input.is_key_down(cpu.state.v[op.x()]) {
        cpu.state.skip();
    }
    Ok(Flow::Next)
}

/// Vx = DT
pub fn moved<D: Display, I: Input>(cpu: &mut Chip8<D, I>, op: u16) -> Executed {
    cpu.state.v[op.x()] = cpu.state.delay_timer;
    Ok(Flow::Next)
}

/// Vx = key, then wait for it to be released
///
/// Re-executes while no key is down. Once one is, the key is stored and execution is held
/// until it goes up again.
pub fn keyd<D: Display, I: Input>(cpu: &mut Chip8<D, I>, op: u16) -> Executed {
    match cpu.input.current_key_down() {
        Some(key) => {
            debug!("V{:X} = key {:X}, waiting for release", op.x(), key);
            cpu.state.v[op.x()] = key;
            cpu.state.key_wait = KeyWait::AwaitingRelease { key };
        }
        None => {
            if cpu.state.key_wait == KeyWait::Idle {
                debug!("waiting for a key for V{:X}", op.x());
            }
            cpu.state.rewind();
            cpu.state.key_wait = KeyWait::AwaitingKey { register: op.x() };
        }
    }
    Ok(Flow::Waiting)
}

/// DT = Vx
pub fn loads<D: Display, I: Input>(cpu: &mut Chip8<D, I>, op: u16) -> Executed {
    cpu.state.delay_timer = cpu.state.v[op.x()];
    Ok(Flow::Next)
}

/// ST = Vx
pub fn ld<D: Display, I: Input>(cpu: &mut Chip8<D, I>, op: u16) -> Executed {
    cpu.state.sound_timer = cpu.state.v[op.x()];
    Ok(Flow::Next)
}

/// I += Vx; VF = 1 if I passed the end of memory
pub fn addi<D: Display, I: Input>(cpu: &mut Chip8<D, I>, op: u16) -> Executed {
    let sum = usize::from(cpu.state.i) + usize::from(cpu.state.v[op.x()]);
    if sum >= MEMORY_SIZE {
        cpu.state.v[0xF] = 1;
    }
    cpu.state.i = (sum % MEMORY_SIZE) as u16;
    Ok(Flow::Next)
}

/// I = location of the low-res glyph for Vx
pub fn ldspr<D: Display, I: Input>(cpu: &mut Chip8<D, I>, op: u16) -> Executed {
    cpu.state.i = glyph_addr(cpu.state.v[op.x()]);
    Ok(Flow::Next)
}

/// [I, I+1, I+2] = BCD(Vx)
pub fn bcd<D: Display, I: Input>(cpu: &mut Chip8<D, I>, op: u16) -> Executed {
    let vx = cpu.state.v[op.x()];
    let i = cpu.state.i;
    cpu.state.write(i, vx / 100);
    cpu.state.write(i.wrapping_add(1), vx / 10 % 10);
    cpu.state.write(i.wrapping_add(2), vx % 10);
    Ok(Flow::Next)
}

/// [I..=I+x] = V0..=Vx
pub fn stor<D: Display, I: Input>(cpu: &mut Chip8<D, I>, op: u16) -> Executed {
    let i = cpu.state.i;
    for register in 0..=op.x() {
        cpu.state.write(i.wrapping_add(register as u16), cpu.state.v[register]);
    }
    advance_index_after_transfer(cpu, op);
    Ok(Flow::Next)
}

/// V0..=Vx = [I..=I+x]
pub fn read<D: Display, I: Input>(cpu: &mut Chip8<D, I>, op: u16) -> Executed {
    let i = cpu.state.i;
    for register in 0..=op.x() {
        cpu.state.v[register] = cpu.state.read(i.wrapping_add(register as u16));
    }
    advance_index_after_transfer(cpu, op);
    Ok(Flow::Next)
}

fn advance_index_after_transfer<D: Display, I: Input>(cpu: &mut Chip8<D, I>, op: u16) {
    if cpu.ruleset.quirks.memory_increments_index {
        cpu.state.i = ((usize::from(cpu.state.i) + op.x() + 1) % MEMORY_SIZE) as u16;
    }
}

/// scroll down n lines
pub fn scd<D: Display, I: Input>(cpu: &mut Chip8<D, I>, op: u16) -> Executed {
    debug!("scrolling down {} lines", op.n());
    cpu.display.scroll_down(usize::from(op.n()));
    Ok(Flow::Next)
}

/// scroll right 4 columns
///
/// Columns are hires pixels, so lores moves 2.
pub fn scr<D: Display, I: Input>(cpu: &mut Chip8<D, I>, _op: u16) -> Executed {
    cpu.display.scroll_right(SCROLL_COLUMNS);
    Ok(Flow::Next)
}

/// scroll left 4 columns
///
/// Columns are hires pixels, so lores moves 2.
pub fn scl<D: Display, I: Input>(cpu: &mut Chip8<D, I>, _op: u16) -> Executed {
    cpu.display.scroll_left(SCROLL_COLUMNS);
    Ok(Flow::Next)
}

/// stop the interpreter
pub fn exit<D: Display, I: Input>(cpu: &mut Chip8<D, I>, _op: u16) -> Executed {
    info!("program exited at {:#05X}", cpu.current_pc());
    Ok(Flow::Exit)
}

/// 64x32 mode
pub fn lores<D: Display, I: Input>(cpu: &mut Chip8<D, I>, _op: u16) -> Executed {
    cpu.display.switch_resolution(false);
    Ok(Flow::Next)
}

/// 128x64 mode
pub fn hires<D: Display, I: Input>(cpu: &mut Chip8<D, I>, _op: u16) -> Executed {
    cpu.display.switch_resolution(true);
    Ok(Flow::Next)
}

/// I = location of the high-res glyph for Vx
pub fn ldhspr<D: Display, I: Input>(cpu: &mut Chip8<D, I>, op: u16) -> Executed {
    cpu.state.i = hires_glyph_addr(cpu.state.v[op.x()]);
    Ok(Flow::Next)
}

/// FLAGS[0..=x] = V0..=Vx
pub fn storf<D: Display, I: Input>(cpu: &mut Chip8<D, I>, op: u16) -> Executed {
    let x = flag_register(cpu, op)?;
    cpu.state.flags[..=x].copy_from_slice(&cpu.state.v[..=x]);
    Ok(Flow::Next)
}

/// V0..=Vx = FLAGS[0..=x]
pub fn readf<D: Display, I: Input>(cpu: &mut Chip8<D, I>, op: u16) -> Executed {
    let x = flag_register(cpu, op)?;
    cpu.state.v[..=x].copy_from_slice(&cpu.state.flags[..=x]);
    Ok(Flow::Next)
}

fn flag_register<D: Display, I: Input>(cpu: &Chip8<D, I>, op: u16) -> Result<usize, DecodeError> {
    if op.x() < FLAG_REGISTER_COUNT {
        Ok(op.x())
    } else {
        Err(DecodeError::FlagRegisterOutOfRange {
            opcode: op,
            pc: cpu.current_pc(),
            register: op.x(),
        })
    }
}
