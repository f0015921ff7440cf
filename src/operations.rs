use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH, FONT_GLYPH_SIZE, MEM_SIZE, STACK_DEPTH};
use crate::error::VmError;
use crate::state::{Keys, State};

/// clear the framebuffer
pub fn clr(state: &State) -> State {
    State {
        pc: state.pc + 0x2,
        frame_buffer: [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
        draw_flag: true,
        ..*state
    }
}

/// PC = STACK.pop() + 2
pub fn rts(state: &State) -> Result<State, VmError> {
    if state.sp == 0 {
        return Err(VmError::StackUnderflow);
    }
    let sp = state.sp - 0x1;
    Ok(State {
        pc: state.stack[sp as usize] + 0x2,
        sp,
        ..*state
    })
}

/// PC = nnn
pub fn jump(nnn: u16, state: &State) -> State {
    State { pc: nnn, ..*state }
}

/// STACK.push(PC); PC = nnn
pub fn call(nnn: u16, state: &State) -> Result<State, VmError> {
    if state.sp as usize >= STACK_DEPTH {
        return Err(VmError::StackOverflow { depth: STACK_DEPTH });
    }
    let mut stack = state.stack;
    stack[state.sp as usize] = state.pc;
    Ok(State {
        pc: nnn,
        sp: state.sp + 0x1,
        stack,
        ..*state
    })
}

/// if Vx == kk then skip the next instruction
pub fn ske(x: u8, kk: u8, state: &State) -> State {
    let mut pc = state.pc + 0x2;
    if state.v[x as usize] == kk {
        pc += 0x2;
    }
    State { pc, ..*state }
}

/// if Vx != kk then skip the next instruction
pub fn skne(x: u8, kk: u8, state: &State) -> State {
    let mut pc = state.pc + 0x2;
    if state.v[x as usize] != kk {
        pc += 0x2;
    }
    State { pc, ..*state }
}

/// if Vx == Vy then skip the next instruction
pub fn skre(x: u8, y: u8, state: &State) -> State {
    let mut pc = state.pc + 0x2;
    if state.v[x as usize] == state.v[y as usize] {
        pc += 0x2;
    }
    State { pc, ..*state }
}

/// Vx = kk
pub fn load(x: u8, kk: u8, state: &State) -> State {
    let mut v = state.v;
    v[x as usize] = kk;
    State {
        pc: state.pc + 0x2,
        v,
        ..*state
    }
}

/// Vx += kk, overflow dropped without setting a flag
pub fn add(x: u8, kk: u8, state: &State) -> State {
    let mut v = state.v;
    v[x as usize] = v[x as usize].wrapping_add(kk);
    State {
        pc: state.pc + 0x2,
        v,
        ..*state
    }
}

/// Vx = Vy
pub fn mv(x: u8, y: u8, state: &State) -> State {
    let mut v = state.v;
    v[x as usize] = v[y as usize];
    State {
        pc: state.pc + 0x2,
        v,
        ..*state
    }
}

/// Vx |= Vy
pub fn or(x: u8, y: u8, state: &State) -> State {
    let mut v = state.v;
    v[x as usize] |= v[y as usize];
    State {
        pc: state.pc + 0x2,
        v,
        ..*state
    }
}

/// Vx &= Vy
pub fn and(x: u8, y: u8, state: &State) -> State {
    let mut v = state.v;
    v[x as usize] &= v[y as usize];
    State {
        pc: state.pc + 0x2,
        v,
        ..*state
    }
}

/// Vx ^= Vy
pub fn xor(x: u8, y: u8, state: &State) -> State {
    let mut v = state.v;
    v[x as usize] ^= v[y as usize];
    State {
        pc: state.pc + 0x2,
        v,
        ..*state
    }
}

/// Vx += Vy; VF = carry
pub fn addr(x: u8, y: u8, state: &State) -> State {
    let (res, over) = state.v[x as usize].overflowing_add(state.v[y as usize]);
    let mut v = state.v;
    v[x as usize] = res;
    v[0xF] = if over { 0x1 } else { 0x0 };
    State {
        pc: state.pc + 0x2,
        v,
        ..*state
    }
}

/// Vx -= Vy; VF = NOT borrow
pub fn sub(x: u8, y: u8, state: &State) -> State {
    let (res, under) = state.v[x as usize].overflowing_sub(state.v[y as usize]);
    let mut v = state.v;
    v[x as usize] = res;
    v[0xF] = if under { 0x0 } else { 0x1 };
    State {
        pc: state.pc + 0x2,
        v,
        ..*state
    }
}

/// Vx >>= 1; VF = the bit shifted out
pub fn shr(x: u8, state: &State) -> State {
    let lsb = state.v[x as usize] & 0x1;
    let mut v = state.v;
    v[x as usize] >>= 1;
    v[0xF] = lsb;
    State {
        pc: state.pc + 0x2,
        v,
        ..*state
    }
}

/// Vx = Vy - Vx; VF = NOT borrow
pub fn subn(x: u8, y: u8, state: &State) -> State {
    let (res, under) = state.v[y as usize].overflowing_sub(state.v[x as usize]);
    let mut v = state.v;
    v[x as usize] = res;
    v[0xF] = if under { 0x0 } else { 0x1 };
    State {
        pc: state.pc + 0x2,
        v,
        ..*state
    }
}

/// Vx <<= 1; VF = the bit shifted out
pub fn shl(x: u8, state: &State) -> State {
    let msb = (state.v[x as usize] & 0x80) >> 7;
    let mut v = state.v;
    v[x as usize] <<= 1;
    v[0xF] = msb;
    State {
        pc: state.pc + 0x2,
        v,
        ..*state
    }
}

/// if Vx != Vy then skip the next instruction
pub fn skrne(x: u8, y: u8, state: &State) -> State {
    let mut pc = state.pc + 0x2;
    if state.v[x as usize] != state.v[y as usize] {
        pc += 0x2;
    }
    State { pc, ..*state }
}

/// I = nnn
pub fn loadi(nnn: u16, state: &State) -> State {
    State {
        pc: state.pc + 0x2,
        i: nnn,
        ..*state
    }
}

/// PC = nnn + V0
pub fn jumpi(nnn: u16, state: &State) -> State {
    State {
        pc: nnn + u16::from(state.v[0x0]),
        ..*state
    }
}

/// Vx = random byte & kk
pub fn random(x: u8, kk: u8, state: &State) -> State {
    let mut v = state.v;
    v[x as usize] = rand::random::<u8>() & kk;
    State {
        pc: state.pc + 0x2,
        v,
        ..*state
    }
}

/// draw_sprite(x=Vx y=Vy rows=n)
/// XORs the n-byte sprite at memory[I..] onto the framebuffer. The start
/// coordinate wraps modulo the screen size; rows and columns that fall off
/// the bottom or right edge are clipped. VF = 1 if any lit pixel was erased.
pub fn draw(x: u8, y: u8, n: u8, state: &State) -> State {
    let mut v = state.v;
    let mut frame_buffer = state.frame_buffer;

    let origin_x = state.v[x as usize] as usize % DISPLAY_WIDTH;
    let origin_y = state.v[y as usize] as usize % DISPLAY_HEIGHT;

    v[0xF] = 0x0;
    for row in 0..n as usize {
        let py = origin_y + row;
        if py >= DISPLAY_HEIGHT {
            break;
        }
        let sprite_byte = state.memory[(state.i as usize + row) % MEM_SIZE];
        for bit in 0..8 {
            let px = origin_x + bit;
            if px >= DISPLAY_WIDTH {
                break;
            }
            let pixel = (sprite_byte >> (7 - bit)) & 1;
            v[0xF] |= pixel & frame_buffer[py][px];
            frame_buffer[py][px] ^= pixel;
        }
    }

    State {
        pc: state.pc + 0x2,
        draw_flag: true,
        v,
        frame_buffer,
        ..*state
    }
}

/// if key Vx is pressed then skip the next instruction
pub fn skpr(x: u8, state: &State, keys: &Keys) -> State {
    let mut pc = state.pc + 0x2;
    if keys[(state.v[x as usize] & 0xF) as usize] {
        pc += 0x2;
    }
    State { pc, ..*state }
}

/// if key Vx is not pressed then skip the next instruction
pub fn skup(x: u8, state: &State, keys: &Keys) -> State {
    let mut pc = state.pc + 0x2;
    if !keys[(state.v[x as usize] & 0xF) as usize] {
        pc += 0x2;
    }
    State { pc, ..*state }
}

/// Vx = DT
pub fn moved(x: u8, state: &State) -> State {
    let mut v = state.v;
    v[x as usize] = state.delay_timer;
    State {
        pc: state.pc + 0x2,
        v,
        ..*state
    }
}

/// await a keypress into Vx
/// If a key is down, the lowest pressed index goes to Vx and PC advances.
/// Otherwise PC is left where it is and the instruction re-runs next cycle.
pub fn keyd(x: u8, state: &State, keys: &Keys) -> State {
    match keys.iter().position(|&pressed| pressed) {
        Some(key) => {
            let mut v = state.v;
            v[x as usize] = key as u8;
            State {
                pc: state.pc + 0x2,
                v,
                ..*state
            }
        }
        None => *state,
    }
}

/// DT = Vx
pub fn loads(x: u8, state: &State) -> State {
    State {
        pc: state.pc + 0x2,
        delay_timer: state.v[x as usize],
        ..*state
    }
}

/// ST = Vx
pub fn loadst(x: u8, state: &State) -> State {
    State {
        pc: state.pc + 0x2,
        sound_timer: state.v[x as usize],
        ..*state
    }
}

/// I += Vx, masked to the 12-bit address space
pub fn addi(x: u8, state: &State) -> State {
    State {
        pc: state.pc + 0x2,
        i: (state.i + u16::from(state.v[x as usize])) & 0xFFF,
        ..*state
    }
}

/// I = Vx * 5, the font sprite address for hex digit Vx
pub fn ldspr(x: u8, state: &State) -> State {
    State {
        pc: state.pc + 0x2,
        i: u16::from(state.v[x as usize]) * FONT_GLYPH_SIZE,
        ..*state
    }
}

/// mem[I..I+3] = the decimal digits of Vx
pub fn bcd(x: u8, state: &State) -> State {
    let vx = state.v[x as usize];
    let i = state.i as usize;
    let mut memory = state.memory;
    memory[i % MEM_SIZE] = vx / 100;
    memory[(i + 1) % MEM_SIZE] = vx / 10 % 10;
    memory[(i + 2) % MEM_SIZE] = vx % 10;
    State {
        pc: state.pc + 0x2,
        memory,
        ..*state
    }
}

/// mem[I..=I+x] = V0..=Vx
pub fn stor(x: u8, state: &State) -> State {
    let i = state.i as usize;
    let mut memory = state.memory;
    for offset in 0..=x as usize {
        memory[(i + offset) % MEM_SIZE] = state.v[offset];
    }
    State {
        pc: state.pc + 0x2,
        memory,
        ..*state
    }
}

/// V0..=Vx = mem[I..=I+x]
pub fn read(x: u8, state: &State) -> State {
    let i = state.i as usize;
    let mut v = state.v;
    for offset in 0..=x as usize {
        v[offset] = state.memory[(i + offset) % MEM_SIZE];
    }
    State {
        pc: state.pc + 0x2,
        v,
        ..*state
    }
}
