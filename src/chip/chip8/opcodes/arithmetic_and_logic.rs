use ux::u4;

use crate::chip::{
    chip8::{
        constants::{CHIP8_CHARSET_OFFSET, CHIP8_GLYPH_HEIGHT},
        opcodes::{AluOp, Flow, Instruction, LoadOp},
        Chip8,
    },
    MachineFault,
};

pub(super) fn execute(instruction: &Instruction, state: &mut Chip8) -> Result<Flow, MachineFault> {
    match *instruction {
        Instruction::Ldr { x, value } => {
            state.registers.set(x, value);
        }
        Instruction::Add { x, value } => {
            let result = state.registers.get(x).wrapping_add(value);
            state.registers.set(x, result);
        }
        Instruction::Reg { op, x, y } => execute_alu(op, x, y, state),
        Instruction::Ld { address } => {
            state.registers.index = u16::from(address);
        }
        Instruction::Rnd { x, mask } => {
            let sample = state.random.next_byte();
            state.registers.set(x, sample & mask);
        }
        Instruction::Drw { x, y, rows } => {
            let rows = usize::from(u8::from(rows));
            let mut sprite = [0u8; 15];
            for (i, row) in sprite[..rows].iter_mut().enumerate() {
                *row = state
                    .memory
                    .read(state.registers.index.wrapping_add(i as u16));
            }

            let x = state.registers.get(x);
            let y = state.registers.get(y);
            let collision = state.display.draw_sprite(x, y, &sprite[..rows]);
            state.registers.set_flag(collision);
        }
        Instruction::Ldu { op, x } => return execute_load(op, x, state),
        _ => unreachable!("{} is not an arithmetic instruction", instruction),
    }
    Ok(Flow::Next)
}

/// Executes the register to register operations of class 0x8. The flag,
/// if the operation produces one, is computed from the operands before
/// either is written and lands in VF before Vx is written, so that for
/// x = F the result wins.
fn execute_alu(op: AluOp, x: u4, y: u4, state: &mut Chip8) {
    fn modify_registers(state: &mut Chip8, x: u4, y: u4, f: fn(u8, u8) -> (u8, Option<bool>)) {
        let (val, flag) = f(state.registers.get(x), state.registers.get(y));
        if let Some(flag) = flag {
            state.registers.set_flag(flag);
        }
        state.registers.set(x, val);
    }

    // The shifts only look at Vx; y is decoded but unused.
    match op {
        AluOp::Copy => modify_registers(state, x, y, |_, vy| (vy, None)),
        AluOp::Or => modify_registers(state, x, y, |vx, vy| (vx | vy, None)),
        AluOp::And => modify_registers(state, x, y, |vx, vy| (vx & vy, None)),
        AluOp::Xor => modify_registers(state, x, y, |vx, vy| (vx ^ vy, None)),
        AluOp::Add => modify_registers(state, x, y, |vx, vy| {
            let (result, overflow) = vx.overflowing_add(vy);
            (result, Some(overflow))
        }),
        AluOp::Sub => modify_registers(state, x, y, |vx, vy| (vx.wrapping_sub(vy), Some(vx > vy))),
        AluOp::Shr => modify_registers(state, x, y, |vx, _| (vx >> 1, Some(vx & 1 != 0))),
        AluOp::Subn => modify_registers(state, x, y, |vx, vy| (vy.wrapping_sub(vx), Some(vx < vy))),
        AluOp::Shl => modify_registers(state, x, y, |vx, _| (vx << 1, Some(vx & 0x80 != 0))),
    };
}

/// Executes the operations of class 0xF.
fn execute_load(op: LoadOp, x: u4, state: &mut Chip8) -> Result<Flow, MachineFault> {
    let index = state.registers.index;
    match op {
        LoadOp::ReadDelay => {
            state.registers.set(x, state.timers.delay);
        }
        LoadOp::WaitKey => match state.input.take_captured() {
            Some(key) => state.registers.set(x, key),
            None => {
                // the program counter stays here, so the instruction runs
                // again once a key press resumed execution
                state.input.begin_wait();
                return Ok(Flow::Suspend);
            }
        },
        LoadOp::SetDelay => {
            state.timers.delay = state.registers.get(x);
        }
        LoadOp::SetSound => {
            state.timers.sound = state.registers.get(x);
        }
        LoadOp::AddIndex => {
            state.registers.index = index.wrapping_add(state.registers.get(x) as u16);
        }
        LoadOp::Glyph => {
            let character = state.registers.get(x) as u16;
            state.registers.index = CHIP8_CHARSET_OFFSET + character * CHIP8_GLYPH_HEIGHT;
        }
        LoadOp::Bcd => {
            let value = state.registers.get(x);
            state.memory.write(index, value / 100);
            state.memory.write(index.wrapping_add(1), (value / 10) % 10);
            state.memory.write(index.wrapping_add(2), value % 10);
        }
        LoadOp::Store => {
            for reg in 0..=u8::from(x) {
                let value = state.registers.get(u4::new(reg));
                state.memory.write(index.wrapping_add(reg as u16), value);
            }
        }
        LoadOp::Load => {
            for reg in 0..=u8::from(x) {
                let value = state.memory.read(index.wrapping_add(reg as u16));
                state.registers.set(u4::new(reg), value);
            }
        }
    }
    Ok(Flow::Next)
}
