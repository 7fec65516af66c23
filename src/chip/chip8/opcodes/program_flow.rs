use ux::u4;

use crate::chip::{
    chip8::{
        opcodes::{Flow, Instruction},
        util, Chip8,
    },
    MachineFault,
};

pub(super) fn execute(instruction: &Instruction, state: &mut Chip8) -> Result<Flow, MachineFault> {
    match *instruction {
        Instruction::Jmp { address } => {
            util::jump_to(state, u16::from(address));
        }
        Instruction::Call { address } => {
            let caller = state.registers.program_counter;
            if !state.registers.stack.push(caller) {
                return Err(MachineFault::StackOverflow { address: caller });
            }
            util::jump_to(state, u16::from(address));
        }
        Instruction::Se { x, value } => {
            let condition = state.registers.get(x) == value;
            util::conditional_skip(state, condition);
        }
        Instruction::Sne { x, value } => {
            let condition = state.registers.get(x) != value;
            util::conditional_skip(state, condition);
        }
        Instruction::Sre { x, y } => {
            let condition = state.registers.get(x) == state.registers.get(y);
            util::conditional_skip(state, condition);
        }
        Instruction::Srne { x, y } => {
            let condition = state.registers.get(x) != state.registers.get(y);
            util::conditional_skip(state, condition);
        }
        Instruction::Jmpr { address } => {
            let offset = state.registers.get(u4::new(0)) as u16;
            util::jump_to(state, u16::from(address).wrapping_add(offset));
        }
        Instruction::Skp { x } => {
            let condition = state.input.is_pressed(state.registers.get(x));
            util::conditional_skip(state, condition);
        }
        Instruction::Sknp { x } => {
            let condition = !state.input.is_pressed(state.registers.get(x));
            util::conditional_skip(state, condition);
        }
        _ => unreachable!("{} is not a program flow instruction", instruction),
    }
    Ok(Flow::Next)
}
