use log::warn;

use crate::chip::{
    chip8::{
        opcodes::{Flow, Instruction},
        Chip8,
    },
    MachineFault,
};

pub(super) fn execute(instruction: &Instruction, state: &mut Chip8) -> Result<Flow, MachineFault> {
    match *instruction {
        Instruction::Cls => {
            state.display.clear();
        }
        Instruction::Ret => {
            let address = state.registers.program_counter;
            let caller = state
                .registers
                .stack
                .pop()
                .ok_or(MachineFault::StackUnderflow { address })?;
            // the caller's address is the CALL itself, so the regular
            // advance lands on the instruction following it
            state.registers.program_counter = caller;
        }
        Instruction::Unknown(word) => {
            warn!(
                "Unimplemented opcode {:04X} at {:#05X}, ignoring it",
                word, state.registers.program_counter
            );
        }
        _ => unreachable!("{} is not a system instruction", instruction),
    }
    Ok(Flow::Next)
}
