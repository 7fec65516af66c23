use crate::chip::chip8::Chip8;

/// Skips the next instruction if `condition` holds. The step adds the
/// regular advance on top.
pub fn conditional_skip(state: &mut Chip8, condition: bool) {
    if condition {
        increment_program_counter(state);
    }
}

pub fn increment_program_counter(state: &mut Chip8) {
    state.registers.program_counter = state.registers.program_counter.wrapping_add(2);
}

/// Makes `target` the next instruction. The step unconditionally advances
/// the program counter by 2 after every instruction, so this stores
/// `target - 2`.
pub fn jump_to(state: &mut Chip8, target: u16) {
    state.registers.program_counter = target.wrapping_sub(2);
}
