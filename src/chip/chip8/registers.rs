use ux::u4;

use crate::chip::chip8::constants::{
    CHIP8_ADDRESS_MASK, CHIP8_FLAG_REGISTER, CHIP8_PROGRAM_OFFSET, CHIP8_STACK_DEPTH,
};

/// The general purpose registers V0..VF, the index register, the program
/// counter and the call stack.
pub struct RegisterFile {
    /// 16 registers where each can store one byte. VF doubles as carry,
    /// borrow and collision flag.
    v: [u8; 16],

    /// The index register. Only the lower 12 bits survive a step.
    pub(super) index: u16,

    /// The program counter. Only the lower 12 bits survive a step.
    pub(super) program_counter: u16,

    pub(super) stack: CallStack,
}

impl RegisterFile {
    pub fn new() -> Self {
        RegisterFile {
            v: [0; 16],
            index: 0,
            program_counter: CHIP8_PROGRAM_OFFSET,
            stack: CallStack::new(),
        }
    }

    pub fn get(&self, reg: u4) -> u8 {
        self.v[usize::from(u8::from(reg))]
    }

    pub fn set(&mut self, reg: u4, value: u8) {
        self.v[usize::from(u8::from(reg))] = value;
    }

    pub fn set_flag(&mut self, flag: bool) {
        self.v[CHIP8_FLAG_REGISTER] = flag as u8;
    }

    /// Clamps the program counter and the index register to 12 bits.
    pub(super) fn mask_addresses(&mut self) {
        self.program_counter &= CHIP8_ADDRESS_MASK;
        self.index &= CHIP8_ADDRESS_MASK;
    }
}

impl Default for RegisterFile {
    fn default() -> Self {
        RegisterFile::new()
    }
}

/// Fixed size stack of return addresses.
pub struct CallStack {
    frames: [u16; CHIP8_STACK_DEPTH],
    pointer: usize,
}

impl CallStack {
    pub fn new() -> Self {
        CallStack {
            frames: [0; CHIP8_STACK_DEPTH],
            pointer: 0,
        }
    }

    /// Saves `address`. Returns false and leaves the stack untouched if
    /// all frames are in use.
    pub fn push(&mut self, address: u16) -> bool {
        if self.pointer == CHIP8_STACK_DEPTH {
            return false;
        }
        self.frames[self.pointer] = address;
        self.pointer += 1;
        true
    }

    pub fn pop(&mut self) -> Option<u16> {
        if self.pointer == 0 {
            return None;
        }
        self.pointer -= 1;
        Some(self.frames[self.pointer])
    }

    pub fn depth(&self) -> usize {
        self.pointer
    }
}

impl Default for CallStack {
    fn default() -> Self {
        CallStack::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stack_is_bounded() {
        let mut stack = CallStack::new();
        for i in 0..CHIP8_STACK_DEPTH as u16 {
            assert!(stack.push(0x200 + 2 * i));
        }
        assert!(!stack.push(0xABC));
        assert_eq!(stack.depth(), CHIP8_STACK_DEPTH);
        assert_eq!(stack.pop(), Some(0x21E));
    }

    #[test]
    fn test_pop_empty() {
        let mut stack = CallStack::new();
        assert_eq!(stack.pop(), None);
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn test_mask_addresses() {
        let mut registers = RegisterFile::new();
        registers.program_counter = 0x1002;
        registers.index = 0xFFFF;
        registers.mask_addresses();
        assert_eq!(registers.program_counter, 0x002);
        assert_eq!(registers.index, 0xFFF);
    }

    #[test]
    fn test_flag_register_is_vf() {
        let mut registers = RegisterFile::new();
        registers.set_flag(true);
        assert_eq!(registers.get(u4::new(0xF)), 1);
    }
}
