use crate::chip::chip8::constants::{
    CHIP8_ADDRESS_MASK, CHIP8_CHARSET, CHIP8_CHARSET_OFFSET, CHIP8_MAX_PROGRAM_SIZE,
    CHIP8_MEMORY_SIZE, CHIP8_PROGRAM_OFFSET,
};

/// The 4096 bytes of main memory. All accesses are masked to 12 bits, so
/// there is no such thing as an out of bounds address.
pub struct Memory {
    bytes: [u8; CHIP8_MEMORY_SIZE],
}

impl Memory {
    /// Zeroed memory with the charset written to `CHIP8_CHARSET_OFFSET`.
    pub fn new() -> Self {
        let mut memory = Memory {
            bytes: [0; CHIP8_MEMORY_SIZE],
        };
        for (i, byte) in CHIP8_CHARSET.iter().enumerate() {
            memory.write(CHIP8_CHARSET_OFFSET + i as u16, *byte);
        }
        memory
    }

    pub fn read(&self, address: u16) -> u8 {
        self.bytes[(address & CHIP8_ADDRESS_MASK) as usize]
    }

    pub fn write(&mut self, address: u16, byte: u8) {
        self.bytes[(address & CHIP8_ADDRESS_MASK) as usize] = byte;
    }

    /// Reads the big-endian word at `address`. The second byte wraps around
    /// to address 0 when `address` is 0xFFF.
    pub fn read_word(&self, address: u16) -> u16 {
        u16::from_be_bytes([self.read(address), self.read(address.wrapping_add(1))])
    }

    /// Copies `program` to `CHIP8_PROGRAM_OFFSET`, dropping everything past
    /// `CHIP8_MAX_PROGRAM_SIZE` bytes. Returns the number of bytes copied.
    pub(super) fn load_program(&mut self, program: &[u8]) -> usize {
        let len = program.len().min(CHIP8_MAX_PROGRAM_SIZE);
        let start = CHIP8_PROGRAM_OFFSET as usize;
        self.bytes[start..start + len].copy_from_slice(&program[..len]);
        len
    }
}

impl Default for Memory {
    fn default() -> Self {
        Memory::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_charset_at_zero_rest_zeroed() {
        let m = Memory::new();
        assert_eq!(m.bytes[..0x50], CHIP8_CHARSET[..]);
        assert!(m.bytes[0x50..].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_addresses_are_masked() {
        let mut m = Memory::new();
        m.write(0x1234, 0xAB);
        assert_eq!(m.read(0x234), 0xAB);
        assert_eq!(m.read(0xF234), 0xAB);
    }

    #[test]
    fn test_read_word_wraps() {
        let mut m = Memory::new();
        m.write(0xFFF, 0x12);
        assert_eq!(m.read_word(0xFFF), 0x12F0);
    }

    #[test]
    fn test_load_program_truncates() {
        let mut m = Memory::new();
        let program = vec![0xAA; CHIP8_MAX_PROGRAM_SIZE + 1];
        assert_eq!(m.load_program(&program), CHIP8_MAX_PROGRAM_SIZE);
        assert_eq!(m.read(0x200), 0xAA);
        assert_eq!(m.read(0xFFF), 0xAA);
        // nothing wrapped around into the charset
        assert_eq!(m.read(0x000), 0xF0);
    }
}
