/// Size of the addressable memory in bytes.
pub(crate) const CHIP8_MEMORY_SIZE: usize = 0x1000;

/// Every memory access, the index register and the program counter are
/// masked to 12 bits.
pub(crate) const CHIP8_ADDRESS_MASK: u16 = 0x0FFF;

/// Programs are loaded and started at this address.
pub(crate) const CHIP8_PROGRAM_OFFSET: u16 = 0x200;

/// Everything above the program offset is available to the program.
pub(crate) const CHIP8_MAX_PROGRAM_SIZE: usize = 0xE00;

pub(crate) const CHIP8_CHARSET_OFFSET: u16 = 0x00;

/// Every glyph of the charset is 5 rows high.
pub(crate) const CHIP8_GLYPH_HEIGHT: u16 = 5;

pub(crate) const CHIP8_CHARSET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

/// Width of the display in pixels.
pub const CHIP8_WIDTH: usize = 64;

/// Height of the display in pixels.
pub const CHIP8_HEIGHT: usize = 32;

/// Maximum number of return addresses the call stack can hold.
pub(crate) const CHIP8_STACK_DEPTH: usize = 16;

/// Default number of instructions executed per tick.
pub const CHIP8_TICKS_PER_FRAME: usize = 50;

/// Index of the flag register VF.
pub(crate) const CHIP8_FLAG_REGISTER: usize = 0xF;
