use crate::chip::chip8::constants::CHIP8_TICKS_PER_FRAME;

/// Tunables of a `Chip8` that survive re-initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chip8Config {
    /// Upper bound of instructions executed by a single `tick`. The
    /// effective clock rate is this value times the rate at which the
    /// host calls `tick`.
    pub instructions_per_tick: usize,
}

impl Default for Chip8Config {
    fn default() -> Self {
        Chip8Config {
            instructions_per_tick: CHIP8_TICKS_PER_FRAME,
        }
    }
}
