use rand::{thread_rng, Rng};

/// Supplies the bytes for the random instruction.
pub trait RandomSource: Send {
    fn next_byte(&mut self) -> u8;
}

/// Draws from the thread local generator of the `rand` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_byte(&mut self) -> u8 {
        thread_rng().gen::<u8>()
    }
}
