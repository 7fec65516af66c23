/// The delay and sound timers. Both count down once per tick, independent
/// of how many instructions the tick executes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Timers {
    pub(super) delay: u8,
    pub(super) sound: u8,
}

impl Timers {
    pub fn new() -> Self {
        Timers::default()
    }

    /// Decrements both timers by one, stopping at zero.
    pub fn decrement(&mut self) {
        self.delay = self.delay.saturating_sub(1);
        self.sound = self.sound.saturating_sub(1);
    }

    pub fn delay(&self) -> u8 {
        self.delay
    }

    pub fn sound(&self) -> u8 {
        self.sound
    }

    /// Whoever produces the sound should do so while this holds.
    pub fn is_sounding(&self) -> bool {
        self.sound > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decrement_floors_at_zero() {
        let mut timers = Timers { delay: 1, sound: 0 };
        timers.decrement();
        assert_eq!(timers, Timers { delay: 0, sound: 0 });
        timers.decrement();
        assert_eq!(timers, Timers { delay: 0, sound: 0 });
    }

    #[test]
    fn test_sounding() {
        let mut timers = Timers { delay: 0, sound: 2 };
        assert!(timers.is_sounding());
        timers.decrement();
        timers.decrement();
        assert!(!timers.is_sounding());
    }
}
