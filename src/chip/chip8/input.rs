use ux::u4;

/// The 16 key states plus the slot used by the wait-for-key instruction.
pub struct InputLatch {
    keys: [bool; 16],

    /// Set while a wait-for-key instruction waits for a press.
    waiting: bool,

    /// The key whose press satisfied the last wait, until the waiting
    /// instruction consumes it.
    captured: Option<u8>,
}

impl InputLatch {
    pub fn new() -> Self {
        InputLatch {
            keys: [false; 16],
            waiting: false,
            captured: None,
        }
    }

    /// Records the new state of `key`. Returns true if this was the press
    /// a wait-for-key instruction was waiting for.
    pub fn set(&mut self, key: u4, pressed: bool) -> bool {
        let key = u8::from(key);
        self.keys[usize::from(key)] = pressed;
        if pressed && self.waiting {
            self.waiting = false;
            self.captured = Some(key);
            return true;
        }
        false
    }

    pub fn release_all(&mut self) {
        self.keys = [false; 16];
    }

    /// Only the low nibble of `key` selects the key.
    pub fn is_pressed(&self, key: u8) -> bool {
        self.keys[usize::from(key & 0xF)]
    }

    pub(super) fn begin_wait(&mut self) {
        self.waiting = true;
        self.captured = None;
    }

    pub(super) fn take_captured(&mut self) -> Option<u8> {
        self.captured.take()
    }

    /// Drops a pending wait but keeps the key states, which mirror the
    /// physical keyboard.
    pub(super) fn cancel_wait(&mut self) {
        self.waiting = false;
        self.captured = None;
    }
}

impl Default for InputLatch {
    fn default() -> Self {
        InputLatch::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_without_wait_is_not_captured() {
        let mut latch = InputLatch::new();
        assert!(!latch.set(u4::new(0xA), true));
        assert!(latch.is_pressed(0xA));
        assert!(latch.is_pressed(0x1A));
        assert_eq!(latch.take_captured(), None);
    }

    #[test]
    fn test_wait_captures_first_press_only() {
        let mut latch = InputLatch::new();
        latch.begin_wait();
        assert!(!latch.set(u4::new(0x3), false));
        assert!(latch.waiting);
        assert!(latch.set(u4::new(0x7), true));
        assert!(!latch.waiting);
        assert!(!latch.set(u4::new(0x8), true));
        assert_eq!(latch.take_captured(), Some(0x7));
        assert_eq!(latch.take_captured(), None);
    }

    #[test]
    fn test_release_all() {
        let mut latch = InputLatch::new();
        latch.set(u4::new(0x0), true);
        latch.set(u4::new(0xF), true);
        latch.release_all();
        assert!((0..16).all(|k| !latch.is_pressed(k)));
    }
}
