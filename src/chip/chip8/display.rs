use crate::chip::chip8::constants::{CHIP8_HEIGHT, CHIP8_WIDTH};

/// The monochrome 64x32 pixel grid. Pixels are stored row-major, i.e.,
/// the pixel at `(x, y)` lives at index `x + y * CHIP8_WIDTH`.
pub struct Framebuffer {
    pixels: [bool; CHIP8_WIDTH * CHIP8_HEIGHT],

    /// Set whenever a pixel changes, so that renderers only redraw when
    /// needed.
    dirty: bool,
}

impl Framebuffer {
    pub fn new() -> Self {
        Framebuffer {
            pixels: [false; CHIP8_WIDTH * CHIP8_HEIGHT],
            dirty: true,
        }
    }

    pub fn clear(&mut self) {
        self.pixels = [false; CHIP8_WIDTH * CHIP8_HEIGHT];
        self.dirty = true;
    }

    /// XORs the sprite onto the grid with its top left corner at `(x, y)`.
    /// Each byte of `sprite` is one row of 8 pixels, most significant bit
    /// first. Coordinates wrap on both axes. Returns true iff a pixel that
    /// was set got cleared.
    pub fn draw_sprite(&mut self, x: u8, y: u8, sprite: &[u8]) -> bool {
        let mut collision = false;
        for (row, byte) in sprite.iter().enumerate() {
            for column in 0..8 {
                let bit = (byte >> (7 - column)) & 1 == 1;
                if !bit {
                    continue;
                }
                let pos = translate(x as usize + column, y as usize + row);
                collision |= self.pixels[pos];
                self.pixels[pos] ^= true;
                self.dirty = true;
            }
        }
        collision
    }

    /// Returns the pixel at `(x, y)`, wrapping out of range coordinates.
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        self.pixels[translate(x, y)]
    }

    pub fn pixels(&self) -> &[bool] {
        &self.pixels
    }

    /// Returns whether the grid changed since the last call.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }
}

impl Default for Framebuffer {
    fn default() -> Self {
        Framebuffer::new()
    }
}

fn translate(x: usize, y: usize) -> usize {
    (x % CHIP8_WIDTH) + (y % CHIP8_HEIGHT) * CHIP8_WIDTH
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_wraps_on_both_axes() {
        let mut fb = Framebuffer::new();
        let collision = fb.draw_sprite(63, 31, &[0xC0]);
        assert!(!collision);
        assert!(fb.pixel(63, 31));
        assert!(fb.pixel(0, 31));
        assert_eq!(fb.pixels().iter().filter(|p| **p).count(), 2);

        fb.clear();
        fb.draw_sprite(62, 31, &[0x20, 0x20]);
        assert!(fb.pixel(0, 31));
        assert!(fb.pixel(0, 0));
    }

    #[test]
    fn test_collision_only_when_pixel_cleared() {
        let mut fb = Framebuffer::new();
        assert!(!fb.draw_sprite(0, 0, &[0xF0]));
        // overlapping with zero bits leaves set pixels alone
        assert!(!fb.draw_sprite(0, 0, &[0x0F]));
        assert!(fb.pixel(3, 0));
        assert!(fb.draw_sprite(0, 0, &[0x80]));
        assert!(!fb.pixel(0, 0));
        assert!(fb.pixel(1, 0));
    }

    #[test]
    fn test_dirty_tracking() {
        let mut fb = Framebuffer::new();
        assert!(fb.take_dirty());
        assert!(!fb.take_dirty());
        fb.draw_sprite(10, 10, &[0x00]);
        assert!(!fb.take_dirty());
        fb.draw_sprite(10, 10, &[0x01]);
        assert!(fb.take_dirty());
    }
}
