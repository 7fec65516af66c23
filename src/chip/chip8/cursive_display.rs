use cursive::{
    theme::{BaseColor, Color, ColorStyle},
    view::View,
    Printer, Vec2,
};
use log::error;

use crate::chip::{
    chip8::{Chip8, CHIP8_HEIGHT, CHIP8_WIDTH},
    Chip, ChipWithCursiveDisplay,
};

/// Name under which the display is registered with cursive.
pub const DISPLAY_VIEW_NAME: &str = "chip8-display";

/// Represents the display of the CHIP-8
pub struct Display {
    pixels: [bool; CHIP8_WIDTH * CHIP8_HEIGHT],
}

impl Display {
    /// Creates a new display from a row-major slice of pixels. Missing
    /// pixels stay dark, surplus pixels are ignored.
    pub fn new(pixels: &[bool]) -> Self {
        let mut tmp = [false; CHIP8_WIDTH * CHIP8_HEIGHT];
        let len = pixels.len().min(tmp.len());
        tmp[..len].copy_from_slice(&pixels[..len]);
        Display { pixels: tmp }
    }
}

impl Default for Display {
    fn default() -> Self {
        Self::new(&[false; CHIP8_WIDTH * CHIP8_HEIGHT])
    }
}

/// Implements cursive::view::View for Display to enable drawing it
/// as a View out of the box.
impl View for Display {
    fn draw(&self, printer: &Printer) {
        printer.with_color(
            ColorStyle::new(Color::Dark(BaseColor::Black), Color::RgbLowRes(5, 5, 5)),
            |printer| {
                for y in 0..CHIP8_HEIGHT {
                    for x in 0..CHIP8_WIDTH {
                        if self.pixels[x + CHIP8_WIDTH * y] {
                            printer.print((x, y), " ");
                        }
                    }
                }
            },
        );
    }

    fn required_size(&mut self, _: Vec2) -> Vec2 {
        Vec2 {
            x: CHIP8_WIDTH,
            y: CHIP8_HEIGHT,
        }
    }
}

impl ChipWithCursiveDisplay for Chip8 {
    fn update_ui(&mut self, gfx_sink: &cursive::CbSink) {
        if !self.take_redraw() {
            return;
        }
        let display = Display::new(self.framebuffer());
        let sent = gfx_sink.send(Box::new(move |s: &mut cursive::Cursive| {
            s.call_on_name(DISPLAY_VIEW_NAME, |view: &mut Display| *view = display);
        }));
        if sent.is_err() {
            error!("Sending updated display failed, the UI is gone");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_from_short_slice() {
        let display = Display::new(&[true, false, true]);
        assert!(display.pixels[0]);
        assert!(!display.pixels[1]);
        assert!(display.pixels[2]);
        assert!(!display.pixels[3]);
    }
}
