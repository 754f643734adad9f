//! LedMatrix: the emulated 16x8 LED display.
//!
//! Pure state, no I/O. Apps drive it through the engine's `Display` trait and
//! the terminal view reads pixels back out of it.

use badge_tetris_engine::Display;

use crate::font::{text_columns, GLYPH_HEIGHT};
use crate::types::{DisplayBuf, DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// Top pixel row of scrolled text.
const TEXT_ROW: usize = (DISPLAY_HEIGHT - GLYPH_HEIGHT) / 2;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Mode {
    /// Text columns, padded with one blank screen so the text wraps cleanly.
    Scroll {
        text: String,
        columns: Vec<u8>,
        offset: usize,
    },
    Packed(DisplayBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedMatrix {
    mode: Mode,
}

impl Default for LedMatrix {
    fn default() -> Self {
        Self {
            mode: Mode::Packed([0; DISPLAY_WIDTH]),
        }
    }
}

impl LedMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text being scrolled, if in text mode.
    pub fn text(&self) -> Option<&str> {
        match &self.mode {
            Mode::Scroll { text, .. } => Some(text),
            Mode::Packed(_) => None,
        }
    }

    /// Move scrolled text one column left. No effect in packed mode.
    pub fn advance_scroll(&mut self) {
        if let Mode::Scroll {
            columns, offset, ..
        } = &mut self.mode
        {
            if !columns.is_empty() {
                *offset = (*offset + 1) % columns.len();
            }
        }
    }

    /// What the LEDs show right now.
    pub fn frame(&self) -> DisplayBuf {
        match &self.mode {
            Mode::Packed(buf) => *buf,
            Mode::Scroll {
                columns, offset, ..
            } => {
                let mut buf = [0; DISPLAY_WIDTH];
                if columns.is_empty() {
                    return buf;
                }
                for (i, col) in buf.iter_mut().enumerate() {
                    *col = columns[(offset + i) % columns.len()] << TEXT_ROW;
                }
                buf
            }
        }
    }

    /// LED at display column `x`, row `y`.
    pub fn is_lit(frame: &DisplayBuf, x: usize, y: usize) -> bool {
        x < DISPLAY_WIDTH && y < DISPLAY_HEIGHT && frame[x] & (1 << y) != 0
    }
}

impl Display for LedMatrix {
    fn set_mode_scroll_text(&mut self, text: &str) {
        if self.text() == Some(text) {
            return;
        }
        let mut columns = text_columns(text);
        columns.extend(std::iter::repeat(0).take(DISPLAY_WIDTH));
        self.mode = Mode::Scroll {
            text: text.to_string(),
            columns,
            offset: 0,
        };
    }

    fn set_mode_fixed_packed(&mut self, buf: &DisplayBuf) {
        self.mode = Mode::Packed(*buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::glyph_columns;

    #[test]
    fn test_packed_passthrough() {
        let mut m = LedMatrix::new();
        let mut buf = [0; DISPLAY_WIDTH];
        buf[0] = 0b1000_0001;
        m.set_mode_fixed_packed(&buf);
        let frame = m.frame();
        assert!(LedMatrix::is_lit(&frame, 0, 0));
        assert!(LedMatrix::is_lit(&frame, 0, 7));
        assert!(!LedMatrix::is_lit(&frame, 1, 0));
        assert!(!LedMatrix::is_lit(&frame, 16, 0));
        assert_eq!(m.text(), None);
    }

    #[test]
    fn test_scroll_moves_left_and_wraps() {
        let mut m = LedMatrix::new();
        m.set_mode_scroll_text("I");
        let first = glyph_columns('I');
        assert_eq!(m.frame()[0], first[0] << TEXT_ROW);

        m.advance_scroll();
        assert_eq!(m.frame()[0], first[1] << TEXT_ROW);

        // One glyph, one spacer, one blank screen.
        for _ in 0..(4 + DISPLAY_WIDTH - 1) {
            m.advance_scroll();
        }
        assert_eq!(m.frame()[0], first[0] << TEXT_ROW);
    }

    #[test]
    fn test_same_text_keeps_scroll_position() {
        let mut m = LedMatrix::new();
        m.set_mode_scroll_text("Ready?");
        m.advance_scroll();
        let before = m.frame();
        m.set_mode_scroll_text("Ready?");
        assert_eq!(m.frame(), before);
        assert_eq!(m.text(), Some("Ready?"));
    }
}
