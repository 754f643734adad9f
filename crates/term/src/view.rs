//! MatrixView: lays the LED matrix and a status panel out on a canvas.
//!
//! Pure, no I/O.

use crate::canvas::{Canvas, Tone};
use crate::matrix::LedMatrix;
use crate::types::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

pub const KEY_HINT: &str = "arrows move  enter OK  esc BACK  b long-BACK  q quit";

pub struct MatrixView {
    /// Terminal columns per LED.
    led_w: u16,
}

impl Default for MatrixView {
    fn default() -> Self {
        // Two columns per LED keeps the pixels roughly square.
        Self { led_w: 2 }
    }
}

impl MatrixView {
    pub fn new(led_w: u16) -> Self {
        Self { led_w: led_w.max(1) }
    }

    /// Size of the bezel including the matrix.
    pub fn bezel_size(&self) -> (u16, u16) {
        (
            DISPLAY_WIDTH as u16 * self.led_w + 2,
            DISPLAY_HEIGHT as u16 + 2,
        )
    }

    /// Draw the matrix centered in `viewport`, with `status` lines under it.
    pub fn render(
        &self,
        matrix: &LedMatrix,
        status: &[&str],
        viewport: Viewport,
        canvas: &mut Canvas,
    ) {
        canvas.resize(viewport.width, viewport.height);
        canvas.clear();

        let (bezel_w, bezel_h) = self.bezel_size();
        let block_h = bezel_h + 1 + status.len() as u16 + 1;
        let x0 = viewport.width.saturating_sub(bezel_w) / 2;
        let y0 = viewport.height.saturating_sub(block_h) / 2;

        self.draw_bezel(canvas, x0, y0, bezel_w, bezel_h);

        let frame = matrix.frame();
        for y in 0..DISPLAY_HEIGHT {
            for x in 0..DISPLAY_WIDTH {
                let (ch, tone) = if LedMatrix::is_lit(&frame, x, y) {
                    ('█', Tone::LedOn)
                } else {
                    ('·', Tone::LedOff)
                };
                let cx = x0 + 1 + x as u16 * self.led_w;
                for dx in 0..self.led_w {
                    canvas.put(cx + dx, y0 + 1 + y as u16, ch, tone);
                }
            }
        }

        let mut y = y0 + bezel_h + 1;
        for line in status {
            canvas.put_str(centered(line, viewport.width), y, line, Tone::Label);
            y += 1;
        }
        canvas.put_str(centered(KEY_HINT, viewport.width), y, KEY_HINT, Tone::Hint);
    }

    fn draw_bezel(&self, canvas: &mut Canvas, x: u16, y: u16, w: u16, h: u16) {
        let right = x + w - 1;
        let bottom = y + h - 1;
        for cx in x + 1..right {
            canvas.put(cx, y, '─', Tone::Bezel);
            canvas.put(cx, bottom, '─', Tone::Bezel);
        }
        for cy in y + 1..bottom {
            canvas.put(x, cy, '│', Tone::Bezel);
            canvas.put(right, cy, '│', Tone::Bezel);
        }
        canvas.put(x, y, '┌', Tone::Bezel);
        canvas.put(right, y, '┐', Tone::Bezel);
        canvas.put(x, bottom, '└', Tone::Bezel);
        canvas.put(right, bottom, '┘', Tone::Bezel);
    }
}

fn centered(s: &str, width: u16) -> u16 {
    width.saturating_sub(s.chars().count() as u16) / 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use badge_tetris_engine::Display;

    #[test]
    fn test_lit_leds_drawn_double_width() {
        let mut matrix = LedMatrix::new();
        let mut buf = [0u8; DISPLAY_WIDTH];
        buf[0] = 0b0000_0001;
        matrix.set_mode_fixed_packed(&buf);

        let view = MatrixView::default();
        let (w, h) = view.bezel_size();
        let mut canvas = Canvas::new(0, 0);
        view.render(&matrix, &[], Viewport::new(w, h + 2), &mut canvas);

        assert_eq!(canvas.get(1, 1).unwrap().tone, Tone::LedOn);
        assert_eq!(canvas.get(2, 1).unwrap().tone, Tone::LedOn);
        assert_eq!(canvas.get(3, 1).unwrap().tone, Tone::LedOff);
        assert_eq!(canvas.get(0, 0).unwrap().ch, '┌');
    }

    #[test]
    fn test_status_lines_under_matrix() {
        let matrix = LedMatrix::new();
        let view = MatrixView::default();
        let mut canvas = Canvas::new(0, 0);
        view.render(&matrix, &["menu"], Viewport::new(60, 20), &mut canvas);

        let found = (0..canvas.height()).any(|y| canvas.row_text(y).contains("menu"));
        assert!(found);
        let hint = (0..canvas.height()).any(|y| canvas.row_text(y).contains("esc BACK"));
        assert!(hint);
    }

    #[test]
    fn test_tiny_viewport_does_not_panic() {
        let matrix = LedMatrix::new();
        let mut canvas = Canvas::new(0, 0);
        MatrixView::default().render(&matrix, &["x"], Viewport::new(3, 2), &mut canvas);
        assert_eq!(canvas.width(), 3);
    }
}
