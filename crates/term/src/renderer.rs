//! TerminalRenderer: puts a canvas on the real terminal.
//!
//! Only changed runs of cells are rewritten after the first frame.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::canvas::{Canvas, Tone};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<Canvas>,
    buf: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force a full redraw next frame, e.g. after a resize.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw `canvas`, then swap it with the previous frame so the caller
    /// reuses that buffer.
    pub fn draw_swap(&mut self, canvas: &mut Canvas) -> Result<()> {
        self.buf.clear();
        match self.last.take() {
            Some(mut prev) if prev.width() == canvas.width() && prev.height() == canvas.height() => {
                encode_diff_into(&prev, canvas, &mut self.buf)?;
                self.flush_buf()?;
                std::mem::swap(&mut prev, canvas);
                self.last = Some(prev);
            }
            _ => {
                encode_full_into(canvas, &mut self.buf)?;
                self.flush_buf()?;
                let fresh = Canvas::new(canvas.width(), canvas.height());
                self.last = Some(std::mem::replace(canvas, fresh));
            }
        }
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Full redraw as crossterm commands appended to `out`.
pub fn encode_full_into(canvas: &Canvas, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    out.queue(cursor::MoveTo(0, 0))?;

    let mut tone = None;
    for y in 0..canvas.height() {
        for x in 0..canvas.width() {
            let glyph = canvas.get(x, y).unwrap_or_default();
            if tone != Some(glyph.tone) {
                apply_tone_into(out, glyph.tone)?;
                tone = Some(glyph.tone);
            }
            out.queue(Print(glyph.ch))?;
        }
        if y + 1 < canvas.height() {
            out.queue(Print("\r\n"))?;
        }
    }

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

/// Rewrite only the runs that differ between two same-sized canvases.
pub fn encode_diff_into(prev: &Canvas, next: &Canvas, out: &mut Vec<u8>) -> Result<()> {
    let mut tone = None;
    for_each_changed_run(prev, next, |x, y, len| {
        out.queue(cursor::MoveTo(x, y))?;
        for dx in 0..len {
            let glyph = next.get(x + dx, y).unwrap_or_default();
            if tone != Some(glyph.tone) {
                apply_tone_into(out, glyph.tone)?;
                tone = Some(glyph.tone);
            }
            out.queue(Print(glyph.ch))?;
        }
        Ok(())
    })?;

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn tone_colors(tone: Tone) -> (Color, Color) {
    let black = Color::Rgb { r: 0, g: 0, b: 0 };
    let panel = Color::Rgb { r: 20, g: 12, b: 12 };
    match tone {
        Tone::Background => (Color::Rgb { r: 200, g: 200, b: 200 }, black),
        Tone::LedOn => (Color::Rgb { r: 255, g: 60, b: 40 }, panel),
        Tone::LedOff => (Color::Rgb { r: 70, g: 30, b: 30 }, panel),
        Tone::Bezel => (Color::Rgb { r: 150, g: 150, b: 160 }, black),
        Tone::Label => (Color::Rgb { r: 230, g: 230, b: 230 }, black),
        Tone::Hint => (Color::Rgb { r: 120, g: 120, b: 120 }, black),
    }
}

fn apply_tone_into(out: &mut Vec<u8>, tone: Tone) -> Result<()> {
    let (fg, bg) = tone_colors(tone);
    out.queue(SetForegroundColor(fg))?;
    out.queue(SetBackgroundColor(bg))?;
    out.queue(SetAttribute(Attribute::Reset))?;
    if tone == Tone::LedOn {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    Ok(())
}

fn for_each_changed_run(
    prev: &Canvas,
    next: &Canvas,
    mut f: impl FnMut(u16, u16, u16) -> Result<()>,
) -> Result<()> {
    let w = next.width();
    for y in 0..next.height() {
        let mut x = 0;
        while x < w {
            if prev.get(x, y) == next.get(x, y) {
                x += 1;
                continue;
            }
            let start = x;
            while x < w && prev.get(x, y) != next.get(x, y) {
                x += 1;
            }
            f(start, y, x - start)?;
        }
    }
    Ok(())
}
