//! Host stand-ins for badge hardware: clocks and an in-memory display.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

use crate::platform::{Clock, Display};
use crate::types::{DisplayBuf, Tick, DISPLAY_WIDTH};

/// Milliseconds since creation, wrapping like the badge tick counter.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Tick {
        // Truncation is the wrap.
        self.start.elapsed().as_millis() as Tick
    }
}

/// Hand-driven clock. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Tick>>,
}

impl ManualClock {
    pub fn new(start: Tick) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    pub fn set(&self, now: Tick) {
        self.now.set(now);
    }

    pub fn advance(&self, ticks: Tick) {
        self.now.set(self.now.get().wrapping_add(ticks));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Tick {
        self.now.get()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Text(String),
    Packed(DisplayBuf),
}

/// Keeps whatever was last shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryDisplay {
    screen: Screen,
}

impl Default for MemoryDisplay {
    fn default() -> Self {
        Self {
            screen: Screen::Packed([0; DISPLAY_WIDTH]),
        }
    }
}

impl MemoryDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn text(&self) -> Option<&str> {
        match &self.screen {
            Screen::Text(text) => Some(text),
            Screen::Packed(_) => None,
        }
    }
}

impl Display for MemoryDisplay {
    fn set_mode_scroll_text(&mut self, text: &str) {
        self.screen = Screen::Text(text.to_string());
    }

    fn set_mode_fixed_packed(&mut self, buf: &DisplayBuf) {
        match &mut self.screen {
            Screen::Packed(current) => *current = *buf,
            screen => *screen = Screen::Packed(*buf),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_shared_and_wrapping() {
        let clock = ManualClock::new(u32::MAX - 1);
        let handle = clock.clone();
        handle.advance(3);
        assert_eq!(clock.now(), 1);
        handle.set(50);
        assert_eq!(clock.now(), 50);
    }

    #[test]
    fn test_memory_display_tracks_mode() {
        let mut display = MemoryDisplay::new();
        display.set_mode_scroll_text("Ready?");
        assert_eq!(display.text(), Some("Ready?"));

        let mut buf = [0; DISPLAY_WIDTH];
        buf[15] = 0xFF;
        display.set_mode_fixed_packed(&buf);
        assert_eq!(display.screen(), &Screen::Packed(buf));
        assert_eq!(display.text(), None);
    }
}
