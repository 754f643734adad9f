//! Key mapping from terminal events to badge buttons (host emulator only).

use crate::types::Button;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to a physical badge button.
pub fn key_to_button(key: KeyEvent) -> Option<Button> {
    match key.code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Button::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Button::Down),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Button::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Button::Right),

        KeyCode::Enter | KeyCode::Char(' ') => Some(Button::Ok),
        KeyCode::Backspace | KeyCode::Esc => Some(Button::Back),
        KeyCode::Char('b') | KeyCode::Char('B') => Some(Button::LongBack),
        KeyCode::Char('m') | KeyCode::Char('M') => Some(Button::Mode),

        _ => None,
    }
}

/// Check if key should quit the emulator.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
