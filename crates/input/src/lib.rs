//! Badge input module.
//!
//! [`map`] turns physical buttons into what they mean for the current game
//! phase, including the 90° remap needed because the badge is held sideways
//! while playing. [`keys`] maps `crossterm` key events onto physical buttons
//! for the host emulator.

pub mod keys;
pub mod map;

pub use badge_tetris_types as types;

pub use keys::{key_to_button, should_quit};
pub use map::{button_intent, remap_playing, ButtonIntent};
