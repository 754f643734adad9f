//! Terminal front end of the badge emulator.
//!
//! The 16x8 LED matrix is emulated by [`LedMatrix`], which implements the
//! engine's `Display` trait. [`MatrixView`] lays it out on a character
//! [`Canvas`] and [`TerminalRenderer`] diffs that canvas onto the terminal
//! with crossterm.

pub mod canvas;
pub mod font;
pub mod matrix;
pub mod renderer;
pub mod view;

pub use badge_tetris_types as types;

pub use canvas::{Canvas, Glyph, Tone};
pub use matrix::LedMatrix;
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use view::{MatrixView, Viewport, KEY_HINT};
