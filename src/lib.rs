//! Badge Tetris (workspace facade crate).
//!
//! Two-player Tetris for an LED-matrix conference badge, plus a terminal
//! emulator of the badge. The implementation lives in the crates under
//! `crates/`; this package re-exports them under one name.

pub use badge_tetris_adapter as adapter;
pub use badge_tetris_core as core;
pub use badge_tetris_engine as engine;
pub use badge_tetris_input as input;
pub use badge_tetris_term as term;
pub use badge_tetris_types as types;
