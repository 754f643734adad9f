//! Simulation crate - the falling-block game the badge controller drives
//!
//! The controller only sees the [`Simulation`] trait. [`TetrisGame`] is the
//! implementation shipped for the badge: an 8x16 board (the 16x8 LED matrix
//! held sideways), a 7-bag randomizer, and garbage rows received from a peer.
//!
//! It has **zero dependencies** on display, networking, or scheduling and
//! never allocates after construction.
//!
//! # Module Structure
//!
//! - [`board`]: 8x16 bitmask board with collision checks, line clears and garbage
//! - [`pieces`]: tetromino shapes and kick-assisted rotation
//! - [`rng`]: LCG and 7-bag generator
//! - [`game`]: [`TetrisGame`], gravity-free game state
//! - [`simulation`]: the controller-facing contract
//!
//! # Example
//!
//! ```
//! use badge_tetris_core::{Simulation, TetrisGame};
//! use badge_tetris_types::{Direction, GamePhase};
//!
//! let mut game = TetrisGame::new_game(12345);
//! game.start_playing();
//! assert_eq!(game.phase(), GamePhase::Playing);
//!
//! game.on_input(Direction::Left);
//! game.fall_down();
//! game.on_input(Direction::FastDown);
//! ```

pub mod board;
pub mod game;
pub mod pieces;
pub mod rng;
pub mod simulation;

pub use badge_tetris_types as types;

pub use board::Board;
pub use game::TetrisGame;
pub use pieces::{get_shape, Tetromino};
pub use rng::{PieceBag, SimpleRng};
pub use simulation::Simulation;
