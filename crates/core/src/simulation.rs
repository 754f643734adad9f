//! The narrow contract the controller uses to drive a falling-block game.
//!
//! The controller owns exactly one implementation instance and replaces it on
//! every entry into focus. Nothing else may hold a reference to it.

use crate::types::{Direction, DisplayBuf, GamePhase};

pub trait Simulation {
    /// Fresh game in the `Waiting` phase.
    fn new_game(seed: u32) -> Self
    where
        Self: Sized;

    fn phase(&self) -> GamePhase;

    fn score(&self) -> u32;

    /// Total rows cleared since the game started. Drives the difficulty curve.
    fn cleared_lines(&self) -> u32;

    /// Garbage rows received from the peer but not yet inserted.
    fn pending_garbage(&self) -> u32;

    /// Leave `Waiting` and spawn the first piece. No-op in any other phase.
    fn start_playing(&mut self);

    fn on_input(&mut self, direction: Direction);

    /// Gravity step: move the active piece one row down, locking it if blocked.
    fn fall_down(&mut self);

    /// Queue `lines` garbage rows to be inserted on the next lock.
    fn enemy_attack(&mut self, lines: u8);

    /// End the game immediately, keeping the current score.
    fn force_over(&mut self);

    fn draw_to_display(&self, buf: &mut DisplayBuf);

    /// Take the garbage rows owed to the peer since the last call.
    fn take_attack(&mut self) -> Option<u8>;
}
