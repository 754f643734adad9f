//! Game module - the badge-sized falling-block simulation
//!
//! Ties together board, pieces and RNG. There is no internal clock: gravity is
//! driven from outside through [`TetrisGame::fall_down`], so the caller decides
//! the fall rate.

use crate::board::Board;
use crate::pieces::Tetromino;
use crate::rng::{PieceBag, SimpleRng};
use crate::simulation::Simulation;
use crate::types::{
    Direction, DisplayBuf, GamePhase, ATTACK_LINES, BOARD_HEIGHT, BOARD_WIDTH, LINE_SCORES,
};

/// Mixed into the seed so garbage holes and piece order use different streams.
const GARBAGE_SEED_SALT: u32 = 0x9E37_79B9;

#[derive(Debug, Clone)]
pub struct TetrisGame {
    board: Board,
    active: Option<Tetromino>,
    bag: PieceBag,
    garbage_rng: SimpleRng,
    phase: GamePhase,
    score: u32,
    cleared_lines: u32,
    pending_garbage: u32,
    outgoing_attack: u8,
}

impl TetrisGame {
    pub fn new(seed: u32) -> Self {
        Self {
            board: Board::new(),
            active: None,
            bag: PieceBag::new(seed),
            garbage_rng: SimpleRng::new(seed ^ GARBAGE_SEED_SALT),
            phase: GamePhase::Waiting,
            score: 0,
            cleared_lines: 0,
            pending_garbage: 0,
            outgoing_attack: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<Tetromino> {
        self.active
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Spawn the next piece from the bag; ends the game if it cannot fit.
    fn spawn_piece(&mut self) -> bool {
        if self.board.is_spawn_blocked() {
            self.phase = GamePhase::GameOver;
            return false;
        }

        let piece = Tetromino::new(self.bag.draw());
        if !piece.fits(&self.board) {
            self.phase = GamePhase::GameOver;
            return false;
        }

        self.active = Some(piece);
        true
    }

    fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        let moved = active.shifted(dx, dy);
        if moved.fits(&self.board) {
            self.active = Some(moved);
            return true;
        }
        false
    }

    fn try_rotate(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        match active.rotated_cw(&self.board) {
            Some(rotated) => {
                self.active = Some(rotated);
                true
            }
            None => false,
        }
    }

    fn hard_drop(&mut self) {
        while self.try_move(0, 1) {}
        self.lock_piece();
    }

    /// Lock the active piece, clear rows, settle attacks, insert garbage, spawn.
    fn lock_piece(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };

        if !self.board.lock_piece(&active.shape(), active.x, active.y) {
            self.phase = GamePhase::GameOver;
            return;
        }

        let cleared = self.board.clear_full_rows() as usize;
        if cleared > 0 {
            let idx = cleared.min(LINE_SCORES.len() - 1);
            self.cleared_lines += cleared as u32;
            self.score = self.score.saturating_add(LINE_SCORES[idx]);
            self.outgoing_attack = self.outgoing_attack.saturating_add(ATTACK_LINES[idx]);
        }

        if !self.insert_pending_garbage() {
            self.phase = GamePhase::GameOver;
            return;
        }

        self.spawn_piece();
    }

    fn insert_pending_garbage(&mut self) -> bool {
        let rows = self.pending_garbage.min(BOARD_HEIGHT as u32);
        self.pending_garbage = 0;
        for _ in 0..rows {
            let hole = self.garbage_rng.next_range(BOARD_WIDTH as u32) as u8;
            if !self.board.push_garbage(hole) {
                return false;
            }
        }
        true
    }
}

impl Simulation for TetrisGame {
    fn new_game(seed: u32) -> Self {
        Self::new(seed)
    }

    fn phase(&self) -> GamePhase {
        self.phase
    }

    fn score(&self) -> u32 {
        self.score
    }

    fn cleared_lines(&self) -> u32 {
        self.cleared_lines
    }

    fn pending_garbage(&self) -> u32 {
        self.pending_garbage
    }

    fn start_playing(&mut self) {
        if self.phase != GamePhase::Waiting {
            return;
        }
        self.phase = GamePhase::Playing;
        self.spawn_piece();
    }

    fn on_input(&mut self, direction: Direction) {
        if self.phase != GamePhase::Playing {
            return;
        }
        match direction {
            Direction::Left => {
                self.try_move(-1, 0);
            }
            Direction::Right => {
                self.try_move(1, 0);
            }
            Direction::Down => {
                self.try_move(0, 1);
            }
            Direction::Up => {
                self.try_rotate();
            }
            Direction::FastDown => self.hard_drop(),
        }
    }

    fn fall_down(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        if self.active.is_none() {
            self.spawn_piece();
            return;
        }
        if !self.try_move(0, 1) {
            self.lock_piece();
        }
    }

    fn enemy_attack(&mut self, lines: u8) {
        self.pending_garbage = self.pending_garbage.saturating_add(lines as u32);
    }

    fn force_over(&mut self) {
        self.phase = GamePhase::GameOver;
    }

    fn draw_to_display(&self, buf: &mut DisplayBuf) {
        for (col, out) in buf.iter_mut().enumerate() {
            *out = self.board.row(col);
        }
        if let Some(active) = self.active {
            for (x, y) in active.cells() {
                if !self.board.is_out_of_bounds(x, y) {
                    buf[y as usize] |= 1u8 << x;
                }
            }
        }
    }

    fn take_attack(&mut self) -> Option<u8> {
        let lines = std::mem::take(&mut self.outgoing_attack);
        (lines > 0).then_some(lines)
    }
}
