//! Board module - manages the game grid
//!
//! The board is an 8x16 grid stored as one bitmask byte per row, which is
//! exactly the packed format the LED matrix takes per display column.
//! Coordinates: (x, y) where x ranges 0..7 (left to right), y ranges 0..15
//! (top to bottom). Bit `x` of row `y` is set when the cell is filled.

use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

const ROWS: usize = BOARD_HEIGHT as usize;

/// Bitmask of a completely filled row.
pub const FULL_ROW: u8 = ((1u16 << BOARD_WIDTH) - 1) as u8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: [u8; ROWS],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self { rows: [0; ROWS] }
    }

    /// Check if position is out of bounds
    #[inline(always)]
    pub fn is_out_of_bounds(&self, x: i8, y: i8) -> bool {
        x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8
    }

    /// Check if position is valid (within bounds and empty)
    pub fn is_valid(&self, x: i8, y: i8) -> bool {
        !self.is_out_of_bounds(x, y) && self.rows[y as usize] & (1 << x) == 0
    }

    /// Fill or empty a cell. Returns false if out of bounds.
    pub fn set(&mut self, x: i8, y: i8, filled: bool) -> bool {
        if self.is_out_of_bounds(x, y) {
            return false;
        }
        let bit = 1u8 << x;
        if filled {
            self.rows[y as usize] |= bit;
        } else {
            self.rows[y as usize] &= !bit;
        }
        true
    }

    /// Raw bitmask of row `y` (0 when out of range).
    pub fn row(&self, y: usize) -> u8 {
        self.rows.get(y).copied().unwrap_or(0)
    }

    /// Clear all full rows, shifting the rest down. Returns how many were cleared.
    ///
    /// Two-pointer compaction from the bottom up, in place.
    pub fn clear_full_rows(&mut self) -> u8 {
        let mut cleared = 0u8;
        let mut write_y = ROWS;

        for read_y in (0..ROWS).rev() {
            if self.rows[read_y] == FULL_ROW {
                cleared += 1;
            } else {
                write_y -= 1;
                self.rows[write_y] = self.rows[read_y];
            }
        }

        for row in &mut self.rows[..write_y] {
            *row = 0;
        }

        cleared
    }

    /// Lock a piece onto the board at given position with given shape
    /// Returns true if successful, false if any cell is out of bounds or occupied
    pub fn lock_piece(&mut self, shape: &[(i8, i8)], x: i8, y: i8) -> bool {
        if !shape.iter().all(|&(dx, dy)| self.is_valid(x + dx, y + dy)) {
            return false;
        }
        for &(dx, dy) in shape {
            self.set(x + dx, y + dy, true);
        }
        true
    }

    /// Push one garbage row in from the bottom with a single hole at `hole`.
    ///
    /// Returns false when a filled top row was pushed off the board.
    pub fn push_garbage(&mut self, hole: u8) -> bool {
        let overflow = self.rows[0] != 0;
        self.rows.copy_within(1..ROWS, 0);
        self.rows[ROWS - 1] = FULL_ROW & !(1u8 << (hole % BOARD_WIDTH));
        !overflow
    }

    /// Check if spawn position is blocked (game over condition)
    pub fn is_spawn_blocked(&self) -> bool {
        !self.is_valid(3, 0) || !self.is_valid(4, 0)
    }

    /// Height of the stack in rows (0 for an empty board).
    pub fn stack_height(&self) -> u8 {
        self.rows
            .iter()
            .position(|&r| r != 0)
            .map(|top| (ROWS - top) as u8)
            .unwrap_or(0)
    }

    #[cfg(test)]
    pub(crate) fn is_occupied(&self, x: i8, y: i8) -> bool {
        !self.is_out_of_bounds(x, y) && self.rows[y as usize] & (1 << x) != 0
    }

    #[cfg(test)]
    pub(crate) fn is_row_full(&self, y: usize) -> bool {
        self.row(y) == FULL_ROW
    }

    #[cfg(test)]
    pub(crate) fn from_rows(rows: [u8; ROWS]) -> Self {
        Self { rows }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        let board = Board::new();
        assert!(board.is_valid(0, 0));
        assert!(board.is_valid(7, 15));
        assert!(!board.is_valid(-1, 0));
        assert!(!board.is_valid(8, 0));
        assert!(!board.is_valid(0, 16));
    }

    #[test]
    fn test_set_and_get() {
        let mut board = Board::new();
        assert!(board.set(2, 5, true));
        assert!(board.is_occupied(2, 5));
        assert_eq!(board.row(5), 0b0000_0100);
        assert!(board.set(2, 5, false));
        assert!(!board.is_occupied(2, 5));
        assert!(!board.set(9, 5, true));
    }

    #[test]
    fn test_clear_full_rows_compacts() {
        let mut rows = [0u8; ROWS];
        rows[13] = 0b0000_0001;
        rows[14] = FULL_ROW;
        rows[15] = FULL_ROW;
        let mut board = Board::from_rows(rows);

        assert_eq!(board.clear_full_rows(), 2);
        assert_eq!(board.row(15), 0b0000_0001);
        assert_eq!(board.row(14), 0);
        assert_eq!(board.stack_height(), 1);
    }

    #[test]
    fn test_clear_non_adjacent_rows() {
        let mut rows = [0u8; ROWS];
        rows[12] = FULL_ROW;
        rows[13] = 0b1000_0000;
        rows[14] = FULL_ROW;
        rows[15] = 0b0000_0011;
        let mut board = Board::from_rows(rows);

        assert_eq!(board.clear_full_rows(), 2);
        assert_eq!(board.row(15), 0b0000_0011);
        assert_eq!(board.row(14), 0b1000_0000);
        assert_eq!(board.row(13), 0);
    }

    #[test]
    fn test_push_garbage_leaves_one_hole() {
        let mut board = Board::new();
        assert!(board.push_garbage(3));
        assert_eq!(board.row(15), FULL_ROW & !0b0000_1000);
        assert!(!board.is_row_full(15));
        assert_eq!(board.stack_height(), 1);
    }

    #[test]
    fn test_push_garbage_reports_overflow() {
        let mut rows = [0u8; ROWS];
        rows[0] = 0b0001_0000;
        let mut board = Board::from_rows(rows);
        assert!(!board.push_garbage(0));
    }

    #[test]
    fn test_lock_piece_rejects_overlap() {
        let mut board = Board::new();
        board.set(1, 1, true);
        assert!(!board.lock_piece(&[(0, 0), (1, 1)], 0, 0));
        assert!(board.lock_piece(&[(0, 0), (1, 0)], 0, 0));
        assert_eq!(board.row(0), 0b0000_0011);
    }
}
