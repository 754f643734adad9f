//! Pieces module - Tetromino shapes and rotation
//!
//! Shapes follow the SRS orientation tables. The badge board is only eight
//! cells wide, so rotation uses a short fixed list of kick offsets instead of
//! the full SRS kick tables.

use crate::board::Board;
use crate::types::{PieceKind, Rotation, BOARD_WIDTH};

/// Offset of a single mino relative to piece origin
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets from piece origin
pub type PieceShape = [MinoOffset; 4];

/// Column where new pieces spawn (centres the 4-wide bounding box).
pub const SPAWN_X: i8 = (BOARD_WIDTH as i8 - 4) / 2;

/// Offsets tried in order when a rotation collides.
const KICKS: [(i8, i8); 6] = [(0, 0), (-1, 0), (1, 0), (0, -1), (-2, 0), (2, 0)];

/// Get the shape (mino offsets) for a piece kind and rotation
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> PieceShape {
    use Rotation::*;
    match (kind, rotation) {
        (PieceKind::I, North) => [(0, 1), (1, 1), (2, 1), (3, 1)],
        (PieceKind::I, East) => [(2, 0), (2, 1), (2, 2), (2, 3)],
        (PieceKind::I, South) => [(0, 2), (1, 2), (2, 2), (3, 2)],
        (PieceKind::I, West) => [(1, 0), (1, 1), (1, 2), (1, 3)],

        (PieceKind::O, _) => [(1, 0), (2, 0), (1, 1), (2, 1)],

        (PieceKind::T, North) => [(1, 0), (0, 1), (1, 1), (2, 1)],
        (PieceKind::T, East) => [(1, 0), (1, 1), (2, 1), (1, 2)],
        (PieceKind::T, South) => [(0, 1), (1, 1), (2, 1), (1, 2)],
        (PieceKind::T, West) => [(1, 0), (0, 1), (1, 1), (1, 2)],

        (PieceKind::S, North) => [(1, 0), (2, 0), (0, 1), (1, 1)],
        (PieceKind::S, East) => [(1, 0), (1, 1), (2, 1), (2, 2)],
        (PieceKind::S, South) => [(1, 1), (2, 1), (0, 2), (1, 2)],
        (PieceKind::S, West) => [(0, 0), (0, 1), (1, 1), (1, 2)],

        (PieceKind::Z, North) => [(0, 0), (1, 0), (1, 1), (2, 1)],
        (PieceKind::Z, East) => [(2, 0), (1, 1), (2, 1), (1, 2)],
        (PieceKind::Z, South) => [(0, 1), (1, 1), (1, 2), (2, 2)],
        (PieceKind::Z, West) => [(1, 0), (0, 1), (1, 1), (0, 2)],

        (PieceKind::J, North) => [(0, 0), (0, 1), (1, 1), (2, 1)],
        (PieceKind::J, East) => [(1, 0), (2, 0), (1, 1), (1, 2)],
        (PieceKind::J, South) => [(0, 1), (1, 1), (2, 1), (2, 2)],
        (PieceKind::J, West) => [(1, 0), (1, 1), (0, 2), (1, 2)],

        (PieceKind::L, North) => [(2, 0), (0, 1), (1, 1), (2, 1)],
        (PieceKind::L, East) => [(1, 0), (1, 1), (1, 2), (2, 2)],
        (PieceKind::L, South) => [(0, 1), (1, 1), (2, 1), (0, 2)],
        (PieceKind::L, West) => [(0, 0), (1, 0), (1, 1), (1, 2)],
    }
}

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl Tetromino {
    /// Create a new tetromino at spawn position
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            x: SPAWN_X,
            y: 0,
        }
    }

    pub fn shape(&self) -> PieceShape {
        get_shape(self.kind, self.rotation)
    }

    /// Absolute board cells covered by this piece.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> {
        let (x, y) = (self.x, self.y);
        self.shape().into_iter().map(move |(dx, dy)| (x + dx, y + dy))
    }

    /// Check if all minos are at valid positions on the board
    pub fn fits(&self, board: &Board) -> bool {
        self.cells().all(|(x, y)| board.is_valid(x, y))
    }

    /// Same piece moved by (dx, dy).
    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Rotate clockwise, trying each kick offset. `None` if every attempt collides.
    pub fn rotated_cw(&self, board: &Board) -> Option<Self> {
        if self.kind == PieceKind::O {
            return None;
        }
        let turned = Self {
            rotation: self.rotation.rotate_cw(),
            ..*self
        };
        KICKS
            .iter()
            .map(|&(dx, dy)| turned.shifted(dx, dy))
            .find(|candidate| candidate.fits(board))
    }
}
