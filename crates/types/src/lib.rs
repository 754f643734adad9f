//! Core types shared across the badge Tetris crates.
//!
//! This crate contains pure data types and constants with no external
//! dependencies. Everything here is `Copy` so that the controller, the
//! simulation and the wire protocol can pass values around without borrowing.

/// Monotonic time unit from the scheduler's clock source.
///
/// The counter wraps; always compare ticks with `wrapping_sub`.
pub type Tick = u32;

/// LED matrix dimensions as mounted on the badge (landscape).
pub const DISPLAY_WIDTH: usize = 16;
pub const DISPLAY_HEIGHT: usize = 8;

/// One packed byte per display column, bit `n` lights row `n`.
pub type DisplayBuf = [u8; DISPLAY_WIDTH];

/// Board dimensions as seen by the player (the badge is held rotated 90°).
///
/// Each board row fits in one display column byte.
pub const BOARD_WIDTH: u8 = DISPLAY_HEIGHT as u8;
pub const BOARD_HEIGHT: u8 = DISPLAY_WIDTH as u8;

/// Periodic task timing (in ticks)
pub const UPDATE_INTERVAL: Tick = 20;
pub const UPDATE_PRIORITY: u8 = 3;

/// Difficulty curve defaults (in ticks)
pub const FALL_PERIOD: Tick = 600;
pub const MIN_FALL_PERIOD: Tick = 150;
pub const SPEED_UP_PER_CLEAR_LINE: Tick = 20;

/// Byte budget for the flush requested right before leaving a finished game.
pub const PARTIAL_FLUSH_BUDGET: usize = 50;

/// Physical buttons on the badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Ok,
    Back,
    LongBack,
    Up,
    Down,
    Left,
    Right,
    Mode,
    LongMode,
    Brightness,
}

impl Button {
    /// BACK and LONG_BACK both mean "leave the game".
    pub fn is_back(&self) -> bool {
        matches!(self, Button::Back | Button::LongBack)
    }
}

/// Logical input directions understood by the simulation.
///
/// `Up` rotates, `Down` soft-drops one row, `FastDown` hard-drops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    FastDown,
}

/// Lifecycle phase of one game.
///
/// `GameOver` is terminal for the round; the controller only leaves it by
/// losing focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GamePhase {
    #[default]
    Waiting,
    Playing,
    GameOver,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Waiting => "waiting",
            GamePhase::Playing => "playing",
            GamePhase::GameOver => "game_over",
        }
    }
}

/// Whether the peer protocol is active for this session.
///
/// Persists across games; set by the menu, never reset on entry or exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionMode {
    #[default]
    Singleplayer,
    Multiplayer,
}

impl SessionMode {
    pub fn is_multiplayer(&self) -> bool {
        matches!(self, SessionMode::Multiplayer)
    }
}

/// Identity of an app known to the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppId {
    Menu,
    Tetris,
    ShowScore,
}

impl AppId {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppId::Menu => "menu",
            AppId::Tetris => "tetris",
            AppId::ShowScore => "show_score",
        }
    }
}

/// Tag attached to score ledger records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameScoreType {
    Tetris,
}

impl GameScoreType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameScoreType::Tetris => "tetris",
        }
    }
}

/// Logical endpoint on the peer link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecvId(pub u8);

/// Number of logical endpoints a link can address.
pub const RECV_ID_COUNT: usize = 8;

/// Endpoint reserved for the Tetris app.
pub const TETRIS_RECV_ID: RecvId = RecvId(3);

impl RecvId {
    /// Slot index for handler tables, `None` when out of range.
    pub fn slot(&self) -> Option<usize> {
        let idx = self.0 as usize;
        (idx < RECV_ID_COUNT).then_some(idx)
    }
}

/// Tetromino piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];
}

/// Rotation states (North = spawn orientation)
///
/// The rotation cycle goes: North → East → South → West → North
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use badge_tetris_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }
}

/// Points for clearing N rows at once.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Garbage rows sent to the peer for clearing N rows at once.
pub const ATTACK_LINES: [u8; 5] = [0, 0, 1, 2, 4];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_rows_fit_display_columns() {
        assert_eq!(BOARD_HEIGHT as usize, DISPLAY_WIDTH);
        assert!(BOARD_WIDTH as usize <= 8);
    }

    #[test]
    fn recv_id_slot_bounds() {
        assert_eq!(TETRIS_RECV_ID.slot(), Some(3));
        assert_eq!(RecvId(RECV_ID_COUNT as u8).slot(), None);
    }

    #[test]
    fn back_buttons() {
        assert!(Button::Back.is_back());
        assert!(Button::LongBack.is_back());
        assert!(!Button::Ok.is_back());
        assert!(!Button::Mode.is_back());
    }
}
