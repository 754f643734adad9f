//! Engine crate - the badge Tetris controller and the shell that hosts it
//!
//! The controller ([`TetrisApp`]) is a small state machine driven from three
//! directions on one cooperative thread: a periodic update task, button
//! presses, and packets from the paired badge. It talks to the badge only
//! through the traits in [`platform`], so it runs unchanged against the host
//! shell in [`shell`] or against test doubles.
//!
//! # Module Structure
//!
//! - [`platform`]: collaborator contracts (clock, scheduler, display, transport, shell, ledger)
//! - [`app`]: the [`App`] trait every focusable app implements
//! - [`timing`]: difficulty curve and fall timer
//! - [`net`]: packet send/decode helpers
//! - [`controller`]: [`TetrisApp`]
//! - [`sched`]: cooperative periodic scheduler
//! - [`shell`]: [`Badge`], the menu and score apps
//! - [`ledger`]: JSON score ledger
//! - [`host`]: host clocks and an in-memory display
//! - [`config`]: environment configuration
//!
//! # Example
//!
//! ```
//! use badge_tetris_engine::{Badge, BadgeConfig, ManualClock, MemoryDisplay};
//! use badge_tetris_engine::adapter::LoopbackLink;
//! use badge_tetris_engine::types::{AppId, Button, GamePhase, SessionMode};
//!
//! let clock = ManualClock::new(0);
//! let mut badge: Badge<Option<LoopbackLink>, _, _> =
//!     Badge::new(&BadgeConfig::default(), clock.clone(), MemoryDisplay::new(), None).unwrap();
//!
//! badge.launch_tetris(SessionMode::Singleplayer);
//! badge.press(Button::Ok);
//! assert_eq!(badge.focus(), AppId::Tetris);
//! assert_eq!(badge.tetris().phase(), GamePhase::Playing);
//!
//! clock.advance(600);
//! badge.step();
//! ```

pub mod app;
pub mod config;
pub mod controller;
pub mod error;
pub mod host;
pub mod ledger;
pub mod net;
pub mod platform;
pub mod sched;
pub mod shell;
pub mod timing;

#[cfg(test)]
mod test_support;

pub use badge_tetris_adapter as adapter;
pub use badge_tetris_core as core;
pub use badge_tetris_input as input;
pub use badge_tetris_types as types;

pub use app::App;
pub use config::{BadgeConfig, EmulatorConfig};
pub use controller::{TetrisApp, READY_TEXT};
pub use error::{ConfigError, LedgerError, SchedulerError};
pub use host::{ManualClock, MemoryDisplay, Screen, SystemClock};
pub use ledger::{MemoryScoreLedger, ScoreRecord};
pub use platform::{
    Clock, Display, PeriodicTask, Platform, RandomSource, ScoreLedger, Scheduler, Shell, TaskId,
    Transport,
};
pub use sched::CoopScheduler;
pub use shell::{Badge, MenuApp, Services, ShowScoreApp};
pub use timing::{DifficultyCurve, FallTimer};
