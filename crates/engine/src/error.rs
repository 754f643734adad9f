//! Error types for construction-time and host-side failures.
//!
//! The controller's runtime paths never fail; everything here happens while
//! wiring the badge together or talking to the host filesystem.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("scheduler is full ({capacity} periodic tasks)")]
    Full { capacity: usize },
    #[error("periodic task interval must be non-zero")]
    ZeroInterval,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name}={value:?} is not a valid number of ticks")]
    InvalidTicks { name: &'static str, value: String },
    #[error("{name} must be non-zero")]
    Zero { name: &'static str },
    #[error("minimum fall period {min} exceeds base fall period {base}")]
    FloorAboveBase { min: u32, base: u32 },
}

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("score ledger I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("score ledger is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
