//! Emulator configuration from environment variables.
//!
//! | Variable | Default |
//! |---|---|
//! | `TETRIS_TICK_MS` | 20 |
//! | `TETRIS_FALL_PERIOD_MS` | 600 |
//! | `TETRIS_MIN_FALL_PERIOD_MS` | 150 |
//! | `TETRIS_SPEED_UP_MS` | 20 |
//! | `TETRIS_SEED` | clock-derived |
//! | `TETRIS_SCORE_PATH` | unset (scores kept in memory) |
//! | `TETRIS_LOG_PATH` | unset (logging off) |
//!
//! Link settings are read by the adapter crate.

use std::path::PathBuf;

use crate::error::ConfigError;
use crate::timing::DifficultyCurve;
use crate::types::{Tick, UPDATE_INTERVAL};

/// Settings of one emulated badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadgeConfig {
    /// Interval of the controller's update task.
    pub tick_interval: Tick,
    pub curve: DifficultyCurve,
    /// Seed of the badge's random source.
    pub seed: u32,
}

impl Default for BadgeConfig {
    fn default() -> Self {
        Self {
            tick_interval: UPDATE_INTERVAL,
            curve: DifficultyCurve::default(),
            seed: 1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmulatorConfig {
    pub badge: BadgeConfig,
    /// `None` means the seed was not pinned and the caller should pick one.
    pub seed_override: Option<u32>,
    pub score_path: Option<PathBuf>,
    pub log_path: Option<PathBuf>,
}

impl EmulatorConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable lookup, so tests need not touch the process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = BadgeConfig::default();
        let var = |name: &str| {
            lookup(name)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };
        let ticks = |name: &'static str, default: Tick| -> Result<Tick, ConfigError> {
            match var(name) {
                None => Ok(default),
                Some(value) => value
                    .parse::<Tick>()
                    .map_err(|_| ConfigError::InvalidTicks { name, value }),
            }
        };

        let tick_interval = ticks("TETRIS_TICK_MS", defaults.tick_interval)?;
        if tick_interval == 0 {
            return Err(ConfigError::Zero {
                name: "TETRIS_TICK_MS",
            });
        }

        let curve = DifficultyCurve {
            base_period: ticks("TETRIS_FALL_PERIOD_MS", defaults.curve.base_period)?,
            min_period: ticks("TETRIS_MIN_FALL_PERIOD_MS", defaults.curve.min_period)?,
            speed_up_per_line: ticks("TETRIS_SPEED_UP_MS", defaults.curve.speed_up_per_line)?,
        };
        if curve.min_period == 0 {
            return Err(ConfigError::Zero {
                name: "TETRIS_MIN_FALL_PERIOD_MS",
            });
        }
        if curve.min_period > curve.base_period {
            return Err(ConfigError::FloorAboveBase {
                min: curve.min_period,
                base: curve.base_period,
            });
        }

        let seed_override = match var("TETRIS_SEED") {
            None => None,
            Some(value) => Some(value.parse::<u32>().map_err(|_| ConfigError::InvalidTicks {
                name: "TETRIS_SEED",
                value,
            })?),
        };

        Ok(Self {
            badge: BadgeConfig {
                tick_interval,
                curve,
                seed: seed_override.unwrap_or(defaults.seed),
            },
            seed_override,
            score_path: var("TETRIS_SCORE_PATH").map(PathBuf::from),
            log_path: var("TETRIS_LOG_PATH").map(PathBuf::from),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let cfg = EmulatorConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg.badge, BadgeConfig::default());
        assert_eq!(cfg.seed_override, None);
        assert_eq!(cfg.score_path, None);
        assert_eq!(cfg.log_path, None);
    }

    #[test]
    fn test_overrides() {
        let cfg = EmulatorConfig::from_lookup(lookup(&[
            ("TETRIS_TICK_MS", "10"),
            ("TETRIS_FALL_PERIOD_MS", " 800 "),
            ("TETRIS_SEED", "42"),
            ("TETRIS_SCORE_PATH", "/tmp/scores.json"),
            ("TETRIS_LOG_PATH", ""),
        ]))
        .unwrap();
        assert_eq!(cfg.badge.tick_interval, 10);
        assert_eq!(cfg.badge.curve.base_period, 800);
        assert_eq!(cfg.badge.curve.min_period, 150);
        assert_eq!(cfg.badge.seed, 42);
        assert_eq!(cfg.seed_override, Some(42));
        assert_eq!(cfg.score_path, Some(PathBuf::from("/tmp/scores.json")));
        assert_eq!(cfg.log_path, None);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            EmulatorConfig::from_lookup(lookup(&[("TETRIS_TICK_MS", "fast")])),
            Err(ConfigError::InvalidTicks { name: "TETRIS_TICK_MS", .. })
        ));
        assert!(matches!(
            EmulatorConfig::from_lookup(lookup(&[("TETRIS_TICK_MS", "0")])),
            Err(ConfigError::Zero { .. })
        ));
        assert!(matches!(
            EmulatorConfig::from_lookup(lookup(&[("TETRIS_MIN_FALL_PERIOD_MS", "900")])),
            Err(ConfigError::FloorAboveBase { min: 900, base: 600 })
        ));
    }
}
