//! Persistent score ledger for the host emulator.
//!
//! One record per game type holding the best and most recent score. The
//! ledger is stored as pretty-printed JSON.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::LedgerError;
use crate::platform::ScoreLedger;
use crate::types::GameScoreType;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub game: String,
    pub best: u32,
    pub last: u32,
    pub plays: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryScoreLedger {
    #[serde(default)]
    records: Vec<ScoreRecord>,
}

impl MemoryScoreLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[ScoreRecord] {
        &self.records
    }

    pub fn record(&self, game: GameScoreType) -> Option<&ScoreRecord> {
        self.records.iter().find(|r| r.game == game.as_str())
    }

    pub fn best(&self, game: GameScoreType) -> Option<u32> {
        self.record(game).map(|r| r.best)
    }

    pub fn to_json(&self) -> Result<String, LedgerError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, LedgerError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a ledger, treating a missing file as empty.
    pub fn load(path: &Path) -> Result<Self, LedgerError> {
        match fs::read_to_string(path) {
            Ok(json) => Self::from_json(&json),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::new()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), LedgerError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

impl ScoreLedger for MemoryScoreLedger {
    fn mark_score(&mut self, game: GameScoreType, score: u32) {
        let name = game.as_str();
        match self.records.iter_mut().find(|r| r.game == name) {
            Some(record) => {
                record.best = record.best.max(score);
                record.last = score;
                record.plays = record.plays.saturating_add(1);
            }
            None => self.records.push(ScoreRecord {
                game: name.to_string(),
                best: score,
                last: score,
                plays: 1,
            }),
        }
        tracing::info!(game = name, score, "score recorded");
    }
}
