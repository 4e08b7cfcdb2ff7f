//! High-score records and the persistence seam.

use std::collections::BTreeMap;

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_new::new;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::{debug, instrument};

use crate::match_state::MatchMode;

/// One finished match as stored in the high-score table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct HighScoreRecord {
    name: String,
    score: u32,
    difficulty: String,
}

/// Records per mode label, each list sorted by descending score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HighScoreTable {
    modes: BTreeMap<String, Vec<HighScoreRecord>>,
}

impl HighScoreTable {
    /// A table with an empty list for every mode.
    pub fn empty() -> Self {
        let mut table = Self {
            modes: BTreeMap::new(),
        };
        table.ensure_modes();
        table
    }

    /// Adds an empty list for any mode that is missing.
    pub fn ensure_modes(&mut self) {
        for mode in MatchMode::iter() {
            self.modes.entry(mode.label().to_string()).or_default();
        }
    }

    /// Records for a mode, best first.
    pub fn records(&self, mode: MatchMode) -> &[HighScoreRecord] {
        self.modes.get(mode.label()).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Mode labels present in the table.
    pub fn mode_labels(&self) -> impl Iterator<Item = &str> {
        self.modes.keys().map(String::as_str)
    }

    /// Appends `record` and re-sorts that mode by descending score.
    ///
    /// The sort is stable, so earlier entries stay ahead of later ones with
    /// the same score.
    #[instrument(skip(self))]
    pub fn insert_sorted(&mut self, mode: MatchMode, record: HighScoreRecord) {
        let list = self.modes.entry(mode.label().to_string()).or_default();
        list.push(record);
        list.sort_by(|a, b| b.score.cmp(&a.score));
        debug!(mode = %mode, count = list.len(), "High score inserted");
    }
}

impl Default for HighScoreTable {
    fn default() -> Self {
        Self::empty()
    }
}

/// High-score store error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Store error: {} at {}:{}", message, file, line)]
pub struct StoreError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StoreError {
    /// Creates a new store error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Persistence for finished matches.
pub trait HighScoreStore {
    /// Loads every mode's records.
    ///
    /// A missing or unreadable store yields [`HighScoreTable::empty`].
    fn load_all(&self) -> HighScoreTable;

    /// Adds `record` under `mode`, re-sorts, and persists the whole table.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the table cannot be written.
    fn append_and_resort(&mut self, mode: MatchMode, record: HighScoreRecord)
    -> Result<(), StoreError>;
}

/// In-memory store, for tests and for play without a save file.
#[derive(Debug, Clone, Default)]
pub struct MemoryHighScoreStore {
    table: HighScoreTable,
    writes: usize,
}

impl MemoryHighScoreStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `append_and_resort` calls.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl HighScoreStore for MemoryHighScoreStore {
    fn load_all(&self) -> HighScoreTable {
        self.table.clone()
    }

    fn append_and_resort(
        &mut self,
        mode: MatchMode,
        record: HighScoreRecord,
    ) -> Result<(), StoreError> {
        self.table.insert_sorted(mode, record);
        self.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, score: u32) -> HighScoreRecord {
        HighScoreRecord::new(name.to_string(), score, "Hard".to_string())
    }

    #[test]
    fn test_empty_table_has_all_modes() {
        let table = HighScoreTable::empty();
        let labels: Vec<&str> = table.mode_labels().collect();
        assert_eq!(labels.len(), 3);
        for mode in MatchMode::iter() {
            assert!(labels.contains(&mode.label()));
            assert!(table.records(mode).is_empty());
        }
    }

    #[test]
    fn test_insert_sorted_descending_and_stable() {
        let mut table = HighScoreTable::empty();
        table.insert_sorted(MatchMode::BestOf5, record("a", 2));
        table.insert_sorted(MatchMode::BestOf5, record("b", 4));
        table.insert_sorted(MatchMode::BestOf5, record("c", 2));
        let names: Vec<&str> = table
            .records(MatchMode::BestOf5)
            .iter()
            .map(|r| r.name().as_str())
            .collect();
        assert_eq!(names, ["b", "a", "c"]);
        assert!(table.records(MatchMode::BestOf10).is_empty());
    }

    #[test]
    fn test_table_json_shape() {
        let mut table = HighScoreTable::empty();
        table.insert_sorted(MatchMode::BestOf5, record("Ada", 3));
        let value = serde_json::to_value(&table).unwrap();
        assert_eq!(value["Best of 5"][0]["name"], "Ada");
        assert_eq!(value["Best of 5"][0]["score"], 3);
        assert_eq!(value["Best of 5"][0]["difficulty"], "Hard");
        assert_eq!(value["Best of 20"], serde_json::json!([]));
    }
}
