//! High scores persisted as a JSON file.
//!
//! The file maps each mode label to a list of records, best first:
//!
//! ```json
//! {"Best of 5": [{"name": "Ada", "score": 4, "difficulty": "Hard"}],
//!  "Best of 10": [], "Best of 20": []}
//! ```

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use noughts_core::{HighScoreRecord, HighScoreStore, HighScoreTable, MatchMode, StoreError};
use tracing::{debug, info, instrument, warn};

/// [`HighScoreStore`] backed by a JSON file that is rewritten on every save.
#[derive(Debug, Clone)]
pub struct JsonHighScoreStore {
    path: PathBuf,
}

impl JsonHighScoreStore {
    /// Creates a store for `path`. Nothing is read until first use.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// File backing this store.
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[instrument(skip(self, table), fields(path = %self.path.display()))]
    fn write_table(&self, table: &HighScoreTable) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                StoreError::new(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }
        let json = serde_json::to_string_pretty(table)
            .map_err(|e| StoreError::new(format!("Failed to encode high scores: {}", e)))?;
        std::fs::write(&self.path, json).map_err(|e| {
            StoreError::new(format!("Failed to write {}: {}", self.path.display(), e))
        })?;
        debug!("High score file written");
        Ok(())
    }
}

impl HighScoreStore for JsonHighScoreStore {
    /// Reads the table, creating the file if it does not exist yet.
    ///
    /// Unparsable content yields an empty table; the file is left as it is
    /// until the next save overwrites it.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn load_all(&self) -> HighScoreTable {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => match serde_json::from_str::<HighScoreTable>(&content) {
                Ok(mut table) => {
                    table.ensure_modes();
                    table
                }
                Err(e) => {
                    warn!(error = %e, "High score file is corrupt, using empty table");
                    HighScoreTable::empty()
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("High score file missing, creating it");
                let table = HighScoreTable::empty();
                if let Err(e) = self.write_table(&table) {
                    warn!(error = %e, "Could not create high score file");
                }
                table
            }
            Err(e) => {
                warn!(error = %e, "Could not read high score file, using empty table");
                HighScoreTable::empty()
            }
        }
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn append_and_resort(
        &mut self,
        mode: MatchMode,
        record: HighScoreRecord,
    ) -> Result<(), StoreError> {
        let mut table = self.load_all();
        table.insert_sorted(mode, record);
        self.write_table(&table)?;
        info!(mode = %mode, "High score saved");
        Ok(())
    }
}

/// One display line per record: `name: score (Difficulty: d)`.
///
/// An empty mode gives the single line `No scores yet.`
pub fn score_lines(table: &HighScoreTable, mode: MatchMode) -> Vec<String> {
    let records = table.records(mode);
    if records.is_empty() {
        return vec!["No scores yet.".to_string()];
    }
    records
        .iter()
        .map(|r| format!("{}: {} (Difficulty: {})", r.name(), r.score(), r.difficulty()))
        .collect()
}
