//! History persistence
//!
//! The history list is stored as a JSON array in a single file under the
//! application data directory. Writes are atomic (temp file + persist) so a
//! crash mid-write never corrupts the previous list; a missing or corrupt
//! file loads as an empty history.

use crate::error::{QrStudioError, Result};
use crate::history::models::HistoryEntry;
use crate::utils::paths;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// File-backed store for the history list
#[derive(Debug)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    /// Create a store backed by the given file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default location: `<data-dir>/history.json`
    pub fn default_path() -> PathBuf {
        paths::data_dir().join("history.json")
    }

    /// The file this store reads and writes
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted history list.
    ///
    /// A missing or unparseable file is treated as an empty history; this
    /// never fails the caller.
    pub fn load(&self) -> Vec<HistoryEntry> {
        if !self.path.exists() {
            info!("History file not found, starting with empty history");
            return Vec::new();
        }

        let json = match std::fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to read history file, starting empty: {}", e);
                return Vec::new();
            }
        };

        match serde_json::from_str(&json) {
            Ok(entries) => {
                info!("History loaded successfully");
                entries
            }
            Err(e) => {
                warn!("Failed to parse history file, starting empty: {}", e);
                Vec::new()
            }
        }
    }

    /// Save the full history list with an atomic write
    pub fn save(&self, entries: &[HistoryEntry]) -> Result<()> {
        let dir = self
            .path
            .parent()
            .ok_or_else(|| QrStudioError::HistoryStore(crate::error::StringError::new(
                "Invalid history path",
            )))?;
        std::fs::create_dir_all(dir)?;

        let json = serde_json::to_string_pretty(entries)?;
        let mut temp = tempfile::NamedTempFile::new_in(dir)?;
        std::io::Write::write_all(&mut temp, json.as_bytes())?;
        temp.persist(&self.path)
            .map_err(|e| QrStudioError::HistoryStore(Box::new(e)))?;

        info!("History saved successfully");
        Ok(())
    }
}
