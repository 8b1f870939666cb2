//! Generation history
//!
//! An ordered, most-recent-first list of saved QR configurations, capped at
//! [`HISTORY_CAP`] entries and persisted synchronously with every mutation so
//! memory and storage never diverge for longer than one operation.

pub mod models;
pub mod store;

pub use models::{HISTORY_CAP, HistoryEntry, StyleOptions};
pub use store::HistoryStore;

use crate::error::Result;
use tracing::{debug, info};

/// In-memory history list bound to its persistent store
#[derive(Debug)]
pub struct History {
    entries: Vec<HistoryEntry>,
    store: HistoryStore,
}

impl History {
    /// Restore the history from its store on startup.
    ///
    /// A missing or corrupt record yields an empty history; startup never
    /// fails because of it.
    pub fn restore(store: HistoryStore) -> Self {
        let mut entries = store.load();
        if entries.len() > HISTORY_CAP {
            debug!(
                "Persisted history has {} entries, truncating to {}",
                entries.len(),
                HISTORY_CAP
            );
            entries.truncate(HISTORY_CAP);
        }
        info!("History restored with {} entries", entries.len());
        Self { entries, store }
    }

    /// Prepend an entry, truncate to the cap, and persist the full list
    pub fn add(&mut self, entry: HistoryEntry) -> Result<()> {
        debug!("Adding history entry for value: {}", entry.value);
        self.entries.insert(0, entry);
        self.entries.truncate(HISTORY_CAP);
        self.store.save(&self.entries)
    }

    /// Remove the entry with the given timestamp and persist the remainder.
    ///
    /// Returns whether an entry was removed. Order of the remaining entries
    /// is unchanged.
    pub fn delete(&mut self, timestamp: &str) -> Result<bool> {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.timestamp != timestamp);
        let removed = self.entries.len() != before;
        if removed {
            debug!("Deleted history entry {}", timestamp);
            self.store.save(&self.entries)?;
        }
        Ok(removed)
    }

    /// The current entries, most recent first
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Entry at a display position, if it exists
    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    /// Number of saved entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the history is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
