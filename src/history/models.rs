//! History data models
//!
//! This module defines the data structures persisted in the generation history.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Maximum number of history entries kept; older entries are dropped silently
pub const HISTORY_CAP: usize = 10;

/// Visual styling applied to a rendered QR code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleOptions {
    /// Module color as a `#rrggbb` hex string
    pub fg_color: String,
    /// Canvas color as a `#rrggbb` hex string
    pub bg_color: String,
    /// Embedded logo as a `data:<mime>;base64,` URI, if any
    pub logo: Option<String>,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self {
            fg_color: "#000000".to_string(),
            bg_color: "#ffffff".to_string(),
            logo: None,
        }
    }
}

/// A saved snapshot of a previously generated QR configuration
///
/// The timestamp is unique and serves as the entry's identity for deletion
/// and lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The string that was encoded
    pub value: String,
    /// Module color at the time of saving
    pub fg_color: String,
    /// Canvas color at the time of saving
    pub bg_color: String,
    /// Embedded logo data URI at the time of saving, if any
    pub logo: Option<String>,
    /// RFC 3339 creation instant, nanosecond precision
    pub timestamp: String,
}

impl HistoryEntry {
    /// Snapshot a value and style with a fresh timestamp
    pub fn new(value: impl Into<String>, style: &StyleOptions) -> Self {
        Self {
            value: value.into(),
            fg_color: style.fg_color.clone(),
            bg_color: style.bg_color.clone(),
            logo: style.logo.clone(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Nanos, true),
        }
    }

    /// The style this entry was saved with
    pub fn style(&self) -> StyleOptions {
        StyleOptions {
            fg_color: self.fg_color.clone(),
            bg_color: self.bg_color.clone(),
            logo: self.logo.clone(),
        }
    }
}
