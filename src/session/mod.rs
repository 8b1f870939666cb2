//! QR session state
//!
//! One session owns the active input mode, its fields, the styling options
//! and the debounced payload. It is held by the view controller and mutated
//! only through these methods; the payload itself is always re-derived from
//! the inputs, never stored independently.

pub mod debounce;

pub use debounce::{DebounceTimer, Debouncer, QUIET_WINDOW};

use crate::history::{HistoryEntry, StyleOptions};
use crate::qr::payload::{self, InputMode, WifiCredentials, WifiEncryption};

/// Mutable state of the active QR generation session
#[derive(Debug, Default)]
pub struct Session {
    mode: InputMode,
    text: String,
    wifi: WifiCredentials,
    style: StyleOptions,
    debounced_payload: String,
}

impl Session {
    /// A fresh session: text mode, empty input, default styling
    pub fn new() -> Self {
        Self::default()
    }

    /// Current payload derived from the active mode and its fields
    pub fn payload(&self) -> String {
        payload::derive(self.mode, &self.text, &self.wifi)
    }

    /// The debounced payload actually handed to the renderer
    pub fn debounced_payload(&self) -> &str {
        &self.debounced_payload
    }

    /// Publish a payload that survived the quiet window
    pub fn commit_debounced(&mut self, payload: String) {
        self.debounced_payload = payload;
    }

    /// Active input mode
    pub fn mode(&self) -> InputMode {
        self.mode
    }

    /// Switch the active input mode
    pub fn set_mode(&mut self, mode: InputMode) {
        self.mode = mode;
    }

    /// Current text-mode input
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Update the text-mode input
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Current Wi-Fi credentials
    pub fn wifi(&self) -> &WifiCredentials {
        &self.wifi
    }

    /// Update the Wi-Fi SSID
    pub fn set_wifi_ssid(&mut self, ssid: impl Into<String>) {
        self.wifi.ssid = ssid.into();
    }

    /// Update the Wi-Fi password
    pub fn set_wifi_password(&mut self, password: impl Into<String>) {
        self.wifi.password = password.into();
    }

    /// Update the Wi-Fi encryption scheme
    pub fn set_wifi_encryption(&mut self, encryption: WifiEncryption) {
        self.wifi.encryption = encryption;
    }

    /// Current styling options
    pub fn style(&self) -> &StyleOptions {
        &self.style
    }

    /// Update the module color
    pub fn set_fg_color(&mut self, color: impl Into<String>) {
        self.style.fg_color = color.into();
    }

    /// Update the canvas color
    pub fn set_bg_color(&mut self, color: impl Into<String>) {
        self.style.bg_color = color.into();
    }

    /// Set or clear the embedded logo (a data URI)
    pub fn set_logo(&mut self, logo: Option<String>) {
        self.style.logo = logo;
    }

    /// Whether the preview shows the placeholder instead of a QR code.
    ///
    /// True when the debounced payload is blank, or in Wi-Fi mode when the
    /// SSID is blank (the password may be empty for open networks). Save and
    /// export actions are disabled under the same condition.
    pub fn shows_placeholder(&self) -> bool {
        self.debounced_payload.trim().is_empty()
            || (self.mode == InputMode::Wifi && self.wifi.ssid.trim().is_empty())
    }

    /// Snapshot the current payload and style into a history entry
    pub fn snapshot_entry(&self) -> HistoryEntry {
        HistoryEntry::new(self.payload(), &self.style)
    }

    /// Restore a history entry into the active state.
    ///
    /// Forces text mode (discarding any unsaved Wi-Fi edits), restores the
    /// value, colors and logo exactly as stored, and publishes the value as
    /// the debounced payload so the preview updates without waiting out a
    /// quiet window.
    pub fn load_entry(&mut self, entry: &HistoryEntry) {
        self.mode = InputMode::Text;
        self.text = entry.value.clone();
        self.style = entry.style();
        self.debounced_payload = entry.value.clone();
    }
}
