//! Application data directory resolution
//!
//! The history file and logs live in a per-user data directory. Resolution
//! follows the platform conventions via environment variables, falling back
//! to the working directory when none are set.

use std::path::PathBuf;

/// Directory name under the platform data root
const APP_DIR: &str = "QRStudio";

/// Resolve the application data directory.
///
/// Order: `%APPDATA%` (Windows), `$XDG_DATA_HOME`, `$HOME/.local/share`,
/// then the current directory as a last resort.
pub fn data_dir() -> PathBuf {
    if let Ok(appdata) = std::env::var("APPDATA") {
        return PathBuf::from(appdata).join(APP_DIR);
    }
    if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
        return PathBuf::from(xdg).join(APP_DIR);
    }
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".local").join("share").join(APP_DIR);
    }
    PathBuf::from(".").join(APP_DIR)
}
