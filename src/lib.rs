//! QR Studio - desktop QR code generator
//!
//! Generates QR codes live from text/URL input or Wi-Fi credentials, with
//! styling (colors, embedded logo), PNG/SVG export and a bounded, persisted
//! generation history. Input edits are debounced through a cancellable timer
//! so the symbol is only re-rendered once typing pauses.
//!
//! The GUI (Slint) lives in the binary; this library holds the session state,
//! payload derivation, rendering, history and export logic so they stay
//! testable without a window.

// Module declarations
pub mod error;
pub mod export;
pub mod history;
pub mod qr;
pub mod session;
pub mod utils;

// Re-export commonly used types
pub use error::{QrStudioError, Result};
