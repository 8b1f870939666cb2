//! QR payload derivation and rendering
//!
//! This module turns the active input (plain text or Wi-Fi credentials) into
//! the string encoded into the QR symbol, and rasterizes that string into an
//! RGBA image with the configured colors and optional embedded logo.
//! Symbol construction and error correction are delegated to the `qrcode` crate.

pub mod payload;
pub mod render;

pub use payload::{InputMode, WifiCredentials, WifiEncryption};
pub use render::{LogoSpec, RenderOptions, logo_from_data_uri, parse_hex_color, render};
