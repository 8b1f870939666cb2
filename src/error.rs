//! Error types for QR Studio
//!
//! This module defines all error types used throughout the application,
//! providing clear error messages and proper error propagation.
//!
//! Error variants use `#[source]` to preserve error chains for better
//! observability and debugging.

use thiserror::Error;

/// Simple error type for wrapping string messages while implementing `std::error::Error`
#[derive(Debug, Error)]
#[error("{0}")]
pub struct StringError(pub String);

impl StringError {
    /// Create a new `StringError` from a string message
    pub fn new(msg: impl Into<String>) -> Box<Self> {
        Box::new(Self(msg.into()))
    }
}

/// Main error type for QR Studio
#[derive(Debug, Error)]
pub enum QrStudioError {
    /// The payload could not be encoded into a QR symbol
    #[error("QR encoding failed: {0}")]
    QrEncoding(#[from] qrcode::types::QrError),

    /// A color string could not be parsed as `#rrggbb`
    #[error("Invalid color value: {0}")]
    InvalidColor(String),

    /// The logo image could not be decoded
    #[error("Failed to decode logo image: {0}")]
    LogoDecode(#[from] image::ImageError),

    /// A data URI was malformed or used an unsupported encoding
    #[error("Invalid data URI: {0}")]
    InvalidDataUri(String),

    /// History persistence error
    /// Preserves the underlying error source for full error chain transparency
    #[error("History storage error: {0}")]
    HistoryStore(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Export conversion or file save error
    /// Preserves the underlying error source for full error chain transparency
    #[error("Export failed: {0}")]
    Export(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Logging setup error
    /// Preserves the underlying error source for full error chain transparency
    #[error("Logging error: {0}")]
    Logging(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type alias for QR Studio operations
pub type Result<T> = std::result::Result<T, QrStudioError>;

/// Convert an error to a user-friendly message
///
/// This function takes a `QrStudioError` and returns a message suitable
/// for displaying to end users in error dialogs.
pub fn get_user_friendly_error(error: &QrStudioError) -> String {
    match error {
        QrStudioError::QrEncoding(e) => {
            format!(
                "The input could not be turned into a QR code:\n\n{e}\n\n\
                 Try shortening the text."
            )
        }
        QrStudioError::InvalidColor(value) => {
            format!(
                "\"{value}\" is not a valid color.\n\n\
                 Use hex notation such as #1a2b3c."
            )
        }
        QrStudioError::LogoDecode(_) => "The selected logo could not be read.\n\n\
             Please pick a PNG or JPEG image."
            .to_string(),
        QrStudioError::InvalidDataUri(_) => "A stored logo image is damaged.\n\n\
             Remove the logo and pick it again."
            .to_string(),
        QrStudioError::HistoryStore(_) => "Failed to load or save the generation history.\n\n\
             Your saved codes may not persist.\n\
             Check that you have write permissions to the application data folder."
            .to_string(),
        QrStudioError::Export(_) => "The QR code could not be exported.\n\n\
             No file was written. Please try again."
            .to_string(),
        QrStudioError::Logging(_) => "The log file could not be set up.\n\n\
             The application will run without file logging."
            .to_string(),
        QrStudioError::IoError(e) => {
            format!(
                "A file system error occurred:\n\n{e}\n\n\
                 Please check file permissions and disk space."
            )
        }
        QrStudioError::JsonError(e) => {
            format!(
                "The history file is corrupted:\n\n{e}\n\n\
                 The application will start with an empty history."
            )
        }
    }
}
