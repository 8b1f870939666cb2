//! Utility modules
//!
//! Provides data URI encoding for logo images, application data directory
//! resolution, and logging setup.

pub mod data_uri;
pub mod logging;
pub mod paths;

pub use logging::init_logging;
