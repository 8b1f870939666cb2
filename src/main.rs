//! QR Studio - desktop QR code generator
//!
//! Generates styled QR codes live from text or Wi-Fi credentials, with
//! PNG/SVG export and a persisted generation history.

// Hide the console window on Windows release builds
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]
#![expect(
    missing_docs,
    reason = "Slint-generated code from include_modules! lacks doc comments"
)]
#![allow(clippy::unwrap_used)] // Slint-generated code from include_modules! uses .unwrap() extensively

// GUI module is only in the binary, not the library
mod gui;

use anyhow::{Context, Result};
use gui::GuiController;
use qrstudio::history::{History, HistoryStore};
use qrstudio::session::Session;
use qrstudio::utils;
use tracing::{error, info};

// Include Slint-generated code
slint::include_modules!();

/// Main entry point for the application
///
/// Initializes logging, restores the persisted history, builds the GUI and
/// enters the event loop.
fn main() -> Result<()> {
    utils::init_logging().context("Failed to initialize logging system")?;

    info!("QR Studio v{} starting...", env!("CARGO_PKG_VERSION"));

    let history = History::restore(HistoryStore::new(HistoryStore::default_path()));
    info!("History restored with {} entries", history.len());

    let gui_controller = match GuiController::new(Session::new(), history)
        .context("Failed to initialize GUI")
    {
        Ok(controller) => controller,
        Err(e) => {
            error!("Failed to initialize GUI: {:#}", e);
            show_error_and_exit(&format!(
                "Failed to start QR Studio:\n\n{e:#}\n\n\
                 Please ensure your graphics drivers are up to date."
            ));
            return Err(e);
        }
    };

    info!("Starting GUI event loop");
    gui_controller
        .run()
        .context("GUI event loop terminated with error")?;

    info!("QR Studio shutting down");

    Ok(())
}

/// Shows an error dialog and exits the application.
fn show_error_and_exit(message: &str) {
    use rfd::MessageDialog;

    MessageDialog::new()
        .set_title("QR Studio - Error")
        .set_description(message)
        .set_buttons(rfd::MessageButtons::Ok)
        .set_level(rfd::MessageLevel::Error)
        .show();

    std::process::exit(1);
}
