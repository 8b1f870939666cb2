//! GUI module
//!
//! Provides the Slint-based graphical user interface: callback wiring from
//! the main window into the session controller, debounced preview rendering,
//! history panel synchronization and the export flow.

pub mod gui_controller;

pub use gui_controller::GuiController;
