//! GUI controller implementation
//!
//! Owns the main window and the session state, and routes every Slint
//! callback through the session controller: input edits feed the debounce
//! gate, style changes re-render immediately, and the history panel and
//! export flow are driven from here.
//!
//! All state lives in a single `Rc<RefCell<UiState>>` owned by the event
//! loop; the only work leaving the loop is the debounce timer and the export
//! conversion, both of which marshal back via `upgrade_in_event_loop`.

use crate::{HistoryItemData, MainWindow};
use anyhow::{Context, Result};
use image::RgbaImage;
use qrstudio::export::{self, ExportFormat, ExportJob};
use qrstudio::history::{History, HistoryEntry};
use qrstudio::qr::render::{self, RenderOptions};
use qrstudio::qr::{InputMode, WifiEncryption};
use qrstudio::session::{Debouncer, Session};
use qrstudio::utils::data_uri;
use slint::{ComponentHandle, ModelRc, Rgba8Pixel, SharedPixelBuffer, VecModel, Weak};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, error, info, warn};

/// Everything the callbacks mutate, behind one `RefCell`
struct UiState {
    session: Session,
    history: History,
    debouncer: Debouncer,
}

/// GUI controller owning the main window and wiring its callbacks
pub struct GuiController {
    window: MainWindow,
}

impl GuiController {
    /// Build the main window and wire all callbacks
    pub fn new(session: Session, history: History) -> Result<Self> {
        info!("Creating main window");
        let window = MainWindow::new().context("Failed to create main window")?;

        let state = Rc::new(RefCell::new(UiState {
            session,
            history,
            debouncer: Debouncer::new(),
        }));

        Self::wire_input_callbacks(&window, &state);
        Self::wire_style_callbacks(&window, &state);
        Self::wire_history_callbacks(&window, &state);
        Self::wire_export_callback(&window, &state);

        // Populate the initial view: restored history plus the empty-input placeholder
        {
            let ui = state.borrow();
            refresh_history(&window, &ui);
            refresh_preview(&window, &ui);
        }

        info!("Main window created and callbacks wired");
        Ok(Self { window })
    }

    /// Run the GUI event loop until the window is closed
    pub fn run(&self) -> Result<()> {
        self.window.run().context("Slint event loop failed")?;
        Ok(())
    }

    fn wire_input_callbacks(window: &MainWindow, state: &Rc<RefCell<UiState>>) {
        window.on_mode_changed({
            let state = Rc::clone(state);
            let weak = window.as_weak();
            move |mode| {
                let Some(window) = weak.upgrade() else { return };
                let mut ui = state.borrow_mut();
                let mode_value = if mode == 1 { InputMode::Wifi } else { InputMode::Text };
                debug!("Input mode changed to {:?}", mode_value);
                ui.session.set_mode(mode_value);
                window.set_input_mode(mode);
                // The blank-SSID rule applies as soon as the mode flips
                refresh_preview(&window, &ui);
                schedule_debounce(&mut ui, &weak);
            }
        });

        window.on_text_edited({
            let state = Rc::clone(state);
            let weak = window.as_weak();
            move |text| {
                let mut ui = state.borrow_mut();
                ui.session.set_text(text.as_str());
                schedule_debounce(&mut ui, &weak);
            }
        });

        window.on_wifi_ssid_edited({
            let state = Rc::clone(state);
            let weak = window.as_weak();
            move |ssid| {
                let Some(window) = weak.upgrade() else { return };
                let mut ui = state.borrow_mut();
                ui.session.set_wifi_ssid(ssid.as_str());
                // SSID emptiness gates the placeholder immediately
                refresh_preview(&window, &ui);
                schedule_debounce(&mut ui, &weak);
            }
        });

        window.on_wifi_password_edited({
            let state = Rc::clone(state);
            let weak = window.as_weak();
            move |password| {
                let mut ui = state.borrow_mut();
                ui.session.set_wifi_password(password.as_str());
                schedule_debounce(&mut ui, &weak);
            }
        });

        window.on_wifi_encryption_changed({
            let state = Rc::clone(state);
            let weak = window.as_weak();
            move |index| {
                let mut ui = state.borrow_mut();
                ui.session.set_wifi_encryption(WifiEncryption::from_index(index));
                schedule_debounce(&mut ui, &weak);
            }
        });

        window.on_debounced({
            let state = Rc::clone(state);
            let weak = window.as_weak();
            move |payload| {
                let Some(window) = weak.upgrade() else { return };
                let mut ui = state.borrow_mut();
                debug!("Debounced payload published ({} bytes)", payload.len());
                ui.session.commit_debounced(payload.to_string());
                refresh_preview(&window, &ui);
            }
        });
    }

    fn wire_style_callbacks(window: &MainWindow, state: &Rc<RefCell<UiState>>) {
        window.on_fg_color_edited({
            let state = Rc::clone(state);
            let weak = window.as_weak();
            move |color| {
                let Some(window) = weak.upgrade() else { return };
                let mut ui = state.borrow_mut();
                ui.session.set_fg_color(color.as_str());
                refresh_preview(&window, &ui);
            }
        });

        window.on_bg_color_edited({
            let state = Rc::clone(state);
            let weak = window.as_weak();
            move |color| {
                let Some(window) = weak.upgrade() else { return };
                let mut ui = state.borrow_mut();
                ui.session.set_bg_color(color.as_str());
                refresh_preview(&window, &ui);
            }
        });

        window.on_pick_logo({
            let state = Rc::clone(state);
            let weak = window.as_weak();
            move || {
                let Some(window) = weak.upgrade() else { return };
                let Some(path) = rfd::FileDialog::new()
                    .add_filter("Images", &["png", "jpg", "jpeg", "svg"])
                    .pick_file()
                else {
                    debug!("Logo selection cancelled");
                    return;
                };

                let Some(mime) = data_uri::mime_for_path(&path) else {
                    warn!("Unsupported logo file type: {}", path.display());
                    window.set_status_text("Unsupported logo file type".into());
                    return;
                };

                match std::fs::read(&path) {
                    Ok(bytes) => {
                        info!("Logo loaded from {}", path.display());
                        let uri = data_uri::encode(&bytes, mime);
                        let mut ui = state.borrow_mut();
                        ui.session.set_logo(Some(uri));
                        window.set_has_logo(true);
                        refresh_preview(&window, &ui);
                    }
                    Err(e) => {
                        warn!("Failed to read logo file {}: {}", path.display(), e);
                        window.set_status_text("Could not read the selected file".into());
                    }
                }
            }
        });

        window.on_clear_logo({
            let state = Rc::clone(state);
            let weak = window.as_weak();
            move || {
                let Some(window) = weak.upgrade() else { return };
                let mut ui = state.borrow_mut();
                ui.session.set_logo(None);
                window.set_has_logo(false);
                refresh_preview(&window, &ui);
            }
        });
    }

    fn wire_history_callbacks(window: &MainWindow, state: &Rc<RefCell<UiState>>) {
        window.on_save_to_history({
            let state = Rc::clone(state);
            let weak = window.as_weak();
            move || {
                let Some(window) = weak.upgrade() else { return };
                let mut ui = state.borrow_mut();
                if ui.session.shows_placeholder() {
                    return;
                }
                let entry = ui.session.snapshot_entry();
                info!("Saving history entry for value: {}", entry.value);
                if let Err(e) = ui.history.add(entry) {
                    warn!("Failed to persist history: {}", e);
                    window.set_status_text("Saved in memory, but writing history failed".into());
                }
                refresh_history(&window, &ui);
            }
        });

        window.on_load_history_entry({
            let state = Rc::clone(state);
            let weak = window.as_weak();
            move |index| {
                let Some(window) = weak.upgrade() else { return };
                let Ok(index) = usize::try_from(index) else { return };
                let mut ui = state.borrow_mut();
                let Some(entry) = ui.history.get(index).cloned() else { return };
                info!("Loading history entry {}", entry.timestamp);

                ui.session.load_entry(&entry);
                // Any half-typed edit is superseded by the restored value
                ui.debouncer.cancel_pending();

                window.set_input_mode(0);
                window.set_text_value(entry.value.as_str().into());
                window.set_fg_color(entry.fg_color.as_str().into());
                window.set_bg_color(entry.bg_color.as_str().into());
                window.set_has_logo(entry.logo.is_some());
                refresh_preview(&window, &ui);
            }
        });

        window.on_delete_history_entry({
            let state = Rc::clone(state);
            let weak = window.as_weak();
            move |index| {
                let Some(window) = weak.upgrade() else { return };
                let Ok(index) = usize::try_from(index) else { return };
                let mut ui = state.borrow_mut();
                let Some(timestamp) = ui.history.get(index).map(|e| e.timestamp.clone()) else {
                    return;
                };
                info!("Deleting history entry {}", timestamp);
                if let Err(e) = ui.history.delete(&timestamp) {
                    warn!("Failed to persist history deletion: {}", e);
                }
                refresh_history(&window, &ui);
            }
        });
    }

    fn wire_export_callback(window: &MainWindow, state: &Rc<RefCell<UiState>>) {
        window.on_export_requested({
            let state = Rc::clone(state);
            let weak = window.as_weak();
            move |format_name| {
                let Some(window) = weak.upgrade() else { return };
                let Some(format) = ExportFormat::from_name(format_name.as_str()) else {
                    warn!("Unknown export format requested: {}", format_name);
                    return;
                };
                if window.get_export_in_flight() {
                    return;
                }

                let job = {
                    let ui = state.borrow();
                    if ui.session.shows_placeholder() {
                        return;
                    }
                    ExportJob::new(
                        ui.session.debounced_payload(),
                        ui.session.style().clone(),
                    )
                };

                let Some(path) = rfd::FileDialog::new()
                    .set_file_name(export::default_filename(format))
                    .save_file()
                else {
                    debug!("Export cancelled from save dialog");
                    return;
                };

                info!("Exporting {} to {}", format.extension(), path.display());
                window.set_export_in_flight(true);
                window.set_status_text("Exporting…".into());

                let weak = weak.clone();
                std::thread::spawn(move || {
                    let result = export::export_bytes(&job, format)
                        .and_then(|bytes| export::write_export(&path, &bytes));

                    let status = match &result {
                        Ok(()) => format!("Saved {}", path.display()),
                        Err(e) => {
                            error!("Export failed: {}", e);
                            "Export failed, nothing was written".to_string()
                        }
                    };

                    // Success and failure both land here so the export
                    // controls are never left disabled
                    let _ = weak.upgrade_in_event_loop(move |window| {
                        window.set_export_in_flight(false);
                        window.set_status_text(status.into());
                    });
                });
            }
        });
    }
}

/// Recompute the derived payload and restart the quiet window.
/// The delivery marshals back to the event loop as the `debounced` callback.
fn schedule_debounce(ui: &mut UiState, weak: &Weak<MainWindow>) {
    let payload = ui.session.payload();
    let weak = weak.clone();
    ui.debouncer.submit(payload, move |value| {
        let _ = weak.upgrade_in_event_loop(move |window| {
            window.invoke_debounced(value.into());
        });
    });
}

/// Sync the preview area (placeholder vs rendered symbol), the action
/// enablement and the color swatches with the session state.
fn refresh_preview(window: &MainWindow, ui: &UiState) {
    let session = &ui.session;
    let placeholder = session.shows_placeholder();
    window.set_show_placeholder(placeholder);
    window.set_actions_enabled(!placeholder);

    let style = session.style();
    let (fg, bg) = match (
        render::parse_hex_color(&style.fg_color),
        render::parse_hex_color(&style.bg_color),
    ) {
        (Ok(fg), Ok(bg)) => (fg, bg),
        _ => {
            warn!("Invalid color value, keeping previous preview");
            window.set_status_text("Invalid color value".into());
            return;
        }
    };
    window.set_fg_preview(slint_color(fg));
    window.set_bg_preview(slint_color(bg));
    window.set_status_text("".into());

    if placeholder {
        return;
    }

    let mut opts = RenderOptions::preview(fg, bg);
    if let Some(uri) = &style.logo {
        match render::logo_from_data_uri(uri, render::LOGO_SIZE) {
            Ok(spec) => opts.logo = Some(spec),
            Err(e) => warn!("Rendering without logo: {}", e),
        }
    }

    match render::render(session.debounced_payload(), &opts) {
        Ok(img) => window.set_qr_image(slint_image(&img)),
        Err(e) => {
            // Oversized payloads land here; fall back to the placeholder
            error!("Failed to render QR preview: {}", e);
            window.set_show_placeholder(true);
            window.set_actions_enabled(false);
        }
    }
}

/// Rebuild the history panel model from the current entries
fn refresh_history(window: &MainWindow, ui: &UiState) {
    let items: Vec<HistoryItemData> = ui
        .history
        .entries()
        .iter()
        .map(|entry| HistoryItemData {
            value: entry.value.as_str().into(),
            timestamp: entry.timestamp.as_str().into(),
            thumbnail: thumbnail_image(entry),
        })
        .collect();
    debug!("History panel refreshed with {} rows", items.len());
    window.set_history_items(ModelRc::new(VecModel::from(items)));
}

/// Render a small preview for a history row. Falls back to an empty image if
/// the stored entry cannot be rendered.
fn thumbnail_image(entry: &HistoryEntry) -> slint::Image {
    let fg = render::parse_hex_color(&entry.fg_color).unwrap_or(image::Rgba([0, 0, 0, 255]));
    let bg = render::parse_hex_color(&entry.bg_color).unwrap_or(image::Rgba([255, 255, 255, 255]));

    match render::render(&entry.value, &RenderOptions::thumbnail(fg, bg)) {
        Ok(img) => slint_image(&img),
        Err(e) => {
            warn!("Failed to render history thumbnail: {}", e);
            slint::Image::default()
        }
    }
}

/// Copy an RGBA image into a Slint texture
fn slint_image(img: &RgbaImage) -> slint::Image {
    let buffer = SharedPixelBuffer::<Rgba8Pixel>::clone_from_slice(
        img.as_raw(),
        img.width(),
        img.height(),
    );
    slint::Image::from_rgba8(buffer)
}

/// Convert an `image` color to a Slint color
fn slint_color(color: image::Rgba<u8>) -> slint::Color {
    slint::Color::from_argb_u8(color[3], color[0], color[1], color[2])
}
