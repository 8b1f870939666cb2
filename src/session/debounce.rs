//! Debounce gate
//!
//! Exposes the most recent payload value only after it has remained unchanged
//! for a fixed quiet window. Each new edit restarts the window; no value is
//! skipped, only delayed. A pending delivery is cancelled when a newer edit
//! arrives or when the owner is torn down.
//!
//! The timer is a short-lived thread parked on `recv_timeout`: an explicit
//! cancel (or dropping the handle) wakes it before the deadline and the
//! callback never runs; otherwise the timeout elapses and the callback fires
//! exactly once.

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

/// Quiet window before an edited payload is considered stable
pub const QUIET_WINDOW: Duration = Duration::from_millis(500);

/// Handle to a pending single-shot timer
///
/// Dropping the handle cancels the pending callback, so a teardown of the
/// owning view never leaves a stray delivery behind.
#[derive(Debug)]
pub struct DebounceTimer {
    cancel_tx: mpsc::Sender<()>,
}

impl DebounceTimer {
    /// Start a single-shot timer that invokes `callback` after `duration`
    /// unless cancelled first.
    pub fn start<F>(duration: Duration, callback: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let (cancel_tx, cancel_rx) = mpsc::channel::<()>();
        thread::spawn(move || {
            // Timeout means the quiet window elapsed with the handle still
            // alive; anything else is a cancellation (explicit send or the
            // handle being dropped).
            if matches!(cancel_rx.recv_timeout(duration), Err(mpsc::RecvTimeoutError::Timeout)) {
                callback();
            }
        });
        Self { cancel_tx }
    }

    /// Cancel the pending callback. A timer that already fired ignores this.
    pub fn cancel(self) {
        let _ = self.cancel_tx.send(());
    }
}

/// Debouncer managing at most one pending delivery
///
/// `submit` replaces any pending timer, so rapid edits collapse into a single
/// delivery carrying the last submitted value.
#[derive(Debug, Default)]
pub struct Debouncer {
    pending: Option<DebounceTimer>,
}

impl Debouncer {
    /// Create a debouncer with no pending delivery
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `deliver(value)` after the quiet window, cancelling any
    /// previously pending delivery.
    pub fn submit<F>(&mut self, value: String, deliver: F)
    where
        F: FnOnce(String) + Send + 'static,
    {
        self.submit_after(QUIET_WINDOW, value, deliver);
    }

    /// Like [`submit`](Self::submit) with an explicit quiet window
    pub fn submit_after<F>(&mut self, quiet_window: Duration, value: String, deliver: F)
    where
        F: FnOnce(String) + Send + 'static,
    {
        if let Some(previous) = self.pending.take() {
            previous.cancel();
        }
        self.pending = Some(DebounceTimer::start(quiet_window, move || deliver(value)));
    }

    /// Drop any pending delivery without scheduling a new one
    pub fn cancel_pending(&mut self) {
        if let Some(previous) = self.pending.take() {
            previous.cancel();
        }
    }
}
