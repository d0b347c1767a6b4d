//! Report dispatch double.

use std::sync::Mutex;

use heartline_journey::application::dispatch::{ReportDispatch, ReportPayload};

/// Keeps every payload handed to it.
#[derive(Debug, Default)]
pub struct RecordingDispatcher {
    sent: Mutex<Vec<ReportPayload>>,
}

impl RecordingDispatcher {
    /// Payloads dispatched so far, oldest first.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn dispatched(&self) -> Vec<ReportPayload> {
        self.sent.lock().unwrap().clone()
    }
}

impl ReportDispatch for RecordingDispatcher {
    fn dispatch(&self, payload: ReportPayload) {
        self.sent.lock().unwrap().push(payload);
    }
}
