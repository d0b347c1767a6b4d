//! Shared application state.

use std::sync::Arc;

use heartline_core::clock::Clock;
use heartline_report::application::ports::{ReportRepository, ReportSink};

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Clock used to stamp receipt times.
    pub clock: Arc<dyn Clock>,
    /// Where every accepted report goes.
    pub report_sink: Arc<dyn ReportSink>,
    /// Durable storage, present when a database is configured.
    pub report_repository: Option<Arc<dyn ReportRepository>>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock>,
        report_sink: Arc<dyn ReportSink>,
        report_repository: Option<Arc<dyn ReportRepository>>,
    ) -> Self {
        Self {
            clock,
            report_sink,
            report_repository,
        }
    }
}
