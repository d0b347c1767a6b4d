//! Command handlers for the report context.

use heartline_core::clock::Clock;
use heartline_core::command::Command;
use tracing::{debug, warn};

use super::ports::{ReportRepository, ReportSink};
use crate::domain::commands::SubmitReport;
use crate::domain::errors::ReportError;
use crate::domain::report::{EnrichedReport, parse_report_body};

/// Handles the `SubmitReport` command.
///
/// Parses the body, enriches it, and hands it to the sink and, when one is
/// configured, the repository. Sink and repository failures are logged and
/// do not affect the outcome; the report is still accepted.
///
/// # Errors
///
/// Returns `ReportError::MalformedPayload` if the body is not JSON. Nothing
/// is recorded in that case.
pub async fn handle_submit_report(
    command: &SubmitReport,
    clock: &dyn Clock,
    sink: &dyn ReportSink,
    repository: Option<&dyn ReportRepository>,
) -> Result<EnrichedReport, ReportError> {
    let body = parse_report_body(&command.body).inspect_err(|e| {
        warn!(
            correlation_id = %command.correlation_id(),
            error = %e,
            "rejected report"
        );
    })?;

    let report = EnrichedReport::enrich(body, command.client.clone(), clock.now());

    if let Err(e) = sink.record(&report).await {
        warn!(report_id = %report.report_id, error = %e, "report sink failed");
    }

    if let Some(repository) = repository {
        match repository.insert(&report).await {
            Ok(()) => debug!(report_id = %report.report_id, "report stored"),
            Err(e) => warn!(report_id = %report.report_id, error = %e, "report storage failed"),
        }
    }

    Ok(report)
}
