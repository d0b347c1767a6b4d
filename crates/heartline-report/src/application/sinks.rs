//! Built-in report sinks.

use async_trait::async_trait;
use heartline_core::error::DomainError;
use tracing::info;

use super::ports::ReportSink;
use crate::domain::report::EnrichedReport;

/// Writes each report as one structured log event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReportSink;

#[async_trait]
impl ReportSink for TracingReportSink {
    async fn record(&self, report: &EnrichedReport) -> Result<(), DomainError> {
        info!(
            report_id = %report.report_id,
            client_address = %report.client.client_address,
            client_signature = %report.client.client_signature,
            record = %report.record(),
            "answer report received"
        );
        Ok(())
    }
}
