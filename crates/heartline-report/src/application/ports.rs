//! Outbound ports of the report context.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use heartline_core::error::DomainError;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::report::EnrichedReport;

/// Destination for every accepted report. The default implementation writes
/// a structured log line.
#[async_trait]
pub trait ReportSink: Send + Sync {
    /// Records an accepted report.
    async fn record(&self, report: &EnrichedReport) -> Result<(), DomainError>;
}

/// A report as it comes back from storage.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredReport {
    /// Server-assigned identifier.
    pub report_id: Uuid,
    /// The combined record, as produced by [`EnrichedReport::record`].
    pub record: Value,
    /// Originating address.
    pub client_address: String,
    /// User agent.
    pub client_signature: String,
    /// Receipt time.
    pub received_at: DateTime<Utc>,
}

/// Durable report storage.
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Stores an accepted report.
    async fn insert(&self, report: &EnrichedReport) -> Result<(), DomainError>;

    /// Loads a stored report by ID.
    async fn load(&self, report_id: Uuid) -> Result<Option<StoredReport>, DomainError>;
}
