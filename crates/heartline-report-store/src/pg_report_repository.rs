//! `PostgreSQL` implementation of the `ReportRepository` trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use heartline_core::error::DomainError;
use heartline_report::application::ports::{ReportRepository, StoredReport};
use heartline_report::domain::report::EnrichedReport;

type ReportRow = (Uuid, Value, String, String, DateTime<Utc>);

/// PostgreSQL-backed report repository.
#[derive(Debug, Clone)]
pub struct PgReportRepository {
    pool: PgPool,
}

impl PgReportRepository {
    /// Creates a new `PgReportRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn infrastructure(e: &sqlx::Error) -> DomainError {
    DomainError::Infrastructure(e.to_string())
}

#[async_trait]
impl ReportRepository for PgReportRepository {
    async fn insert(&self, report: &EnrichedReport) -> Result<(), DomainError> {
        // Bound as text: a JSONB parameter would reject `\u0000` escapes.
        sqlx::query(
            "INSERT INTO reports (report_id, record, client_address, client_signature, received_at) \
             VALUES ($1, $2::json, $3, $4, $5)",
        )
        .bind(report.report_id)
        .bind(report.record().to_string())
        .bind(&report.client.client_address)
        .bind(&report.client.client_signature)
        .bind(report.received_at)
        .execute(&self.pool)
        .await
        .map_err(|e| infrastructure(&e))?;

        debug!(report_id = %report.report_id, "inserted report");
        Ok(())
    }

    async fn load(&self, report_id: Uuid) -> Result<Option<StoredReport>, DomainError> {
        let row: Option<ReportRow> = sqlx::query_as(
            "SELECT report_id, record, client_address, client_signature, received_at \
             FROM reports WHERE report_id = $1",
        )
        .bind(report_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| infrastructure(&e))?;

        Ok(row.map(
            |(report_id, record, client_address, client_signature, received_at)| StoredReport {
                report_id,
                record,
                client_address,
                client_signature,
                received_at,
            },
        ))
    }
}
