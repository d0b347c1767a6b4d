//! Report sink and repository doubles.

use std::sync::Mutex;

use async_trait::async_trait;
use heartline_core::error::DomainError;
use heartline_report::application::ports::{ReportRepository, ReportSink, StoredReport};
use heartline_report::domain::report::EnrichedReport;
use uuid::Uuid;

/// A sink that keeps every report it is given.
#[derive(Debug, Default)]
pub struct RecordingReportSink {
    reports: Mutex<Vec<EnrichedReport>>,
}

impl RecordingReportSink {
    /// Reports recorded so far, oldest first.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn reports(&self) -> Vec<EnrichedReport> {
        self.reports.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReportSink for RecordingReportSink {
    async fn record(&self, report: &EnrichedReport) -> Result<(), DomainError> {
        self.reports.lock().unwrap().push(report.clone());
        Ok(())
    }
}

/// A sink that always fails.
#[derive(Debug)]
pub struct FailingReportSink;

#[async_trait]
impl ReportSink for FailingReportSink {
    async fn record(&self, _report: &EnrichedReport) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("sink unavailable".into()))
    }
}

/// An in-memory repository that records inserts and serves them back.
#[derive(Debug, Default)]
pub struct RecordingReportRepository {
    stored: Mutex<Vec<StoredReport>>,
}

impl RecordingReportRepository {
    /// Reports inserted so far, oldest first.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn stored(&self) -> Vec<StoredReport> {
        self.stored.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReportRepository for RecordingReportRepository {
    async fn insert(&self, report: &EnrichedReport) -> Result<(), DomainError> {
        self.stored.lock().unwrap().push(StoredReport {
            report_id: report.report_id,
            record: report.record(),
            client_address: report.client.client_address.clone(),
            client_signature: report.client.client_signature.clone(),
            received_at: report.received_at,
        });
        Ok(())
    }

    async fn load(&self, report_id: Uuid) -> Result<Option<StoredReport>, DomainError> {
        Ok(self
            .stored
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.report_id == report_id)
            .cloned())
    }
}

/// A repository that always returns an infrastructure error.
#[derive(Debug)]
pub struct FailingReportRepository;

#[async_trait]
impl ReportRepository for FailingReportRepository {
    async fn insert(&self, _report: &EnrichedReport) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn load(&self, _report_id: Uuid) -> Result<Option<StoredReport>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }
}
