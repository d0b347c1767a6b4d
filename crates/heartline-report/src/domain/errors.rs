//! Report error types.

use thiserror::Error;

/// Errors raised while accepting a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The request body is not JSON.
    #[error("malformed report payload: {0}")]
    MalformedPayload(String),
}
