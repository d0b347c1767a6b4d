//! Heartline API error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use heartline_report::domain::errors::ReportError;
use serde::Serialize;
use sqlx::migrate::MigrateError;
use thiserror::Error;

/// Startup and runtime errors for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// An environment variable is invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Database connection or pool error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The report schema could not be migrated.
    #[error("migration error: {0}")]
    Migration(#[from] MigrateError),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// JSON acknowledgement returned by the report endpoint.
#[derive(Debug, Serialize)]
pub struct Acknowledgement {
    /// Whether the report was accepted.
    pub ok: bool,
}

/// HTTP-layer wrapper around `ReportError` that implements `IntoResponse`.
#[derive(Debug)]
pub struct ApiError(pub ReportError);

impl From<ReportError> for ApiError {
    fn from(err: ReportError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            ReportError::MalformedPayload(_) => StatusCode::BAD_REQUEST,
        };

        (status, Json(Acknowledgement { ok: false })).into_response()
    }
}
