//! Route for answer report submission.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::{Json, Router, routing::post};
use tracing::{info, instrument};
use uuid::Uuid;

use heartline_report::application::command_handlers;
use heartline_report::domain::commands;
use heartline_report::domain::metadata::{
    ClientMetadata, FORWARDED_FOR_HEADER, REAL_IP_HEADER, USER_AGENT_HEADER,
};

use crate::error::{Acknowledgement, ApiError};
use crate::state::AppState;

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
}

/// Derives client metadata from the request headers. Bytes that are not
/// valid UTF-8 are replaced rather than dropping the header.
#[must_use]
pub fn extract_client_metadata(headers: &HeaderMap) -> ClientMetadata {
    ClientMetadata::from_headers(
        header(headers, FORWARDED_FOR_HEADER).as_deref(),
        header(headers, REAL_IP_HEADER).as_deref(),
        header(headers, USER_AGENT_HEADER).as_deref(),
    )
}

/// POST /report
#[instrument(skip(state, headers, body), fields(body_len = body.len()))]
async fn submit_report(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Acknowledgement>, ApiError> {
    let command = commands::SubmitReport {
        correlation_id: Uuid::new_v4(),
        body: body.to_vec(),
        client: extract_client_metadata(&headers),
    };

    info!(
        correlation_id = %command.correlation_id,
        client_address = %command.client.client_address,
        "handling submit_report command"
    );

    command_handlers::handle_submit_report(
        &command,
        state.clock.as_ref(),
        state.report_sink.as_ref(),
        state.report_repository.as_deref(),
    )
    .await?;

    Ok(Json(Acknowledgement { ok: true }))
}

/// Returns the router for report submission.
pub fn router() -> Router<AppState> {
    Router::new().route("/report", post(submit_report))
}
