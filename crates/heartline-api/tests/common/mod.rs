//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use heartline_core::clock::Clock;
use heartline_report::application::ports::{ReportRepository, ReportSink};
use heartline_test_support::FixedClock;
use http_body_util::BodyExt;
use tower::ServiceExt;

use heartline_api::state::AppState;

/// Fixed timestamp used across all integration tests.
fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock(
        chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2026, 2, 14, 9, 0, 0).unwrap(),
    ))
}

/// Build the full app with the given sink and no durable storage.
pub fn build_test_app(sink: Arc<dyn ReportSink>) -> Router {
    heartline_api::app(AppState::new(fixed_clock(), sink, None))
}

/// Build the full app with the given sink and repository.
pub fn build_test_app_with_repository(
    sink: Arc<dyn ReportSink>,
    repository: Arc<dyn ReportRepository>,
) -> Router {
    heartline_api::app(AppState::new(fixed_clock(), sink, Some(repository)))
}

/// Send a POST request with a raw body and extra headers and return the
/// response.
pub async fn post_raw(
    app: Router,
    uri: &str,
    headers: &[(&str, &str)],
    body: impl Into<Body>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    let request = builder.body(body.into()).unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    headers: &[(&str, &str)],
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    post_raw(app, uri, headers, serde_json::to_vec(body).unwrap()).await
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}
