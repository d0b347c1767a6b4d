//! Heartline report server.
//!
//! Exposes the router and its building blocks so the binary and the
//! integration tests assemble the same application.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Builds the application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    // TODO: Replace CorsLayer::permissive() with the card's own origin once it is hosted.
    Router::new()
        .merge(routes::health::router())
        .nest("/api", routes::report::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
