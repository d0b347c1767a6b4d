//! Heartline report server entry point.

use std::sync::Arc;

use heartline_api::config::ServerConfig;
use heartline_api::error::AppError;
use heartline_api::state::AppState;
use heartline_core::clock::SystemClock;
use heartline_report::application::ports::ReportRepository;
use heartline_report::application::sinks::TracingReportSink;
use heartline_report_store::pg_report_repository::PgReportRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting Heartline report server");

    let config = ServerConfig::from_env()?;

    let report_repository: Option<Arc<dyn ReportRepository>> = match &config.database_url {
        Some(database_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(database_url)
                .await?;
            heartline_report_store::migrate(&pool).await?;
            tracing::info!("Durable report storage enabled");
            Some(Arc::new(PgReportRepository::new(pool)))
        }
        None => {
            tracing::info!("DATABASE_URL not set; reports are logged only");
            None
        }
    };

    let app_state = AppState::new(
        Arc::new(SystemClock),
        Arc::new(TracingReportSink),
        report_repository,
    );

    let addr = config.socket_addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, heartline_api::app(app_state)).await?;

    Ok(())
}
