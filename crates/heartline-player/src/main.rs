//! Heartline terminal player entry point.

use std::io::Write;
use std::sync::Arc;

use heartline_core::clock::SystemClock;
use heartline_journey::application::controller::JourneyController;
use heartline_journey::content::CardContent;
use heartline_player::app;
use heartline_player::config::PlayerConfig;
use heartline_player::error::PlayerError;
use heartline_player::transport::{DeliveryWorker, HttpTransport, ReportDispatcher};
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), PlayerError> {
    // Logs go to stderr so they never interleave with the card on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .compact()
        .with_writer(std::io::stderr)
        .init();

    let config = PlayerConfig::from_env()?;
    let content = match &config.card_path {
        Some(path) => CardContent::load(path)?,
        None => CardContent::builtin()?,
    };
    tracing::info!(report_url = %config.report_url, "Starting Heartline player");

    let transport = HttpTransport::new(config.report_url.clone());
    let (beacon, worker) = DeliveryWorker::spawn(transport.clone());
    let dispatcher = Arc::new(ReportDispatcher::new(Some(beacon), transport));
    let in_flight = dispatcher.in_flight();
    let mut controller = JourneyController::new(content, Arc::new(SystemClock), dispatcher);

    let mut stdout = std::io::stdout();
    let destination = app::run(&mut controller, BufReader::new(tokio::io::stdin()), &mut stdout).await?;

    // The controller holds the last beacon; dropping it lets the worker drain.
    // Direct posts are tracked separately and flushed alongside.
    drop(controller);

    if let Some(destination) = destination {
        writeln!(stdout, "\nOpening {destination}")?;
    } else {
        writeln!(stdout)?;
    }

    tokio::join!(
        worker.flush(config.flush_grace),
        in_flight.flush(config.flush_grace)
    );

    Ok(())
}
