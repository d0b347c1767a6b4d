//! Player error types.

use heartline_journey::content::ContentError;
use thiserror::Error;

/// Startup and runtime errors for the player.
#[derive(Debug, Error)]
pub enum PlayerError {
    /// An environment variable is invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The card could not be loaded.
    #[error(transparent)]
    Content(#[from] ContentError),

    /// Terminal input or output failed.
    #[error("terminal error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from a single report delivery attempt. These never reach the
/// player; delivery failures are logged and dropped.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request could not be sent or the connection failed.
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("report endpoint responded with status {0}")]
    HttpStatus(reqwest::StatusCode),
}
