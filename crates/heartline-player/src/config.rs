//! Player configuration read from the environment.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::PlayerError;

const DEFAULT_REPORT_URL: &str = "http://127.0.0.1:3000/api/report";
const DEFAULT_FLUSH_GRACE_MS: u64 = 2_000;

/// Player configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerConfig {
    /// Where reports are posted (`HEARTLINE_REPORT_URL`).
    pub report_url: String,
    /// Card definition to play instead of the built-in one (`HEARTLINE_CARD`).
    pub card_path: Option<PathBuf>,
    /// How long to wait for queued reports on exit (`HEARTLINE_FLUSH_GRACE_MS`).
    pub flush_grace: Duration,
}

impl PlayerConfig {
    /// Reads configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `PlayerError::Config` for an unparsable URL or grace period.
    pub fn from_env() -> Result<Self, PlayerError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns `PlayerError::Config` for an unparsable URL or grace period.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, PlayerError> {
        let report_url = lookup("HEARTLINE_REPORT_URL")
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_REPORT_URL.to_string());
        reqwest::Url::parse(&report_url).map_err(|e| {
            PlayerError::Config(format!("HEARTLINE_REPORT_URL must be a valid URL: {e}"))
        })?;

        let card_path = lookup("HEARTLINE_CARD")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        let flush_grace_ms = match lookup("HEARTLINE_FLUSH_GRACE_MS") {
            Some(raw) => raw.trim().parse().map_err(|e| {
                PlayerError::Config(format!(
                    "HEARTLINE_FLUSH_GRACE_MS must be a whole number of milliseconds: {e}"
                ))
            })?,
            None => DEFAULT_FLUSH_GRACE_MS,
        };

        Ok(Self {
            report_url,
            card_path,
            flush_grace: Duration::from_millis(flush_grace_ms),
        })
    }
}
