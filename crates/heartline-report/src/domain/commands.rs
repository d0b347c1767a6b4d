//! Commands for the report context.

use heartline_core::command::Command;
use uuid::Uuid;

use super::metadata::ClientMetadata;

/// Command to accept a report submitted by a player.
#[derive(Debug, Clone)]
pub struct SubmitReport {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Raw request body.
    pub body: Vec<u8>,
    /// Who sent it, derived from request headers.
    pub client: ClientMetadata,
}

impl Command for SubmitReport {
    fn command_type(&self) -> &'static str {
        "report.submit"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
