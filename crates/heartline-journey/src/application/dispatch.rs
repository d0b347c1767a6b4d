//! Outbound port for answer reports.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::domain::scene::Answers;

/// Body sent to the report endpoint: the answers plus a client timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportPayload {
    /// Whichever answers were set when the report was produced.
    #[serde(flatten)]
    pub answers: Answers,
    /// Client-side creation time, RFC 3339 with millisecond precision.
    pub timestamp: String,
}

impl ReportPayload {
    /// Builds a payload stamped with `now`.
    #[must_use]
    pub fn new(answers: Answers, now: DateTime<Utc>) -> Self {
        Self {
            answers,
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Hands a report to whatever delivers it.
///
/// `dispatch` must return immediately. Callers never wait on delivery and
/// never learn whether it succeeded; implementations swallow their own
/// failures.
pub trait ReportDispatch: Send + Sync {
    /// Queues or sends the payload without blocking the caller.
    fn dispatch(&self, payload: ReportPayload);
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::domain::scene::{AnswerKey, Decision};

    #[test]
    fn test_payload_flattens_answers_next_to_timestamp() {
        // Arrange
        let mut answers = Answers::default();
        answers.set(AnswerKey::Q1, "A small, quiet moment".to_owned());
        answers.decision = Some(Decision::Yes);
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();

        // Act
        let json = serde_json::to_value(ReportPayload::new(answers, now)).unwrap();

        // Assert
        assert_eq!(
            json,
            serde_json::json!({
                "q1": "A small, quiet moment",
                "decision": "yes",
                "timestamp": "2025-01-01T00:00:00.000Z",
            })
        );
    }
}
