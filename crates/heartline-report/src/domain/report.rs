//! Parsed and enriched reports.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::errors::ReportError;
use super::metadata::ClientMetadata;

/// Key under which a non-object JSON body is kept.
pub const NON_OBJECT_BODY_KEY: &str = "body";

/// Parses a request body as JSON. Objects are taken as-is; any other JSON
/// value is wrapped under [`NON_OBJECT_BODY_KEY`].
///
/// # Errors
///
/// Returns `ReportError::MalformedPayload` if the bytes are not JSON.
pub fn parse_report_body(bytes: &[u8]) -> Result<Map<String, Value>, ReportError> {
    let value: Value =
        serde_json::from_slice(bytes).map_err(|e| ReportError::MalformedPayload(e.to_string()))?;
    Ok(match value {
        Value::Object(map) => map,
        other => {
            let mut map = Map::new();
            map.insert(NON_OBJECT_BODY_KEY.to_owned(), other);
            map
        }
    })
}

/// A client report plus the server-side facts about its arrival.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedReport {
    /// Server-assigned identifier, time ordered.
    pub report_id: Uuid,
    /// The client body, unvalidated.
    pub body: Map<String, Value>,
    /// Who sent it.
    pub client: ClientMetadata,
    /// When the server received it.
    pub received_at: DateTime<Utc>,
}

impl EnrichedReport {
    /// Wraps a parsed body with client metadata and receipt time.
    #[must_use]
    pub fn enrich(body: Map<String, Value>, client: ClientMetadata, received_at: DateTime<Utc>) -> Self {
        Self {
            report_id: Uuid::now_v7(),
            body,
            client,
            received_at,
        }
    }

    /// The combined record: client keys followed by `clientAddress`,
    /// `clientSignature` and `receivedAt`. Server keys overwrite same-named
    /// client keys.
    #[must_use]
    pub fn record(&self) -> Value {
        let mut record = self.body.clone();
        record.insert(
            "clientAddress".to_owned(),
            Value::String(self.client.client_address.clone()),
        );
        record.insert(
            "clientSignature".to_owned(),
            Value::String(self.client.client_signature.clone()),
        );
        record.insert(
            "receivedAt".to_owned(),
            Value::String(self.received_at.to_rfc3339_opts(SecondsFormat::Millis, true)),
        );
        Value::Object(record)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    fn client() -> ClientMetadata {
        ClientMetadata::from_headers(Some("203.0.113.5"), None, Some("curl/8.0"))
    }

    #[test]
    fn test_parse_object_body_passes_keys_through() {
        let body = parse_report_body(br#"{"q1":"Home","extra":{"nested":true}}"#).unwrap();

        assert_eq!(body["q1"], "Home");
        assert_eq!(body["extra"], json!({ "nested": true }));
    }

    #[test]
    fn test_parse_non_object_json_is_wrapped() {
        let body = parse_report_body(b"[1,2,3]").unwrap();

        assert_eq!(body[NON_OBJECT_BODY_KEY], json!([1, 2, 3]));
    }

    #[test]
    fn test_parse_invalid_json_is_malformed() {
        for raw in [&b"{not json"[..], b"", b"decision=yes"] {
            let result = parse_report_body(raw);
            assert!(matches!(result, Err(ReportError::MalformedPayload(_))));
        }
    }

    #[test]
    fn test_record_appends_server_fields() {
        // Arrange
        let received_at = Utc.with_ymd_and_hms(2026, 2, 14, 9, 30, 0).unwrap();
        let body = parse_report_body(br#"{"decision":"yes","timestamp":"2025-01-01T00:00:00Z"}"#)
            .unwrap();

        // Act
        let record = EnrichedReport::enrich(body, client(), received_at).record();

        // Assert
        assert_eq!(
            record,
            json!({
                "decision": "yes",
                "timestamp": "2025-01-01T00:00:00Z",
                "clientAddress": "203.0.113.5",
                "clientSignature": "curl/8.0",
                "receivedAt": "2026-02-14T09:30:00.000Z",
            })
        );
    }

    #[test]
    fn test_server_fields_overwrite_client_supplied_ones() {
        let received_at = Utc.with_ymd_and_hms(2026, 2, 14, 9, 30, 0).unwrap();
        let body = parse_report_body(br#"{"clientAddress":"spoofed"}"#).unwrap();

        let record = EnrichedReport::enrich(body, client(), received_at).record();

        assert_eq!(record["clientAddress"], "203.0.113.5");
    }
}
