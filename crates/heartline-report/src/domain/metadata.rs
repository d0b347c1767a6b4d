//! Client identification derived from request headers.

use serde::Serialize;

/// Placeholder used when a header gives nothing usable.
pub const UNKNOWN: &str = "unknown";

/// Header carrying the proxy chain; the first entry is the originating client.
pub const FORWARDED_FOR_HEADER: &str = "x-forwarded-for";

/// Header some proxies set to the client address directly.
pub const REAL_IP_HEADER: &str = "x-real-ip";

/// Header identifying the client software.
pub const USER_AGENT_HEADER: &str = "user-agent";

/// Who sent a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientMetadata {
    /// Originating address, or `"unknown"`.
    pub client_address: String,
    /// User agent, or `"unknown"`.
    pub client_signature: String,
}

impl ClientMetadata {
    /// Derives client metadata from raw header values.
    ///
    /// The address is the first comma-separated entry of the forwarded-for
    /// chain; if that is absent or blank the real-ip header is used, and
    /// failing both, `"unknown"`.
    #[must_use]
    pub fn from_headers(
        forwarded_for: Option<&str>,
        real_ip: Option<&str>,
        user_agent: Option<&str>,
    ) -> Self {
        let forwarded = forwarded_for
            .and_then(|chain| chain.split(',').next())
            .map(str::trim)
            .filter(|address| !address.is_empty());
        let real = real_ip.map(str::trim).filter(|address| !address.is_empty());

        let client_address = forwarded.or(real).unwrap_or(UNKNOWN).to_owned();
        let client_signature = user_agent
            .filter(|agent| !agent.is_empty())
            .unwrap_or(UNKNOWN)
            .to_owned();

        Self {
            client_address,
            client_signature,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_forwarded_entry_wins() {
        let client = ClientMetadata::from_headers(
            Some("203.0.113.5, 10.0.0.1"),
            Some("198.51.100.7"),
            Some("Mozilla/5.0"),
        );

        assert_eq!(client.client_address, "203.0.113.5");
        assert_eq!(client.client_signature, "Mozilla/5.0");
    }

    #[test]
    fn test_blank_forwarded_entry_falls_back_to_real_ip() {
        let client = ClientMetadata::from_headers(Some(" , 10.0.0.1"), Some("198.51.100.7"), None);

        assert_eq!(client.client_address, "198.51.100.7");
    }

    #[test]
    fn test_missing_headers_yield_unknown() {
        let client = ClientMetadata::from_headers(None, None, None);

        assert_eq!(client.client_address, UNKNOWN);
        assert_eq!(client.client_signature, UNKNOWN);
    }

    #[test]
    fn test_empty_real_ip_yields_unknown() {
        let client = ClientMetadata::from_headers(Some(""), Some(""), Some(""));

        assert_eq!(client.client_address, UNKNOWN);
        assert_eq!(client.client_signature, UNKNOWN);
    }
}
