//! Upstream failure taxonomy

use thiserror::Error;

/// Why an outbound call to the upstream API did not yield usable data
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpstreamError {
    /// The call exceeded its time bound
    #[error("upstream request timed out")]
    Timeout,
    /// Connection, TLS or transport failure
    #[error("network error: {0}")]
    Network(String),
    /// Non-2xx HTTP status
    #[error("upstream returned HTTP {0}")]
    Status(u16),
    /// Body was not the expected JSON
    #[error("invalid upstream response: {0}")]
    Decode(String),
    /// JSON was valid but a required field was absent
    #[error("upstream response is missing '{0}'")]
    MissingField(&'static str),
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            UpstreamError::Timeout
        } else if err.is_decode() {
            UpstreamError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            UpstreamError::Status(status.as_u16())
        } else {
            UpstreamError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for UpstreamError {
    fn from(err: serde_json::Error) -> Self {
        UpstreamError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_error_maps_to_decode() {
        let err = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        assert!(matches!(UpstreamError::from(err), UpstreamError::Decode(_)));
    }

    #[test]
    fn test_display() {
        assert_eq!(UpstreamError::Status(503).to_string(), "upstream returned HTTP 503");
        assert_eq!(
            UpstreamError::MissingField("query.pages").to_string(),
            "upstream response is missing 'query.pages'"
        );
    }
}
