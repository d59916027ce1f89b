//! Upstream request/response types and the fetch capability

use super::UpstreamError;
use async_trait::async_trait;
use serde::de::DeserializeOwned;

/// GET request to the upstream API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamRequest {
    /// Endpoint URL, without query string
    pub url: String,
    /// Query parameters, percent-encoded when sent
    pub params: Vec<(String, String)>,
}

impl UpstreamRequest {
    /// Create a GET request
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            params: Vec::new(),
        }
    }

    /// Add a query parameter
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Look up a query parameter by name
    pub fn get_param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// HTTP response from an upstream request
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub text: String,
    /// Response URL (after redirects)
    pub url: String,
}

impl UpstreamResponse {
    /// Build a 200 response, mostly useful for canned upstreams
    pub fn ok(text: impl Into<String>) -> Self {
        Self {
            status: 200,
            text: text.into(),
            url: String::new(),
        }
    }

    /// Parse response as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, UpstreamError> {
        Ok(serde_json::from_str(&self.text)?)
    }

    /// Check if response is successful (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Fail with `UpstreamError::Status` unless the status is 2xx
    pub fn error_for_status(self) -> Result<Self, UpstreamError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(UpstreamError::Status(self.status))
        }
    }
}

/// Capability for performing outbound calls.
///
/// The resolver only ever talks to the upstream through this trait, so tests
/// can substitute canned responses or simulated failures.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, request: UpstreamRequest) -> Result<UpstreamResponse, UpstreamError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_keep_order() {
        let req = UpstreamRequest::get("https://example.org/w/api.php")
            .param("action", "query")
            .param("list", "search");
        assert_eq!(req.params[0].0, "action");
        assert_eq!(req.get_param("list"), Some("search"));
        assert_eq!(req.get_param("missing"), None);
    }

    #[test]
    fn test_error_for_status() {
        assert!(UpstreamResponse::ok("{}").error_for_status().is_ok());

        let resp = UpstreamResponse {
            status: 503,
            text: String::new(),
            url: String::new(),
        };
        assert_eq!(resp.error_for_status().unwrap_err(), UpstreamError::Status(503));
    }
}
