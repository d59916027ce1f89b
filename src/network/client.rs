//! HTTP client for making requests to the upstream API

use super::request::{Fetcher, UpstreamRequest, UpstreamResponse};
use super::user_agent::{accept_json, generate_user_agent};
use super::UpstreamError;
use crate::config::OutgoingSettings;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::debug;

/// HTTP client wrapper with WikiAgent-specific configuration
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    default_timeout: Duration,
    user_agent: String,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self> {
        Self::with_settings(&OutgoingSettings::default())
    }

    /// Create a new HTTP client with custom settings
    pub fn with_settings(settings: &OutgoingSettings) -> Result<Self> {
        let timeout = Duration::try_from_secs_f64(settings.request_timeout)?;
        let user_agent = generate_user_agent(settings.useragent_suffix.as_deref());

        let mut headers = HeaderMap::new();
        for (key, value) in &settings.extra_headers {
            headers.insert(
                HeaderName::from_bytes(key.as_bytes())?,
                HeaderValue::from_str(value)?,
            );
        }

        let mut builder = Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(settings.pool_maxsize)
            .user_agent(user_agent.clone())
            .default_headers(headers)
            .gzip(true)
            .brotli(true);

        // SSL verification
        if !settings.verify_ssl {
            builder = builder.danger_accept_invalid_certs(true);
        }

        // Proxy settings
        if let Some(ref proxy_url) = settings.proxies.all {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        } else {
            if let Some(ref http) = settings.proxies.http {
                builder = builder.proxy(reqwest::Proxy::http(http)?);
            }
            if let Some(ref https) = settings.proxies.https {
                builder = builder.proxy(reqwest::Proxy::https(https)?);
            }
        }

        let client = builder.build()?;

        Ok(Self {
            client,
            default_timeout: timeout,
            user_agent,
        })
    }

    /// Execute an upstream request
    pub async fn execute(&self, request: UpstreamRequest) -> Result<UpstreamResponse, UpstreamError> {
        self.execute_with_timeout(request, self.default_timeout).await
    }

    /// Execute an upstream request with custom timeout
    pub async fn execute_with_timeout(
        &self,
        request: UpstreamRequest,
        timeout: Duration,
    ) -> Result<UpstreamResponse, UpstreamError> {
        debug!("GET {} ({} params)", request.url, request.params.len());

        let response = self
            .client
            .get(&request.url)
            .timeout(timeout)
            .header("Accept", accept_json())
            .query(&request.params)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Parse response into UpstreamResponse
    async fn parse_response(response: Response) -> Result<UpstreamResponse, UpstreamError> {
        let status = response.status().as_u16();
        let url = response.url().to_string();
        let text = response.text().await?;

        Ok(UpstreamResponse { status, text, url })
    }

    /// Get current user agent
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Get the per-request timeout
    pub fn timeout(&self) -> Duration {
        self.default_timeout
    }
}

#[async_trait]
impl Fetcher for HttpClient {
    async fn fetch(&self, request: UpstreamRequest) -> Result<UpstreamResponse, UpstreamError> {
        self.execute(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_client_creation() {
        let client = HttpClient::new();
        assert!(client.is_ok());
        let client = client.unwrap();
        assert_eq!(client.timeout(), Duration::from_secs(5));
        assert!(client.user_agent().starts_with("WikiAgent/"));
    }

    #[test]
    fn test_invalid_extra_header_is_rejected() {
        let mut settings = OutgoingSettings::default();
        settings
            .extra_headers
            .insert("bad header".to_string(), "x".to_string());
        assert!(HttpClient::with_settings(&settings).is_err());
    }
}
