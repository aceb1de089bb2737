//! HTTP client for retailer JSON feeds.
//!
//! Every fetch is a single GET with a hard deadline. The deadline wraps the
//! whole exchange (connect, headers and body), and expiry drops the request
//! future, which aborts the connection.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::Value;
use tracing::debug;

use super::FeedFetcher;
use super::error::FetchError;

/// Default per-feed deadline.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(8000);

/// Default User-Agent sent to retailers.
const DEFAULT_USER_AGENT: &str = concat!("fuel-server/", env!("CARGO_PKG_VERSION"));

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Configuration for the feed client.
#[derive(Debug, Clone)]
pub struct FeedClientConfig {
    /// Deadline for one fetch, from send to fully read body.
    pub timeout: Duration,
    /// User-Agent header value
    pub user_agent: String,
}

impl FeedClientConfig {
    /// Create a config with the default 8 second deadline.
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Set the fetch deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

impl Default for FeedClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for retailer fuel-price feeds.
#[derive(Debug, Clone)]
pub struct FeedClient {
    http: reqwest::Client,
    timeout: Duration,
}

impl FeedClient {
    /// Create a new feed client.
    pub fn new(config: FeedClientConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            HeaderValue::from_static("application/json"),
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(config.user_agent)
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self {
            http,
            timeout: config.timeout,
        })
    }

    /// The per-fetch deadline.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetch `url` and parse the body as JSON, giving up after the deadline.
    pub async fn fetch_json(&self, url: &str) -> Result<Value, FetchError> {
        match tokio::time::timeout(self.timeout, self.get_json(url)).await {
            Ok(result) => result,
            Err(_elapsed) => Err(FetchError::Timeout {
                url: url.to_string(),
                timeout: self.timeout,
            }),
        }
    }

    async fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|source| FetchError::Http {
            url: url.to_string(),
            source,
        })?;
        debug!(url, bytes = body.len(), "fetched feed");

        parse_body(url, &body)
    }
}

impl FeedFetcher for FeedClient {
    async fn fetch(&self, url: &str) -> Result<Arc<Value>, FetchError> {
        self.fetch_json(url).await.map(Arc::new)
    }
}

/// Parse a feed body as JSON. Some retailers prefix their files with a BOM.
fn parse_body(url: &str, body: &[u8]) -> Result<Value, FetchError> {
    let body = body.strip_prefix(UTF8_BOM).unwrap_or(body);
    serde_json::from_slice(body).map_err(|e| FetchError::Parse {
        url: url.to_string(),
        message: e.to_string(),
    })
}
