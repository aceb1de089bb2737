//! In-memory feed fetcher for testing without network access.
//!
//! Serves canned payloads or failures by URL and counts how many fetches
//! were made.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use serde_json::Value;

use super::FeedFetcher;
use super::error::FetchError;

/// A failure the mock reproduces for a URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockFailure {
    /// Behave as if the fetch deadline expired.
    Timeout,
    /// Respond with this non-2xx status.
    Status(u16),
    /// Respond with a body that is not JSON.
    Parse,
}

#[derive(Debug, Clone)]
enum MockResponse {
    Payload(Arc<Value>),
    Failure(MockFailure),
}

/// Mock feed fetcher.
///
/// URLs without a registered response fail with HTTP 404.
#[derive(Debug, Clone, Default)]
pub struct MockFeedClient {
    responses: HashMap<String, (MockResponse, Option<Duration>)>,
    fetches: Arc<AtomicUsize>,
}

impl MockFeedClient {
    /// Create a mock with no registered feeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `payload` for `url`.
    pub fn with_payload(mut self, url: impl Into<String>, payload: Value) -> Self {
        self.responses
            .insert(url.into(), (MockResponse::Payload(Arc::new(payload)), None));
        self
    }

    /// Serve `payload` for `url` after sleeping for `delay`.
    pub fn with_delayed_payload(
        mut self,
        url: impl Into<String>,
        payload: Value,
        delay: Duration,
    ) -> Self {
        self.responses.insert(
            url.into(),
            (MockResponse::Payload(Arc::new(payload)), Some(delay)),
        );
        self
    }

    /// Fail every fetch of `url`.
    pub fn with_failure(mut self, url: impl Into<String>, failure: MockFailure) -> Self {
        self.responses
            .insert(url.into(), (MockResponse::Failure(failure), None));
        self
    }

    /// Number of fetches made so far, across all clones.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl FeedFetcher for MockFeedClient {
    async fn fetch(&self, url: &str) -> Result<Arc<Value>, FetchError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);

        let Some((response, delay)) = self.responses.get(url) else {
            return Err(FetchError::HttpStatus {
                url: url.to_string(),
                status: 404,
            });
        };

        if let Some(delay) = delay {
            tokio::time::sleep(*delay).await;
        }

        match response {
            MockResponse::Payload(payload) => Ok(payload.clone()),
            MockResponse::Failure(MockFailure::Timeout) => Err(FetchError::Timeout {
                url: url.to_string(),
                timeout: super::client::DEFAULT_TIMEOUT,
            }),
            MockResponse::Failure(MockFailure::Status(status)) => Err(FetchError::HttpStatus {
                url: url.to_string(),
                status: *status,
            }),
            MockResponse::Failure(MockFailure::Parse) => Err(FetchError::Parse {
                url: url.to_string(),
                message: "expected value at line 1 column 1".to_string(),
            }),
        }
    }
}
