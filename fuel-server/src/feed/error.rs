//! Feed fetch error types.

use std::sync::Arc;
use std::time::Duration;

/// Errors from fetching a single retailer feed.
///
/// None of these reach the HTTP caller: the aggregator logs them and counts
/// the feed as contributing no stations.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The feed did not respond within the fetch deadline
    #[error("timed out after {}ms fetching {url}", timeout.as_millis())]
    Timeout { url: String, timeout: Duration },

    /// The feed responded with a non-2xx status
    #[error("failed to fetch {url}: HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    /// The response body was not JSON
    #[error("invalid JSON from {url}: {message}")]
    Parse { url: String, message: String },

    /// Connection or transport failure
    #[error("HTTP error fetching {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The HTTP client could not be constructed
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// A failure shared by concurrent requests for the same feed
    #[error("{0}")]
    Shared(Arc<FetchError>),
}

impl FetchError {
    /// The URL the failed request was for, if there was one.
    pub fn url(&self) -> Option<&str> {
        match self {
            FetchError::Timeout { url, .. }
            | FetchError::HttpStatus { url, .. }
            | FetchError::Parse { url, .. }
            | FetchError::Http { url, .. } => Some(url),
            FetchError::Client(_) => None,
            FetchError::Shared(inner) => inner.url(),
        }
    }

    pub fn is_timeout(&self) -> bool {
        match self {
            FetchError::Timeout { .. } => true,
            FetchError::Shared(inner) => inner.is_timeout(),
            _ => false,
        }
    }
}
