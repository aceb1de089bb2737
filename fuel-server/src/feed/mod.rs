//! Retailer feed fetching.
//!
//! Feeds are untrusted: any of them may be slow, down, or serve something
//! other than JSON. Every fetch is a single attempt with its own deadline,
//! and errors are returned to the caller rather than retried.

mod cache;
mod client;
mod error;
mod mock;

use std::future::Future;
use std::sync::Arc;

use serde_json::Value;

pub use cache::{CacheConfig, CachedFeedClient};
pub use client::{DEFAULT_TIMEOUT, FeedClient, FeedClientConfig};
pub use error::FetchError;
pub use mock::{MockFailure, MockFeedClient};

/// Something that can fetch a feed URL and return its parsed JSON.
///
/// Implemented by the live HTTP client, the caching wrapper and the
/// in-memory mock used in tests.
pub trait FeedFetcher: Send + Sync {
    /// Fetch and parse one feed.
    fn fetch(&self, url: &str) -> impl Future<Output = Result<Arc<Value>, FetchError>> + Send;
}
