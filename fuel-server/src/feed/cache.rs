//! Freshness window for feed responses.
//!
//! Retailers refresh their files a few times an hour at most, so successful
//! payloads are reused for a short TTL, keyed by URL. Concurrent misses for
//! the same URL share one upstream fetch. Failed fetches are not cached and
//! are retried on the next request.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use serde_json::Value;
use tracing::trace;

use super::FeedFetcher;
use super::error::FetchError;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl CacheConfig {
    /// Set the TTL.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Set the maximum number of cached payloads.
    pub fn with_max_capacity(mut self, max_capacity: u64) -> Self {
        self.max_capacity = max_capacity;
        self
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60),
            max_capacity: 64,
        }
    }
}

/// Feed fetcher with a per-URL freshness window.
///
/// Wraps any [`FeedFetcher`]; the aggregator sees no difference other than
/// latency.
pub struct CachedFeedClient<F> {
    inner: F,
    payloads: MokaCache<String, Arc<Value>>,
}

impl<F: FeedFetcher> CachedFeedClient<F> {
    /// Create a new cached client.
    pub fn new(inner: F, config: &CacheConfig) -> Self {
        let payloads = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { inner, payloads }
    }

    /// Access the wrapped fetcher.
    pub fn inner(&self) -> &F {
        &self.inner
    }

    /// Get cache statistics.
    pub fn entry_count(&self) -> u64 {
        self.payloads.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.payloads.invalidate_all();
    }
}

impl<F: FeedFetcher> FeedFetcher for CachedFeedClient<F> {
    async fn fetch(&self, url: &str) -> Result<Arc<Value>, FetchError> {
        let load = async {
            trace!(url, "feed cache miss");
            self.inner.fetch(url).await
        };

        self.payloads
            .try_get_with(url.to_string(), load)
            .await
            .map_err(|e| Arc::try_unwrap(e).unwrap_or_else(FetchError::Shared))
    }
}
