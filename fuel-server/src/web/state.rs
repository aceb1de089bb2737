//! Application state for the web layer.

use std::sync::Arc;

use crate::feed::FeedFetcher;
use crate::sources::Source;

/// Shared application state.
///
/// Generic over the fetcher so the router can run against the live client,
/// the cached client, or a mock.
pub struct AppState<F> {
    /// Feed fetcher used for every aggregation
    pub fetcher: Arc<F>,

    /// Registered feeds, in output order
    pub sources: Arc<[Source]>,
}

impl<F: FeedFetcher> AppState<F> {
    /// Create a new app state.
    pub fn new(fetcher: F, sources: &[Source]) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            sources: Arc::from(sources),
        }
    }
}

impl<F> Clone for AppState<F> {
    fn clone(&self) -> Self {
        Self {
            fetcher: Arc::clone(&self.fetcher),
            sources: Arc::clone(&self.sources),
        }
    }
}
