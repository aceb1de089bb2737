//! Concurrent aggregation across every registered feed.
//!
//! Each source is fetched and normalized in its own future. Futures are
//! joined with `join_all`, so every source settles before the result is
//! built and total latency tracks the slowest feed. A failing source is
//! logged and contributes no stations; it never affects the others.

use futures::future::join_all;
use tracing::{info, warn};

use crate::domain::Station;
use crate::feed::FeedFetcher;
use crate::normalize::normalize;
use crate::sources::Source;

/// What one source contributed to an aggregation.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceOutcome {
    /// The feed was fetched; it may still have contained no usable stations.
    Fetched(Vec<Station>),
    /// The fetch failed; the error has already been logged.
    Failed,
}

impl SourceOutcome {
    fn into_stations(self) -> Vec<Station> {
        match self {
            SourceOutcome::Fetched(stations) => stations,
            SourceOutcome::Failed => Vec::new(),
        }
    }
}

/// Fetch and normalize one source, containing any failure.
pub async fn fetch_source<F: FeedFetcher>(fetcher: &F, source: &Source) -> SourceOutcome {
    match fetcher.fetch(&source.url).await {
        Ok(payload) => SourceOutcome::Fetched(normalize(&payload, &source.name)),
        Err(e) => {
            warn!(
                source = %source.name,
                url = %source.url,
                error = %e,
                "failed to fetch feed, skipping"
            );
            SourceOutcome::Failed
        }
    }
}

/// Fetch every source concurrently and concatenate their stations.
///
/// Stations appear in registry order, then in each feed's own order.
pub async fn aggregate_all<F: FeedFetcher>(fetcher: &F, sources: &[Source]) -> Vec<Station> {
    let outcomes = join_all(sources.iter().map(|source| fetch_source(fetcher, source))).await;

    let failed = outcomes
        .iter()
        .filter(|o| matches!(o, SourceOutcome::Failed))
        .count();

    let stations: Vec<Station> = outcomes
        .into_iter()
        .flat_map(SourceOutcome::into_stations)
        .collect();

    info!(
        sources = sources.len(),
        failed,
        stations = stations.len(),
        "aggregated fuel feeds"
    );

    stations
}
