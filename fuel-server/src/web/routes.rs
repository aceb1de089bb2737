//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};

use crate::aggregate::aggregate_all;
use crate::feed::FeedFetcher;
use crate::filter::filter_by_address;

use super::dto::*;
use super::state::AppState;

/// Message returned when the search parameter is missing or blank.
pub const MISSING_QUERY_MESSAGE: &str =
    "Please provide a city or town name in the `q` query parameter.";

/// Create the application router.
pub fn create_router<F: FeedFetcher + 'static>(state: AppState<F>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/fuel", get(search_fuel::<F>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Search every retailer feed for stations whose address matches `q`.
///
/// Feeds are fetched fresh (subject to the fetcher's cache) on each request.
/// Feed failures are logged and never surface here. A repeated `q` uses its
/// first value.
async fn search_fuel<F: FeedFetcher + 'static>(
    State(state): State<AppState<F>>,
    params: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<FuelSearchResponse>, AppError> {
    let Query(pairs) = params.map_err(|rejection| AppError::BadRequest {
        message: rejection.body_text(),
    })?;
    let req = FuelSearchRequest::from_pairs(pairs);
    let query = req.query().ok_or_else(|| AppError::BadRequest {
        message: MISSING_QUERY_MESSAGE.to_string(),
    })?;

    let stations = aggregate_all(state.fetcher.as_ref(), &state.sources).await;
    let total = stations.len();
    let stations = filter_by_address(stations, query);
    debug!(query, total, matched = stations.len(), "fuel search");

    Ok(Json(FuelSearchResponse { stations }))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
        };

        warn!(%status, %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
