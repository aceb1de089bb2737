//! Web layer for the fuel price server.
//!
//! A thin HTTP boundary: validates the search parameter, runs the
//! aggregation, filters and serializes the result.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, MISSING_QUERY_MESSAGE, create_router};
pub use state::AppState;
