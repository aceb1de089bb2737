//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::Station;

/// Query string for the fuel search.
#[derive(Debug, Default, Deserialize)]
pub struct FuelSearchRequest {
    /// Town, street or postcode fragment to match against addresses
    pub q: Option<String>,
}

impl FuelSearchRequest {
    /// Build from decoded query pairs. A repeated `q` keeps its first value.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let q = pairs
            .into_iter()
            .find_map(|(key, value)| (key == "q").then_some(value));
        Self { q }
    }

    /// The query, if present and not blank.
    pub fn query(&self) -> Option<&str> {
        self.q.as_deref().filter(|q| !q.trim().is_empty())
    }
}

/// Response for the fuel search.
#[derive(Debug, Serialize, Deserialize)]
pub struct FuelSearchResponse {
    /// Matching stations, in registry then feed order
    pub stations: Vec<Station>,
}

/// Error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
