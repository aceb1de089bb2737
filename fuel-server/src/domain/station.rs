//! Canonical station record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Coordinates as published by the retailer.
///
/// Feeds disagree on whether coordinates are numbers or strings, so both are
/// kept as text. A coordinate the feed omitted is the literal `"undefined"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: String,
    pub longitude: String,
}

/// A fuel retail site, normalized from one retailer feed.
///
/// `site_id` is unique within a retailer's feed only; two retailers may use
/// the same identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub site_id: String,

    /// Brand shown on the forecourt, or the retailer name if the feed has none.
    pub brand: String,

    pub address: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postcode: Option<String>,

    pub location: Location,

    /// Price per fuel grade (e.g. `E10`, `B7`), in the feed's units.
    #[serde(default)]
    pub prices: BTreeMap<String, f64>,
}

impl Station {
    /// Whether the address contains `needle`, which must already be lowercase.
    pub fn address_contains(&self, needle: &str) -> bool {
        self.address.to_lowercase().contains(needle)
    }
}
