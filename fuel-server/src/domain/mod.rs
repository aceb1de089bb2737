//! Domain types for the fuel price aggregator.
//!
//! Stations are built fresh from live feed data on every request and are
//! never persisted.

mod station;

pub use station::{Location, Station};
