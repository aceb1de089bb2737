//! Fuel price aggregation server.
//!
//! Fetches the open fuel-price feeds published by UK retailers, normalizes
//! them into one station shape, and answers "which stations are on this
//! street or in this town?"

pub mod aggregate;
pub mod config;
pub mod domain;
pub mod feed;
pub mod filter;
pub mod normalize;
pub mod sources;
pub mod web;
