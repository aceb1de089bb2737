//! Server configuration from environment variables.

use std::net::SocketAddr;
use std::time::Duration;

use crate::feed::{CacheConfig, DEFAULT_TIMEOUT, FeedClientConfig};

/// Default feed freshness window in seconds.
const DEFAULT_CACHE_TTL_SECS: u64 = 60;

pub const BIND_ADDR_VAR: &str = "FUEL_BIND_ADDR";
pub const FETCH_TIMEOUT_VAR: &str = "FUEL_FETCH_TIMEOUT_MS";
pub const CACHE_TTL_VAR: &str = "FUEL_CACHE_TTL_SECS";

/// Error for an environment variable that is set but unusable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {var}={value:?}: {reason}")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
    pub reason: String,
}

/// Settings for the fuel price server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Address to listen on.
    pub bind_addr: SocketAddr,

    /// Deadline for each feed fetch.
    pub fetch_timeout: Duration,

    /// Freshness window for feed payloads. Zero disables caching.
    pub cache_ttl: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            fetch_timeout: DEFAULT_TIMEOUT,
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment.
    ///
    /// Unset variables take their defaults; set but invalid ones are errors.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration using `lookup` to resolve variables.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup(BIND_ADDR_VAR) {
            config.bind_addr = value.trim().parse().map_err(|e: std::net::AddrParseError| {
                ConfigError {
                    var: BIND_ADDR_VAR,
                    value: value.clone(),
                    reason: e.to_string(),
                }
            })?;
        }

        if let Some(value) = lookup(FETCH_TIMEOUT_VAR) {
            let millis = parse_u64(FETCH_TIMEOUT_VAR, &value)?;
            if millis == 0 {
                return Err(ConfigError {
                    var: FETCH_TIMEOUT_VAR,
                    value,
                    reason: "timeout must be greater than zero".to_string(),
                });
            }
            config.fetch_timeout = Duration::from_millis(millis);
        }

        if let Some(value) = lookup(CACHE_TTL_VAR) {
            config.cache_ttl = Duration::from_secs(parse_u64(CACHE_TTL_VAR, &value)?);
        }

        Ok(config)
    }

    /// Feed client settings derived from this config.
    pub fn feed_client(&self) -> FeedClientConfig {
        FeedClientConfig::new().with_timeout(self.fetch_timeout)
    }

    /// Cache settings, or `None` when caching is disabled.
    pub fn cache(&self) -> Option<CacheConfig> {
        (!self.cache_ttl.is_zero()).then(|| CacheConfig::default().with_ttl(self.cache_ttl))
    }
}

fn parse_u64(var: &'static str, value: &str) -> Result<u64, ConfigError> {
    value.trim().parse().map_err(|e: std::num::ParseIntError| ConfigError {
        var,
        value: value.to_string(),
        reason: e.to_string(),
    })
}
