//! Configuration Module
//!
//! Handles loading configuration from environment variables.

use std::env;

/// Runtime configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Redis connection URL; `None` selects the in-process store
    pub redis_url: Option<String>,
    /// TTL in seconds for cached page bodies
    pub url_cache_ttl: u64,
    /// Background expiry sweep interval in seconds (in-process store only)
    pub cleanup_interval: u64,
    /// Whether the demo clears the keyspace on start
    pub flush_on_start: bool,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `REDIS_URL` - Redis URL, e.g. `redis://127.0.0.1/` (default: unset)
    /// - `URL_CACHE_TTL` - Page cache TTL in seconds (default: 10)
    /// - `CLEANUP_INTERVAL` - Sweep frequency in seconds (default: 1)
    /// - `FLUSH_ON_START` - Clear the keyspace on start (default: true)
    pub fn from_env() -> Self {
        Self {
            redis_url: env::var("REDIS_URL").ok().filter(|v| !v.is_empty()),
            url_cache_ttl: env::var("URL_CACHE_TTL")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .filter(|ttl| *ttl > 0)
                .unwrap_or(10),
            cleanup_interval: env::var("CLEANUP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1),
            flush_on_start: env::var("FLUSH_ON_START")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            redis_url: None,
            url_cache_ttl: 10,
            cleanup_interval: 1,
            flush_on_start: true,
        }
    }
}
