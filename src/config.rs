//! Configuration Module
//!
//! Loads cache settings from environment variables.

use std::env;
use std::time::Duration;

use crate::error::{CacheError, Result};

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Size budget of the LRU cache, in the units reported by `Value::size`
    pub capacity: u64,
    /// TTL in seconds used by the demo driver
    pub default_ttl: u64,
    /// Expiry sweep interval in seconds, 0 = no sweep (purely lazy expiry)
    pub sweep_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// Unset or unparsable variables fall back to their defaults.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - LRU size budget (default: 16)
    /// - `DEFAULT_TTL` - TTL in seconds (default: 5)
    /// - `SWEEP_INTERVAL` - Sweep frequency in seconds (default: 0, disabled)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            capacity: parse_var("CACHE_CAPACITY").unwrap_or(defaults.capacity),
            default_ttl: parse_var("DEFAULT_TTL").unwrap_or(defaults.default_ttl),
            sweep_interval: parse_var("SWEEP_INTERVAL").unwrap_or(defaults.sweep_interval),
        }
    }

    // == Validate ==
    /// Rejects settings the caches cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(CacheError::InvalidConfig(
                "CACHE_CAPACITY must be a positive integer".to_string(),
            ));
        }
        Ok(())
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.default_ttl)
    }

    /// Returns the sweep interval, or None when the sweep is disabled.
    pub fn sweep_interval(&self) -> Option<Duration> {
        (self.sweep_interval > 0).then(|| Duration::from_secs(self.sweep_interval))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: 16,
            default_ttl: 5,
            sweep_interval: 0,
        }
    }
}

fn parse_var(name: &str) -> Option<u64> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}
