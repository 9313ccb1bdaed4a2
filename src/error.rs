//! Error types for the cache crate
//!
//! Cache operations themselves never fail; errors cover the surrounding
//! setup, such as rejecting an unusable configuration.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the crate.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CacheError {
    /// Configuration value out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

// == Result Type Alias ==
/// Convenience Result type for the crate.
pub type Result<T> = std::result::Result<T, CacheError>;
