//! CacheFlow - In-process caching engines
//!
//! Provides a size-bounded LRU cache and a lazily expiring TTL cache behind a
//! common key-value contract.

pub mod cache;
pub mod config;
pub mod error;
pub mod tasks;

pub use cache::{
    Cache, CacheStats, Clock, ExpiringCache, ManualClock, Shared, SharedLruCache,
    SharedTtlCache, SizedLruCache, SystemClock, TtlCache, Value,
};
pub use config::Config;
pub use error::{CacheError, Result};
pub use tasks::spawn_sweep_task;
