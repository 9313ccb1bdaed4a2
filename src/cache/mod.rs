//! Cache Module
//!
//! Two eviction engines behind a common key-value contract: a size-bounded
//! LRU cache and a lazily expiring TTL cache.

mod clock;
mod contract;
mod entry;
mod lru;
mod shared;
mod sized;
mod stats;
mod ttl;


// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use contract::{Cache, ExpiringCache, Value};
pub(crate) use entry::{ExpiringEntry, SizedEntry};
pub(crate) use lru::{LruList, NodeId};
pub use shared::{Shared, SharedLruCache, SharedTtlCache};
pub use sized::SizedLruCache;
pub use stats::CacheStats;
pub use ttl::TtlCache;
