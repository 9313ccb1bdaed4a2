//! Background Tasks Module
//!
//! Optional background work for the caches.
//!
//! # Tasks
//! - Expiry sweep: Removes expired TTL cache entries at a fixed interval

mod sweep;

pub use sweep::spawn_sweep_task;
