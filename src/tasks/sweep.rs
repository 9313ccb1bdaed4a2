//! Expiry Sweep Task
//!
//! Background task that periodically removes expired TTL cache entries, so
//! memory held by entries nobody reads is reclaimed.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::{Clock, SharedTtlCache};

/// Spawns a task that calls [`purge_expired`](crate::cache::TtlCache::purge_expired)
/// every `interval`.
///
/// The lock is held only for the purge itself. The task runs until the
/// returned handle is aborted.
///
/// # Example
/// ```ignore
/// let cache = SharedTtlCache::new(TtlCache::new());
/// let sweep = spawn_sweep_task(cache.clone(), Duration::from_secs(1));
/// // Later, during shutdown:
/// sweep.abort();
/// ```
pub fn spawn_sweep_task<V, C>(cache: SharedTtlCache<V, C>, interval: Duration) -> JoinHandle<()>
where
    V: Clone + Send + 'static,
    C: Clock + 'static,
{
    tokio::spawn(async move {
        info!(interval_ms = interval.as_millis() as u64, "starting expiry sweep task");

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.purge_expired();

            if removed > 0 {
                info!("expiry sweep: removed {} expired entries", removed);
            } else {
                debug!("expiry sweep: no expired entries found");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{ManualClock, Shared, TtlCache};

    #[tokio::test]
    async fn test_sweep_removes_unobserved_expired_entries() {
        let clock = ManualClock::new();
        let cache = Shared::new(TtlCache::with_clock(clock.clone()));

        cache.put("expire_soon", 1i64, Duration::from_secs(1));
        cache.put("long_lived", 2i64, Duration::from_secs(3600));
        clock.advance(Duration::from_secs(2));

        let handle = spawn_sweep_task(cache.clone(), Duration::from_millis(20));
        tokio::time::sleep(Duration::from_millis(200)).await;
        handle.abort();

        // Physically gone without any lookup touching it
        assert_eq!(cache.with(|ttl| ttl.len()), 1);
        assert_eq!(cache.stats().expirations, 1);
        assert_eq!(cache.get("long_lived"), Some(2));
    }

    #[tokio::test]
    async fn test_sweep_preserves_live_entries() {
        let cache = Shared::new(TtlCache::new());

        cache.put("forever", "value".to_string(), Duration::ZERO);
        cache.put("long_lived", "value".to_string(), Duration::from_secs(3600));

        let handle = spawn_sweep_task(cache.clone(), Duration::from_millis(20));
        tokio::time::sleep(Duration::from_millis(100)).await;
        handle.abort();

        assert_eq!(cache.with(|ttl| ttl.len()), 2);
        assert_eq!(cache.stats().expirations, 0);
    }

    #[tokio::test]
    async fn test_sweep_task_can_be_aborted() {
        let cache: SharedTtlCache<i64> = Shared::new(TtlCache::new());

        let handle = spawn_sweep_task(cache, Duration::from_secs(1));
        handle.abort();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}
