//! TTL Cache Module
//!
//! Time-bounded engine. Entries carry an absolute expiry and are removed
//! lazily, when a lookup or listing finds them expired.

use std::collections::HashMap;
use std::time::Duration;

use tracing::debug;

use crate::cache::{CacheStats, Clock, ExpiringCache, ExpiringEntry, SystemClock};

// == TTL Cache ==
/// Cache whose entries expire a fixed time after they were written.
///
/// There is no background reclamation: expired entries keep their memory
/// until [`get`](Self::get), [`list`](Self::list) or
/// [`purge_expired`](Self::purge_expired) observes them.
#[derive(Debug)]
pub struct TtlCache<V, C = SystemClock> {
    entries: HashMap<String, ExpiringEntry<V>>,
    clock: C,
    stats: CacheStats,
}

impl<V> TtlCache<V, SystemClock> {
    // == Constructor ==
    /// Creates an empty cache using the system clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl<V> Default for TtlCache<V, SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, C: Clock> TtlCache<V, C> {
    /// Creates an empty cache reading time from `clock`.
    pub fn with_clock(clock: C) -> Self {
        Self {
            entries: HashMap::new(),
            clock,
            stats: CacheStats::new(),
        }
    }

    // == Put ==
    /// Stores a value that expires `ttl` from now.
    ///
    /// A zero `ttl` stores the value without expiration. Any existing entry
    /// for `key` is replaced outright, including its expiry.
    pub fn put(&mut self, key: &str, value: V, ttl: Duration) {
        let entry = ExpiringEntry::new(value, ttl, self.clock.now());
        self.entries.insert(key.to_string(), entry);
    }

    // == Get ==
    /// Retrieves a live value.
    ///
    /// An expired entry is removed by this call and reported as absent. The
    /// read never changes an entry's expiry.
    pub fn get(&mut self, key: &str) -> Option<&V> {
        let now = self.clock.now();

        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired(now),
            None => {
                self.stats.record_miss();
                return None;
            }
        };

        if expired {
            self.entries.remove(key);
            self.stats.record_expirations(1);
            self.stats.record_miss();
            debug!(key = %key, "removed expired entry on lookup");
            return None;
        }

        self.stats.record_hit();
        self.entries.get(key).map(|entry| &entry.value)
    }

    // == List ==
    /// Returns a snapshot of every live key-value pair, in no particular order.
    ///
    /// Expired entries encountered by the scan are removed.
    pub fn list(&mut self) -> Vec<(String, V)>
    where
        V: Clone,
    {
        self.purge_expired();
        self.entries
            .iter()
            .map(|(key, entry)| (key.clone(), entry.value.clone()))
            .collect()
    }

    // == Purge Expired ==
    /// Removes every expired entry and returns how many were removed.
    pub fn purge_expired(&mut self) -> usize {
        let now = self.clock.now();
        let before = self.entries.len();

        self.entries.retain(|key, entry| {
            let expired = entry.is_expired(now);
            if expired {
                debug!(key = %key, "removed expired entry");
            }
            !expired
        });

        let removed = before - self.entries.len();
        self.stats.record_expirations(removed);
        removed
    }

    // == Length ==
    /// Returns the number of physically held entries, including expired
    /// entries that have not been observed yet.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }
}

impl<V, C: Clock> ExpiringCache<V> for TtlCache<V, C> {
    fn get(&mut self, key: &str) -> Option<&V> {
        TtlCache::get(self, key)
    }

    fn put(&mut self, key: &str, value: V, ttl: Duration) {
        TtlCache::put(self, key, value, ttl)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;

    fn manual_cache() -> (TtlCache<i64, ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        (TtlCache::with_clock(clock.clone()), clock)
    }

    fn keys(cache: &mut TtlCache<i64, ManualClock>) -> Vec<String> {
        let mut keys: Vec<String> = cache.list().into_iter().map(|(k, _)| k).collect();
        keys.sort();
        keys
    }

    #[test]
    fn test_put_and_get() {
        let (mut cache, _clock) = manual_cache();

        cache.put("k1", 111, Duration::from_secs(5));

        assert_eq!(cache.get("k1"), Some(&111));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_get_nonexistent() {
        let (mut cache, _clock) = manual_cache();
        assert_eq!(cache.get("missing"), None);
    }

    #[test]
    fn test_entry_expires_after_ttl() {
        let (mut cache, clock) = manual_cache();

        cache.put("k1", 111, Duration::from_secs(5));
        clock.advance(Duration::from_secs(4));
        assert_eq!(cache.get("k1"), Some(&111));

        clock.advance(Duration::from_secs(2));
        assert_eq!(cache.get("k1"), None);
        assert!(cache.is_empty(), "expired entry should be removed by get");
    }

    #[test]
    fn test_expired_at_exact_boundary() {
        let (mut cache, clock) = manual_cache();

        cache.put("k1", 1, Duration::from_secs(5));
        clock.advance(Duration::from_secs(5));

        assert_eq!(cache.get("k1"), None);
    }

    #[test]
    fn test_zero_ttl_never_expires() {
        let (mut cache, clock) = manual_cache();

        cache.put("forever", 1, Duration::ZERO);
        clock.advance(Duration::from_secs(365 * 24 * 3600));

        assert_eq!(cache.get("forever"), Some(&1));
    }

    #[test]
    fn test_put_overwrites_expiry() {
        let (mut cache, clock) = manual_cache();

        cache.put("k", 1, Duration::from_secs(10));
        cache.put("k", 2, Duration::from_secs(2));
        clock.advance(Duration::from_secs(3));

        assert_eq!(cache.get("k"), None, "only the latest TTL applies");
    }

    #[test]
    fn test_put_without_ttl_clears_expiry() {
        let (mut cache, clock) = manual_cache();

        cache.put("k", 1, Duration::from_secs(1));
        cache.put("k", 2, Duration::ZERO);
        clock.advance(Duration::from_secs(60));

        assert_eq!(cache.get("k"), Some(&2));
    }

    #[test]
    fn test_get_does_not_extend_expiry() {
        let (mut cache, clock) = manual_cache();

        cache.put("k", 1, Duration::from_secs(5));
        clock.advance(Duration::from_secs(3));
        assert!(cache.get("k").is_some());
        clock.advance(Duration::from_secs(3));

        assert_eq!(cache.get("k"), None);
    }

    #[test]
    fn test_expired_entry_stays_until_observed() {
        let (mut cache, clock) = manual_cache();

        cache.put("k", 1, Duration::from_secs(1));
        clock.advance(Duration::from_secs(2));

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.stats().expirations, 0);
    }

    #[test]
    fn test_list_skips_and_removes_expired() {
        let (mut cache, clock) = manual_cache();

        cache.put("k1", 111, Duration::from_secs(5));
        cache.put("k2", 222, Duration::from_secs(10));
        cache.put("k3", 333, Duration::ZERO);
        clock.advance(Duration::from_secs(6));

        assert_eq!(keys(&mut cache), vec!["k2", "k3"]);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.stats().expirations, 1);
    }

    #[test]
    fn test_purge_expired() {
        let (mut cache, clock) = manual_cache();

        cache.put("short", 1, Duration::from_secs(1));
        cache.put("long", 2, Duration::from_secs(10));
        clock.advance(Duration::from_secs(2));

        assert_eq!(cache.purge_expired(), 1);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.purge_expired(), 0);
    }

    #[test]
    fn test_stats() {
        let (mut cache, clock) = manual_cache();

        cache.put("k", 1, Duration::from_secs(1));
        cache.get("k");
        clock.advance(Duration::from_secs(1));
        cache.get("k");
        cache.get("missing");

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 2);
        assert_eq!(stats.expirations, 1);
        assert_eq!(stats.total_entries, 0);
    }

    #[test]
    fn test_system_clock_cache() {
        let mut cache = TtlCache::new();

        cache.put("k", "v".to_string(), Duration::from_millis(50));
        assert_eq!(cache.get("k").map(String::as_str), Some("v"));

        std::thread::sleep(Duration::from_millis(80));
        assert_eq!(cache.get("k"), None);
    }

    #[test]
    fn test_usable_through_expiring_trait() {
        fn fill(cache: &mut dyn ExpiringCache<i64>) {
            cache.put("a", 1, Duration::from_secs(1));
            cache.put("b", 2, Duration::ZERO);
        }

        let (mut cache, clock) = manual_cache();
        fill(&mut cache);
        clock.advance(Duration::from_secs(2));

        assert_eq!(keys(&mut cache), vec!["b"]);
    }
}
