//! Cache Entry Module
//!
//! Defines the per-entry records held by each engine.

use std::time::{Duration, Instant};

use crate::cache::Value;

// == Sized Entry ==
/// Entry owned by [`SizedLruCache`](crate::cache::SizedLruCache).
#[derive(Debug, Clone)]
pub struct SizedEntry<V> {
    /// Key, kept so eviction from the recency list can clear the index
    pub key: String,
    /// The stored value
    pub value: V,
    /// Size reported by the value when it was stored
    pub size: u64,
}

impl<V: Value> SizedEntry<V> {
    // == Constructor ==
    /// Creates an entry, measuring the value once.
    pub fn new(key: String, value: V) -> Self {
        let size = value.size();
        Self { key, value, size }
    }

    // == Replace ==
    /// Swaps in a new value and returns the previous size.
    pub fn replace(&mut self, value: V) -> u64 {
        let old_size = self.size;
        self.size = value.size();
        self.value = value;
        old_size
    }
}

// == Expiring Entry ==
/// Entry owned by [`TtlCache`](crate::cache::TtlCache).
#[derive(Debug, Clone)]
pub struct ExpiringEntry<V> {
    /// The stored value
    pub value: V,
    /// Absolute expiry, None = never expires
    pub expires_at: Option<Instant>,
}

impl<V> ExpiringEntry<V> {
    // == Constructor ==
    /// Creates an entry that expires `ttl` after `now`.
    ///
    /// A zero TTL, or one that overflows the instant range, means the entry
    /// never expires.
    pub fn new(value: V, ttl: Duration, now: Instant) -> Self {
        let expires_at = if ttl.is_zero() {
            None
        } else {
            now.checked_add(ttl)
        };

        Self { value, expires_at }
    }

    // == Is Expired ==
    /// Checks whether the entry has expired as of `now`.
    ///
    /// Boundary condition: the entry is expired once `now` reaches the expiry
    /// instant, so it is present only while `now < expires_at`.
    pub fn is_expired(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(expires) => now >= expires,
            None => false,
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sized_entry_measures_value() {
        let entry = SizedEntry::new("key".to_string(), "value".to_string());

        assert_eq!(entry.key, "key");
        assert_eq!(entry.value, "value");
        assert_eq!(entry.size, 5);
    }

    #[test]
    fn test_sized_entry_replace() {
        let mut entry = SizedEntry::new("key".to_string(), vec![0u8; 10]);

        let old = entry.replace(vec![0u8; 3]);

        assert_eq!(old, 10);
        assert_eq!(entry.size, 3);
        assert_eq!(entry.value.len(), 3);
    }

    #[test]
    fn test_entry_creation_no_ttl() {
        let now = Instant::now();
        let entry = ExpiringEntry::new("test_value", Duration::ZERO, now);

        assert!(entry.expires_at.is_none());
        assert!(!entry.is_expired(now + Duration::from_secs(1_000_000)));
    }

    #[test]
    fn test_entry_creation_with_ttl() {
        let now = Instant::now();
        let entry = ExpiringEntry::new("test_value", Duration::from_secs(60), now);

        assert_eq!(entry.expires_at, Some(now + Duration::from_secs(60)));
        assert!(!entry.is_expired(now));
        assert!(!entry.is_expired(now + Duration::from_secs(59)));
        assert!(entry.is_expired(now + Duration::from_secs(61)));
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let now = Instant::now();
        let entry = ExpiringEntry::new("test", Duration::from_secs(5), now);

        let expiry = now + Duration::from_secs(5);
        assert!(!entry.is_expired(expiry - Duration::from_nanos(1)));
        assert!(entry.is_expired(expiry), "Entry should be expired at boundary");
    }

    #[test]
    fn test_overflowing_ttl_never_expires() {
        let now = Instant::now();
        let entry = ExpiringEntry::new("test", Duration::MAX, now);

        assert!(entry.expires_at.is_none());
        assert!(!entry.is_expired(now + Duration::from_secs(3600)));
    }
}
