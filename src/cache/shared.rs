//! Shared Cache Module
//!
//! Thread-safe handle around either engine: one lock per cache instance,
//! held for the whole of each operation.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use crate::cache::{CacheStats, Clock, SizedLruCache, SystemClock, TtlCache, Value};

/// Shared handle to a [`SizedLruCache`].
pub type SharedLruCache<V> = Shared<SizedLruCache<V>>;

/// Shared handle to a [`TtlCache`].
pub type SharedTtlCache<V, C = SystemClock> = Shared<TtlCache<V, C>>;

// == Shared ==
/// Cloneable, lock-protected handle to a cache.
///
/// Clones refer to the same cache. Lookups return owned copies because a
/// borrow cannot outlive the lock guard.
#[derive(Debug)]
pub struct Shared<C> {
    inner: Arc<Mutex<C>>,
}

impl<C> Clone for Shared<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C> Shared<C> {
    pub fn new(cache: C) -> Self {
        Self {
            inner: Arc::new(Mutex::new(cache)),
        }
    }

    // == With ==
    /// Runs `f` with exclusive access to the cache.
    ///
    /// Use this for compound operations that must not interleave with
    /// other callers.
    pub fn with<R>(&self, f: impl FnOnce(&mut C) -> R) -> R {
        let mut guard = self.inner.lock();
        f(&mut guard)
    }
}

impl<V: Value + Clone> Shared<SizedLruCache<V>> {
    pub fn get(&self, key: &str) -> Option<V> {
        self.inner.lock().get(key).cloned()
    }

    pub fn put(&self, key: &str, value: V) {
        self.inner.lock().put(key, value);
    }

    pub fn list(&self) -> Vec<(String, V)> {
        self.inner.lock().list()
    }

    pub fn used(&self) -> u64 {
        self.inner.lock().used()
    }

    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats()
    }
}

impl<V: Clone, K: Clock> Shared<TtlCache<V, K>> {
    pub fn get(&self, key: &str) -> Option<V> {
        self.inner.lock().get(key).cloned()
    }

    pub fn put(&self, key: &str, value: V, ttl: Duration) {
        self.inner.lock().put(key, value, ttl);
    }

    pub fn list(&self) -> Vec<(String, V)> {
        self.inner.lock().list()
    }

    pub fn purge_expired(&self) -> usize {
        self.inner.lock().purge_expired()
    }

    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats()
    }
}
