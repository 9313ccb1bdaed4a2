//! Sized LRU Cache Module
//!
//! Capacity-bounded engine: every entry is charged its self-reported size and
//! the least recently used entries are evicted whenever the total exceeds the
//! budget.

use std::collections::HashMap;

use tracing::debug;

use crate::cache::{Cache, CacheStats, LruList, NodeId, SizedEntry, Value};

// == Sized LRU Cache ==
/// Cache bounded by the total size of its values.
///
/// Lookup, insert, update and eviction are all O(1): the index maps each key
/// to its node in the recency list.
#[derive(Debug)]
pub struct SizedLruCache<V> {
    /// Key to recency-list node
    index: HashMap<String, NodeId>,
    /// Entries ordered oldest to newest
    order: LruList<SizedEntry<V>>,
    /// Maximum total size held once an eviction pass completes
    capacity: u64,
    /// Sum of the sizes of all held entries; wider than a single size so
    /// the total may briefly exceed `u64::MAX` before eviction
    used: u128,
    stats: CacheStats,
}

impl<V: Value> SizedLruCache<V> {
    // == Constructor ==
    /// Creates an empty cache with the given size budget.
    pub fn new(capacity: u64) -> Self {
        Self {
            index: HashMap::new(),
            order: LruList::new(),
            capacity,
            used: 0,
            stats: CacheStats::new(),
        }
    }

    // == Put ==
    /// Stores a value and marks the key as most recently used.
    ///
    /// An existing key has its value and size replaced in place. Afterwards
    /// the oldest entries are evicted until the total fits the capacity; a
    /// value larger than the whole capacity is accepted and then evicted by
    /// that same pass.
    pub fn put(&mut self, key: &str, value: V) {
        match self.index.get(key) {
            Some(&id) => {
                if let Some(entry) = self.order.get_mut(id) {
                    let old_size = entry.replace(value);
                    self.used = self.used - u128::from(old_size) + u128::from(entry.size);
                }
                self.order.move_to_newest(id);
            }
            None => {
                let entry = SizedEntry::new(key.to_string(), value);
                self.used += u128::from(entry.size);
                let id = self.order.push_newest(entry);
                self.index.insert(key.to_string(), id);
            }
        }

        self.evict();
    }

    // == Get ==
    /// Retrieves a value and marks it as most recently used.
    pub fn get(&mut self, key: &str) -> Option<&V> {
        let Some(&id) = self.index.get(key) else {
            self.stats.record_miss();
            return None;
        };

        self.stats.record_hit();
        self.order.move_to_newest(id);
        self.order.get(id).map(|entry| &entry.value)
    }

    // == Peek ==
    /// Retrieves a value without changing its recency.
    pub fn peek(&self, key: &str) -> Option<&V> {
        let id = self.index.get(key)?;
        self.order.get(*id).map(|entry| &entry.value)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    // == List ==
    /// Returns a snapshot of every held key-value pair, in no particular order.
    pub fn list(&self) -> Vec<(String, V)>
    where
        V: Clone,
    {
        self.order
            .iter()
            .map(|entry| (entry.key.clone(), entry.value.clone()))
            .collect()
    }

    /// Removes oldest entries until the running total fits the capacity.
    fn evict(&mut self) {
        while self.used > u128::from(self.capacity) {
            let Some(entry) = self.order.pop_oldest() else {
                break;
            };
            self.index.remove(&entry.key);
            self.used -= u128::from(entry.size);
            self.stats.record_eviction();
            debug!(
                key = %entry.key,
                size = entry.size,
                used = self.used(),
                capacity = self.capacity,
                "evicted least recently used entry"
            );
        }
    }

    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    /// Returns the sum of the sizes of all held entries.
    ///
    /// Never exceeds [`capacity`](Self::capacity) between operations.
    pub fn used(&self) -> u64 {
        u64::try_from(self.used).unwrap_or(u64::MAX)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.index.len());
        stats
    }
}

impl<V: Value> Cache<V> for SizedLruCache<V> {
    fn get(&mut self, key: &str) -> Option<&V> {
        SizedLruCache::get(self, key)
    }

    fn put(&mut self, key: &str, value: V) {
        SizedLruCache::put(self, key, value)
    }
}
