//! Value/Cache Contract Module
//!
//! Capabilities shared by both engines: values report their own size, caches
//! expose get/put by key.

use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

// == Value ==
/// A storable value that reports its own footprint.
///
/// The size is used for capacity accounting by [`SizedLruCache`](crate::cache::SizedLruCache)
/// and must be deterministic for a given instance.
pub trait Value {
    /// Size of this value in capacity units (bytes for the built-in impls).
    fn size(&self) -> u64;
}

macro_rules! fixed_width_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Value for $ty {
                fn size(&self) -> u64 {
                    std::mem::size_of::<$ty>() as u64
                }
            }
        )*
    };
}

fixed_width_value!(i8, i16, i32, i64, i128, u8, u16, u32, u64, u128, f32, f64, bool, char);

impl Value for str {
    fn size(&self) -> u64 {
        self.len() as u64
    }
}

impl Value for String {
    fn size(&self) -> u64 {
        self.len() as u64
    }
}

impl Value for [u8] {
    fn size(&self) -> u64 {
        self.len() as u64
    }
}

impl Value for Vec<u8> {
    fn size(&self) -> u64 {
        self.len() as u64
    }
}

impl<T: Value + ?Sized> Value for Box<T> {
    fn size(&self) -> u64 {
        (**self).size()
    }
}

impl<T: Value + ?Sized> Value for Arc<T> {
    fn size(&self) -> u64 {
        (**self).size()
    }
}

impl<T: Value + ?Sized> Value for Rc<T> {
    fn size(&self) -> u64 {
        (**self).size()
    }
}

// == Cache ==
/// Base get/put capability.
pub trait Cache<V: Value> {
    /// Looks up `key`. Implementations may treat this as a use of the entry.
    fn get(&mut self, key: &str) -> Option<&V>;

    /// Stores `value` under `key`, replacing any previous value.
    fn put(&mut self, key: &str, value: V);
}

// == Expiring Cache ==
/// Get/put capability where every write carries a time-to-live.
///
/// A `ttl` of [`Duration::ZERO`] stores the value without expiration.
pub trait ExpiringCache<V> {
    /// Looks up `key`, treating expired entries as absent.
    fn get(&mut self, key: &str) -> Option<&V>;

    /// Stores `value` under `key` with the given time-to-live.
    fn put(&mut self, key: &str, value: V, ttl: Duration);
}
