//! # Flyweight Registry Module
//!
//! Every coordinate handed out by this crate lives in a [`CoordinateCache`]:
//! one registry per representation, mapping the exact bit pattern of a value
//! triple to the single shared, immutable instance for that triple.
//!
//! ## Concurrency
//!
//! Lookups take a shared read lock and never block each other. A miss takes
//! the write lock and inserts through the map's entry API, so racing callers
//! asking for the same key construct at most one instance and all of them
//! receive the same `Arc`.
//!
//! Entries are never evicted. Coordinates in the photo model come from a
//! small, reused set of values, so the registries stay small.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

/// Exact-match registry key built from the bit patterns of three components
///
/// `0.0` and `-0.0` are distinct keys; NaN never reaches a registry because
/// the factories reject non-finite input first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CoordinateKey([u64; 3]);

impl CoordinateKey {
    /// Builds the key for the triple `(a, b, c)`
    pub fn new(a: f64, b: f64, c: f64) -> Self {
        CoordinateKey([a.to_bits(), b.to_bits(), c.to_bits()])
    }

    /// Recovers the three components the key was built from
    pub fn components(&self) -> (f64, f64, f64) {
        let [a, b, c] = self.0;
        (f64::from_bits(a), f64::from_bits(b), f64::from_bits(c))
    }
}

impl fmt::Display for CoordinateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (a, b, c) = self.components();
        write!(f, "({}, {}, {})", a, b, c)
    }
}

/// Registry of shared instances of one coordinate representation
pub struct CoordinateCache<V> {
    /// Name used in log output
    name: &'static str,
    entries: RwLock<HashMap<CoordinateKey, Arc<V>>>,
}

impl<V> CoordinateCache<V> {
    /// Creates an empty registry
    pub fn new(name: &'static str) -> Self {
        CoordinateCache {
            name,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the shared instance for `key`, building it with `factory` on first use
    ///
    /// `factory` runs at most once per key for the lifetime of the registry.
    /// The first caller to insert a key wins; every later caller, racing or
    /// not, receives a clone of that same `Arc`.
    pub fn get_or_create<F>(&self, key: CoordinateKey, factory: F) -> Arc<V>
    where
        F: FnOnce() -> V,
    {
        if let Some(shared) = self.lookup(&key) {
            log::trace!("{} cache hit for {}", self.name, key);
            return shared;
        }

        // The map is only ever touched through single insert/get calls, so a
        // poisoned lock still guards a consistent map.
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let shared = entries.entry(key).or_insert_with(|| {
            log::debug!("registering new {} coordinate {}", self.name, key);
            Arc::new(factory())
        });
        Arc::clone(shared)
    }

    /// Returns the shared instance for `key` if one has been registered
    pub fn lookup(&self, key: &CoordinateKey) -> Option<Arc<V>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    /// Number of distinct instances held
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<V> fmt::Debug for CoordinateCache<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoordinateCache")
            .field("name", &self.name)
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    #[test]
    fn test_key_round_trip() {
        let key = CoordinateKey::new(1.23, -2.34, 0.0);
        assert_eq!(key.components(), (1.23, -2.34, 0.0));
        assert_eq!(key.to_string(), "(1.23, -2.34, 0)");
    }

    #[test]
    fn test_signed_zero_keys_differ() {
        assert_ne!(
            CoordinateKey::new(0.0, 0.0, 0.0),
            CoordinateKey::new(-0.0, 0.0, 0.0)
        );
    }

    #[test]
    fn test_same_key_returns_same_instance() {
        let cache = CoordinateCache::new("test");
        let key = CoordinateKey::new(1.0, 2.0, 3.0);

        let first = cache.get_or_create(key, || String::from("first"));
        let second = cache.get_or_create(key, || String::from("second"));

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(*second, "first");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_distinct_keys_get_distinct_instances() {
        let cache = CoordinateCache::new("test");
        assert!(cache.is_empty());

        let a = cache.get_or_create(CoordinateKey::new(1.0, 2.0, 3.0), || 1);
        let b = cache.get_or_create(CoordinateKey::new(3.0, 2.0, 1.0), || 2);

        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 2);
        assert!(cache.lookup(&CoordinateKey::new(1.0, 2.0, 3.0)).is_some());
        assert!(cache.lookup(&CoordinateKey::new(9.0, 9.0, 9.0)).is_none());
    }

    #[test]
    fn test_racing_misses_construct_once() {
        let cache = CoordinateCache::new("test");
        let constructions = AtomicUsize::new(0);
        let key = CoordinateKey::new(4.0, 5.0, 6.0);

        let results: Vec<Arc<usize>> = thread::scope(|scope| {
            let handles: Vec<_> = (0..16)
                .map(|i| {
                    let cache = &cache;
                    let constructions = &constructions;
                    scope.spawn(move || {
                        cache.get_or_create(key, || {
                            constructions.fetch_add(1, Ordering::SeqCst);
                            i
                        })
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().expect("worker panicked"))
                .collect()
        });

        assert_eq!(constructions.load(Ordering::SeqCst), 1);
        for shared in &results {
            assert!(Arc::ptr_eq(shared, &results[0]));
        }
    }
}
