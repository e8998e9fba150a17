//! Write-counting store for registry tests
//!
//! [`RecordingStore`] behaves like `BTreeStore` but counts every insert and
//! remove, so tests can assert that a rejected operation touched nothing.

#![allow(clippy::module_name_repetitions)]

use event_registry_core::store::{BTreeStore, KeyValueStore};
use std::sync::atomic::{AtomicUsize, Ordering};

/// In-memory ordered store that records how many writes it received.
///
/// # Example
///
/// ```
/// use event_registry_core::store::KeyValueStore;
/// use event_registry_testing::RecordingStore;
///
/// let store = RecordingStore::new();
/// store.insert("alice".to_string(), 1_u8);
/// let _ = store.get("alice");
/// store.remove("alice");
///
/// assert_eq!(store.inserts(), 1);
/// assert_eq!(store.removes(), 1);
/// assert_eq!(store.writes(), 2);
/// ```
#[derive(Debug, Default)]
pub struct RecordingStore<V> {
    inner: BTreeStore<V>,
    inserts: AtomicUsize,
    removes: AtomicUsize,
}

impl<V> RecordingStore<V> {
    /// Create a new empty recording store
    #[must_use]
    pub const fn new() -> Self {
        Self {
            inner: BTreeStore::new(),
            inserts: AtomicUsize::new(0),
            removes: AtomicUsize::new(0),
        }
    }

    /// Number of `insert` calls observed
    #[must_use]
    pub fn inserts(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }

    /// Number of `remove` calls observed
    #[must_use]
    pub fn removes(&self) -> usize {
        self.removes.load(Ordering::SeqCst)
    }

    /// Total writes (inserts plus removes)
    #[must_use]
    pub fn writes(&self) -> usize {
        self.inserts() + self.removes()
    }
}

impl<V> KeyValueStore<V> for RecordingStore<V>
where
    V: Clone + Send + Sync,
{
    fn get(&self, key: &str) -> Option<V> {
        self.inner.get(key)
    }

    fn insert(&self, key: String, value: V) {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        self.inner.insert(key, value);
    }

    fn remove(&self, key: &str) -> Option<V> {
        self.removes.fetch_add(1, Ordering::SeqCst);
        self.inner.remove(key)
    }

    fn values(&self) -> Vec<V> {
        self.inner.values()
    }
}
