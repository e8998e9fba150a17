//! Ordered key-value store abstraction backing the registries.
//!
//! Each registry owns exactly one map (`username -> User`,
//! `eventName -> Event`). The map is injected rather than held as ambient
//! state, so it can be swapped for a durable implementation without touching
//! business logic.
//!
//! # Design
//!
//! The contract is deliberately small:
//!
//! - `get`: point lookup by key
//! - `insert`: whole-record upsert (no partial field writes)
//! - `remove`: delete a key, returning the previous record
//! - `values`: every record in ascending key order
//!
//! Writes are assumed not to fail. A store that can fail must be paired with
//! compensation in the caller, since cross-map updates are not two-phase.
//!
//! # Implementations
//!
//! - [`BTreeStore`]: in-process ordered map (production default)
//! - `RecordingStore` (in `event-registry-testing`): counts writes for tests

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Ordered key-value store for records of type `V`.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so they can be shared as
/// `Arc<dyn KeyValueStore<V>>`. Methods take `&self`; implementations
/// provide their own interior mutability.
pub trait KeyValueStore<V>: Send + Sync {
    /// Look up the record stored under `key`.
    fn get(&self, key: &str) -> Option<V>;

    /// Store `value` under `key`, replacing any existing record.
    fn insert(&self, key: String, value: V);

    /// Remove the record stored under `key`, returning it if present.
    fn remove(&self, key: &str) -> Option<V>;

    /// All records in ascending key order.
    fn values(&self) -> Vec<V>;

    /// Whether a record is stored under `key`.
    fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of stored records.
    fn len(&self) -> usize {
        self.values().len()
    }

    /// Whether the store holds no records.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-process ordered store over a `BTreeMap`.
///
/// A poisoned lock is recovered instead of propagated: every write replaces a
/// whole record, so a panic in another holder cannot leave a half-written
/// value behind.
///
/// # Example
///
/// ```
/// use event_registry_core::store::{BTreeStore, KeyValueStore};
///
/// let store = BTreeStore::new();
/// store.insert("launch".to_string(), 1_u32);
/// assert_eq!(store.get("launch"), Some(1));
/// assert_eq!(store.remove("launch"), Some(1));
/// assert!(store.is_empty());
/// ```
#[derive(Debug)]
pub struct BTreeStore<V> {
    entries: RwLock<BTreeMap<String, V>>,
}

impl<V> BTreeStore<V> {
    /// Create a new empty store
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: RwLock::new(BTreeMap::new()),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, BTreeMap<String, V>> {
        self.entries.read().unwrap_or_else(|poisoned| {
            tracing::warn!("recovering poisoned store lock (read)");
            PoisonError::into_inner(poisoned)
        })
    }

    fn write(&self) -> RwLockWriteGuard<'_, BTreeMap<String, V>> {
        self.entries.write().unwrap_or_else(|poisoned| {
            tracing::warn!("recovering poisoned store lock (write)");
            PoisonError::into_inner(poisoned)
        })
    }
}

impl<V> Default for BTreeStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> KeyValueStore<V> for BTreeStore<V>
where
    V: Clone + Send + Sync,
{
    fn get(&self, key: &str) -> Option<V> {
        self.read().get(key).cloned()
    }

    fn insert(&self, key: String, value: V) {
        self.write().insert(key, value);
    }

    fn remove(&self, key: &str) -> Option<V> {
        self.write().remove(key)
    }

    fn values(&self) -> Vec<V> {
        self.read().values().cloned().collect()
    }

    fn contains_key(&self, key: &str) -> bool {
        self.read().contains_key(key)
    }

    fn len(&self) -> usize {
        self.read().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn insert_is_an_upsert() {
        let store = BTreeStore::new();
        store.insert("k".to_string(), 1);
        store.insert("k".to_string(), 2);
        assert_eq!(store.get("k"), Some(2));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn remove_missing_key_is_none() {
        let store: BTreeStore<u8> = BTreeStore::new();
        assert_eq!(store.remove("nothing"), None);
        assert!(!store.contains_key("nothing"));
    }

    proptest! {
        #[test]
        fn values_come_back_in_key_order(keys in proptest::collection::vec("[a-z]{1,6}", 0..40)) {
            let store = BTreeStore::new();
            for key in &keys {
                store.insert(key.clone(), key.clone());
            }

            let mut expected = keys.clone();
            expected.sort();
            expected.dedup();
            prop_assert_eq!(store.values(), expected);
        }
    }
}
