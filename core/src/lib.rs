//! # Event Registry Core
//!
//! Capabilities injected into the event registry.
//!
//! The registry never reaches for ambient globals: time, identifiers and
//! persistence all arrive through the traits defined here, so that the
//! same business logic runs against production implementations and
//! deterministic test doubles alike.
//!
//! ## Capabilities
//!
//! - **Clock**: `now()` for stamping `createdAt`
//! - **`IdGenerator`**: `new_id()` producing a process-unique opaque [`Id`]
//! - **`KeyValueStore`**: an ordered map of records keyed by name
//!
//! ## Example
//!
//! ```
//! use event_registry_core::environment::{Clock, IdGenerator, SystemClock, UuidGenerator};
//! use event_registry_core::store::{BTreeStore, KeyValueStore};
//!
//! let clock = SystemClock;
//! let ids = UuidGenerator;
//! let store: BTreeStore<String> = BTreeStore::new();
//!
//! store.insert("b".to_string(), "second".to_string());
//! store.insert("a".to_string(), "first".to_string());
//!
//! assert_eq!(store.values(), vec!["first".to_string(), "second".to_string()]);
//! assert_ne!(ids.new_id(), ids.new_id());
//! let _ = clock.now();
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};

pub mod id;
pub mod store;

pub use id::Id;

/// Environment module - Dependency injection traits
///
/// All external dependencies are abstracted behind traits and injected
/// into the registries at construction time.
pub mod environment {
    use super::id::Id;
    use chrono::{DateTime, Utc};

    /// Clock trait - abstracts time operations for testability
    ///
    /// # Examples
    ///
    /// ```
    /// use event_registry_core::environment::{Clock, SystemClock};
    ///
    /// let first = SystemClock.now();
    /// let second = SystemClock.now();
    /// assert!(second >= first);
    /// ```
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Production clock backed by the system time.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }

    /// Identifier generation capability.
    ///
    /// Implementations must never hand out the same [`Id`] twice within the
    /// lifetime of the process.
    pub trait IdGenerator: Send + Sync {
        /// Produce a fresh identifier
        fn new_id(&self) -> Id;
    }

    /// Production generator producing random (v4) UUIDs.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct UuidGenerator;

    impl IdGenerator for UuidGenerator {
        fn new_id(&self) -> Id {
            Id::from_uuid(uuid::Uuid::new_v4())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::environment::{Clock, IdGenerator, SystemClock, UuidGenerator};
    use std::collections::HashSet;

    #[test]
    fn uuid_generator_does_not_repeat() {
        let ids: HashSet<_> = (0..1_000).map(|_| UuidGenerator.new_id()).collect();
        assert_eq!(ids.len(), 1_000);
    }

    #[test]
    fn system_clock_moves_forward() {
        let before = SystemClock.now();
        let after = SystemClock.now();
        assert!(after >= before);
    }
}
