//! # Event Registry Testing
//!
//! Testing utilities and helpers for the event registry.
//!
//! This crate provides:
//! - Deterministic implementations of the injected capabilities
//! - A write-counting store for asserting "no partial writes"
//! - Property-based testing strategies for registry inputs
//!
//! ## Example
//!
//! ```
//! use event_registry_core::environment::{Clock, IdGenerator};
//! use event_registry_testing::{test_clock, SequentialIdGenerator};
//!
//! let clock = test_clock();
//! let ids = SequentialIdGenerator::new();
//!
//! assert_eq!(clock.now(), clock.now());
//! assert_ne!(ids.new_id(), ids.new_id());
//! ```

use chrono::{DateTime, Utc};
use event_registry_core::environment::{Clock, IdGenerator};
use event_registry_core::Id;

mod recording_store;

pub use recording_store::RecordingStore;

/// Mock implementations of the environment traits
pub mod mocks {
    use super::{Clock, DateTime, Id, IdGenerator, Utc};
    use std::sync::atomic::{AtomicU64, Ordering};
    use uuid::Uuid;

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use event_registry_testing::mocks::FixedClock;
    /// use event_registry_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }

    /// Predictable identifiers: `…0001`, `…0002`, `…0003`, ...
    #[derive(Debug, Default)]
    pub struct SequentialIdGenerator {
        next: AtomicU64,
    }

    impl SequentialIdGenerator {
        /// Create a generator whose first identifier is `1`
        #[must_use]
        pub const fn new() -> Self {
            Self {
                next: AtomicU64::new(0),
            }
        }

        /// Number of identifiers handed out so far
        #[must_use]
        pub fn issued(&self) -> u64 {
            self.next.load(Ordering::SeqCst)
        }
    }

    impl IdGenerator for SequentialIdGenerator {
        fn new_id(&self) -> Id {
            let n = self.next.fetch_add(1, Ordering::SeqCst) + 1;
            Id::from_uuid(Uuid::from_u128(u128::from(n)))
        }
    }
}

/// Test helpers and utilities
pub mod helpers {
    /// Install a `fmt` subscriber that writes through the test harness.
    ///
    /// Safe to call from every test; only the first call installs anything.
    pub fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "warn".into()),
            )
            .with_test_writer()
            .try_init();
    }
}

/// Property-based testing strategies using proptest.
pub mod properties {
    use proptest::prelude::*;

    /// Non-empty usernames.
    pub fn username() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9_]{0,11}"
    }

    /// Non-empty event names.
    pub fn event_name() -> impl Strategy<Value = String> {
        "[A-Z][a-z]{2,10}( [A-Z][a-z]{2,8})?"
    }

    /// A batch of usernames, possibly with repeats.
    pub fn bookers(max: usize) -> impl Strategy<Value = Vec<String>> {
        proptest::collection::vec("[a-e]{1,2}", 0..max)
    }
}

// Re-export commonly used items
pub use mocks::{FixedClock, SequentialIdGenerator, test_clock};
