//! Shared fixtures for registry integration tests.

#![allow(dead_code)]

use event_registry::payloads::EventsPayload;
use event_registry::{Event, Registry, RegistryEnvironment, User};
use event_registry_testing::{RecordingStore, SequentialIdGenerator, test_clock};
use std::sync::Arc;

/// A registry over recording stores, with handles to those stores.
pub struct Harness {
    pub registry: Registry,
    pub users: Arc<RecordingStore<User>>,
    pub events: Arc<RecordingStore<Event>>,
}

impl Harness {
    pub fn new() -> Self {
        event_registry_testing::helpers::init_tracing();

        let users: Arc<RecordingStore<User>> = Arc::new(RecordingStore::new());
        let events: Arc<RecordingStore<Event>> = Arc::new(RecordingStore::new());
        let env = RegistryEnvironment::new(
            Arc::new(test_clock()),
            Arc::new(SequentialIdGenerator::new()),
        );
        let registry = Registry::new(users.clone(), events.clone(), env);
        Self {
            registry,
            users,
            events,
        }
    }

    /// Total writes across both maps
    pub fn writes(&self) -> usize {
        self.users.writes() + self.events.writes()
    }
}

pub fn event_payload(name: &str, owner: &str, capacity: u64) -> EventsPayload {
    EventsPayload {
        event_poster: "poster.png".to_string(),
        name_of_event: name.to_string(),
        location_of_event: "Hall A".to_string(),
        requirements: "Ticket".to_string(),
        owner: owner.to_string(),
        date: "2025-06-01".to_string(),
        capacity,
        is_public: true,
    }
}
