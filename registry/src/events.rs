//! Event registry: the `eventName -> Event` map.
//!
//! Enforces name uniqueness, owner-only deletion, capacity limits and
//! duplicate-booking prevention. Creation and deletion also update the
//! owner's created-events list in the [`UserRegistry`].
//!
//! # Ordering
//!
//! Every operation validates completely before its first write. Operations
//! that touch both maps write the event first and the owner's list second;
//! the second step is idempotent, so a retried create or delete converges.

use crate::environment::RegistryEnvironment;
use crate::error::{RegistryError, Result};
use crate::types::{Event, EventChanges, Message, NewEvent};
use crate::users::UserRegistry;
use event_registry_core::store::KeyValueStore;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Registry of events keyed by event name.
///
/// Cloning is cheap and clones share the same underlying stores.
#[derive(Clone)]
pub struct EventRegistry {
    store: Arc<dyn KeyValueStore<Event>>,
    users: UserRegistry,
    env: RegistryEnvironment,
}

impl EventRegistry {
    /// Creates a registry over `store` that keeps `users` in step
    #[must_use]
    pub fn new(
        store: Arc<dyn KeyValueStore<Event>>,
        users: UserRegistry,
        env: RegistryEnvironment,
    ) -> Self {
        Self { store, users, env }
    }

    /// Creates an event owned by `creator` and links it to the creator.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::InvalidDetails`] if a descriptive field is empty
    /// - [`RegistryError::UserDoesNotExist`] if `creator` is not registered
    /// - [`RegistryError::InvalidDetails`] if the event name is taken
    pub fn create(&self, details: NewEvent, creator: &str) -> Result<Message> {
        if let Some(field) = details.first_missing_field() {
            debug!(field, "create rejected: missing field");
            return Err(RegistryError::InvalidDetails(
                "Enter correct credentials".to_string(),
            ));
        }
        if !self.users.exists(creator) {
            return Err(RegistryError::UserDoesNotExist(
                "Must be registered to create an event".to_string(),
            ));
        }
        let name = details.name_of_event.clone();
        if self.store.contains_key(&name) {
            return Err(RegistryError::InvalidDetails(format!(
                "Event {name} already exists. Choose another name."
            )));
        }

        let event = Event::new(self.env.new_id(), details, creator.to_string(), self.env.now());
        info!(
            event = %name,
            owner = creator,
            capacity = event.capacity,
            "event created"
        );
        self.store.insert(name.clone(), event);
        self.users.link_created_event(creator, &name);

        Ok(format!("{name} event created successfully"))
    }

    /// Returns the event stored under `name`.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::InvalidDetails`] if `name` is empty
    /// - [`RegistryError::EventDoesNotExist`] if no such event exists
    pub fn get(&self, name: &str) -> Result<Option<Event>> {
        if name.is_empty() {
            return Err(RegistryError::InvalidDetails(
                "Event name field is empty".to_string(),
            ));
        }
        debug!(event = name, "loading event");
        self.store
            .get(name)
            .map(Some)
            .ok_or_else(|| not_available(name))
    }

    /// Every stored event in name order
    #[must_use]
    pub fn list_all(&self) -> Vec<Event> {
        self.store.values()
    }

    /// Events whose `owner` is `owner`, in name order
    #[must_use]
    pub fn list_by_owner(&self, owner: &str) -> Vec<Event> {
        self.store
            .values()
            .into_iter()
            .filter(|event| event.owner == owner)
            .collect()
    }

    /// Applies the provided field changes and bumps `version` once.
    ///
    /// The version is bumped even when `changes` is empty. Ownership is not
    /// checked.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::EventNameIsRequired`] if `name` is empty
    /// - [`RegistryError::EventDoesNotExist`] if no such event exists
    pub fn modify(&self, name: &str, changes: EventChanges) -> Result<Message> {
        if name.is_empty() {
            return Err(name_required());
        }
        let Some(mut event) = self.store.get(name) else {
            return Err(RegistryError::EventDoesNotExist(format!(
                "Event {name} not found"
            )));
        };

        if changes.is_empty() {
            debug!(event = name, "modify called without changes");
        }
        changes.apply_to(&mut event);
        event.version += 1;

        info!(event = name, version = event.version, "event modified");
        self.store.insert(name.to_string(), event);

        Ok(format!("Event {name} updated successfully"))
    }

    /// Deletes `name` on behalf of `requester` and unlinks it from the owner.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::EventNameIsRequired`] if `name` is empty
    /// - [`RegistryError::EventDoesNotExist`] if no such event exists
    /// - [`RegistryError::MustBeOwner`] if `requester` is not the owner
    pub fn delete(&self, name: &str, requester: &str) -> Result<Message> {
        if name.is_empty() {
            return Err(name_required());
        }
        let Some(event) = self.store.get(name) else {
            return Err(RegistryError::EventDoesNotExist(format!(
                "No event named {name} available"
            )));
        };
        if event.owner != requester {
            warn!(event = name, requester, "delete refused: not the owner");
            return Err(RegistryError::MustBeOwner(format!(
                "Only the owner of {name} can delete it"
            )));
        }

        self.store.remove(name);
        self.users.unlink_created_event(&event.owner, name);
        info!(event = name, owner = %event.owner, "event deleted");

        Ok(format!("Successfully deleted {name} event"))
    }

    /// Books a seat on `name` for `username`.
    ///
    /// The booker does not need to be a registered user.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::InvalidDetails`] if either argument is empty
    /// - [`RegistryError::EventDoesNotExist`] if no such event exists
    /// - [`RegistryError::EventFull`] if every seat is taken
    /// - [`RegistryError::InvalidDetails`] if `username` already booked
    pub fn book(&self, name: &str, username: &str) -> Result<Message> {
        if name.is_empty() || username.is_empty() {
            return Err(RegistryError::InvalidDetails(
                "Event name and username are both required to book".to_string(),
            ));
        }
        let Some(mut event) = self.store.get(name) else {
            return Err(RegistryError::EventDoesNotExist(format!(
                "{name} event is not available"
            )));
        };
        if event.is_full() {
            warn!(event = name, username, capacity = event.capacity, "booking refused: full");
            return Err(RegistryError::EventFull(format!(
                "Event {name} is fully booked"
            )));
        }
        if event.is_attending(username) {
            warn!(event = name, username, "booking refused: already booked");
            return Err(RegistryError::InvalidDetails(format!(
                "{username} has already booked {name}"
            )));
        }

        event.attendance.push(username.to_string());
        info!(
            event = name,
            username,
            remaining = event.remaining(),
            "event booked"
        );
        self.store.insert(name.to_string(), event);

        Ok(format!("Successfully booked {name}"))
    }

    /// Re-points the events in `listed` that `old_owner` still owns at
    /// `new_owner`.
    ///
    /// Used by the cascading rename policy with the renamed user's created
    /// events. Listed names that are gone or owned by someone else are
    /// skipped. Versions are left alone. Returns the number of events
    /// rewritten.
    pub fn reassign_owner(&self, listed: &[String], old_owner: &str, new_owner: &str) -> usize {
        let mut count = 0;
        for name in listed {
            let Some(mut event) = self.store.get(name) else {
                warn!(event = %name, owner = old_owner, "listed event no longer exists");
                continue;
            };
            if event.owner != old_owner {
                warn!(
                    event = %name,
                    owner = %event.owner,
                    expected = old_owner,
                    "listed event has another owner; not reassigned"
                );
                continue;
            }
            event.owner = new_owner.to_string();
            self.store.insert(name.clone(), event);
            count += 1;
        }
        if count > 0 {
            info!(from = old_owner, to = new_owner, count, "event owners reassigned");
        }
        count
    }

    /// Whether an event is stored under `name`
    #[must_use]
    pub fn exists(&self, name: &str) -> bool {
        self.store.contains_key(name)
    }
}

impl std::fmt::Debug for EventRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventRegistry")
            .field("events", &self.store.len())
            .finish_non_exhaustive()
    }
}

fn name_required() -> RegistryError {
    RegistryError::EventNameIsRequired("Event name is required".to_string())
}

fn not_available(name: &str) -> RegistryError {
    RegistryError::EventDoesNotExist(format!("No event named {name} available"))
}
