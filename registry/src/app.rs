//! Dispatcher-facing facade.
//!
//! [`Registry`] wires the two registries over their injected stores and
//! exposes one method per externally callable operation. Transport and
//! rendering stay with the caller; every method takes an already
//! deserialized payload and returns the core result unchanged.

use crate::config::Config;
use crate::consistency::{self, Drift};
use crate::environment::RegistryEnvironment;
use crate::error::Result;
use crate::events::EventRegistry;
use crate::payloads::{
    BookEventPayload, DeleteEventPayload, DeleteProfilePayload, EventsPayload, GetEventPayload,
    ModifyEventPayload, ProfilePayload, RegisterUserPayload, UpdateUserProfilePayload,
};
use crate::types::{Event, Message, RenamePolicy, User};
use crate::users::UserRegistry;
use event_registry_core::store::{BTreeStore, KeyValueStore};
use std::sync::Arc;

/// The user and event registries behind a single entry point.
///
/// Built once at process start and handed to the dispatcher. Requests are
/// expected to arrive one at a time; the facade takes no locks of its own.
#[derive(Clone, Debug)]
pub struct Registry {
    users: UserRegistry,
    events: EventRegistry,
    rename_policy: RenamePolicy,
}

impl Registry {
    /// Wires both registries over the given stores with the default [`Config`]
    #[must_use]
    pub fn new(
        user_store: Arc<dyn KeyValueStore<User>>,
        event_store: Arc<dyn KeyValueStore<Event>>,
        env: RegistryEnvironment,
    ) -> Self {
        Self::from_config(&Config::default(), user_store, event_store, env)
    }

    /// Wires both registries and applies `config`
    #[must_use]
    pub fn from_config(
        config: &Config,
        user_store: Arc<dyn KeyValueStore<User>>,
        event_store: Arc<dyn KeyValueStore<Event>>,
        env: RegistryEnvironment,
    ) -> Self {
        let users = UserRegistry::new(user_store, env.clone())
            .with_default_role(config.default_role.clone());
        let events = EventRegistry::new(event_store, users.clone(), env);
        Self {
            users,
            events,
            rename_policy: config.rename_policy,
        }
    }

    /// In-memory stores with the production clock and identifiers
    #[must_use]
    pub fn in_memory(config: &Config) -> Self {
        Self::from_config(
            config,
            Arc::new(BTreeStore::new()),
            Arc::new(BTreeStore::new()),
            RegistryEnvironment::production(),
        )
    }

    /// Overrides how user renames treat owned events
    #[must_use]
    pub const fn with_rename_policy(mut self, policy: RenamePolicy) -> Self {
        self.rename_policy = policy;
        self
    }

    /// The active rename policy
    #[must_use]
    pub const fn rename_policy(&self) -> RenamePolicy {
        self.rename_policy
    }

    /// Direct access to the user registry
    #[must_use]
    pub const fn users(&self) -> &UserRegistry {
        &self.users
    }

    /// Direct access to the event registry
    #[must_use]
    pub const fn events(&self) -> &EventRegistry {
        &self.events
    }

    // ========== Users ==========

    /// `registerUser`
    ///
    /// # Errors
    ///
    /// See [`UserRegistry::register`].
    #[tracing::instrument(skip(self))]
    pub fn register_user(&self, payload: RegisterUserPayload) -> Result<Message> {
        self.users.register(&payload.username)
    }

    /// `getUserProfile`
    ///
    /// # Errors
    ///
    /// See [`UserRegistry::get_profile`].
    #[tracing::instrument(skip(self))]
    pub fn get_user_profile(&self, payload: ProfilePayload) -> Result<Option<User>> {
        self.users.get_profile(&payload.user)
    }

    /// `updateUserProfile`
    ///
    /// Under [`RenamePolicy::Cascade`] the events in the renamed user's
    /// created list that still carry the old name are re-pointed at the new
    /// name once the rename succeeds.
    ///
    /// # Errors
    ///
    /// See [`UserRegistry::update_profile`].
    #[tracing::instrument(skip(self))]
    pub fn update_user_profile(&self, payload: UpdateUserProfilePayload) -> Result<Message> {
        let message = self
            .users
            .update_profile(&payload.user_name, &payload.new_user_name)?;
        if self.rename_policy == RenamePolicy::Cascade {
            let listed = self.users.list_created_events(&payload.new_user_name)?;
            self.events
                .reassign_owner(&listed, &payload.user_name, &payload.new_user_name);
        }
        Ok(message)
    }

    /// `deleteProfile`
    ///
    /// # Errors
    ///
    /// See [`UserRegistry::delete`].
    #[tracing::instrument(skip(self))]
    pub fn delete_profile(&self, payload: DeleteProfilePayload) -> Result<Message> {
        self.users.delete(&payload.owner)
    }

    /// `isUserRegistered`
    #[must_use]
    pub fn is_user_registered(&self, username: &str) -> bool {
        self.users.exists(username)
    }

    /// `listCreatedEvents`
    ///
    /// # Errors
    ///
    /// See [`UserRegistry::list_created_events`].
    #[tracing::instrument(skip(self))]
    pub fn list_created_events(&self, payload: ProfilePayload) -> Result<Vec<String>> {
        self.users.list_created_events(&payload.user)
    }

    // ========== Events ==========

    /// `createEvent`; the payload's `owner` is the creator
    ///
    /// # Errors
    ///
    /// See [`EventRegistry::create`].
    #[tracing::instrument(skip(self))]
    pub fn create_event(&self, payload: EventsPayload) -> Result<Message> {
        let (details, owner) = payload.into_parts();
        self.events.create(details, &owner)
    }

    /// `getAllEvents`
    #[must_use]
    pub fn get_all_events(&self) -> Vec<Event> {
        self.events.list_all()
    }

    /// `getAnEventDetail`
    ///
    /// # Errors
    ///
    /// See [`EventRegistry::get`].
    #[tracing::instrument(skip(self))]
    pub fn get_an_event_detail(&self, payload: GetEventPayload) -> Result<Option<Event>> {
        self.events.get(&payload.name_of_event)
    }

    /// `deleteEvent`
    ///
    /// # Errors
    ///
    /// See [`EventRegistry::delete`].
    #[tracing::instrument(skip(self))]
    pub fn delete_event(&self, payload: DeleteEventPayload) -> Result<Message> {
        self.events
            .delete(&payload.name_of_event, &payload.owner_of_event)
    }

    /// `bookEvent`
    ///
    /// # Errors
    ///
    /// See [`EventRegistry::book`].
    #[tracing::instrument(skip(self))]
    pub fn book_event(&self, payload: BookEventPayload) -> Result<Message> {
        self.events.book(&payload.event_name, &payload.user)
    }

    /// `modifyEvent`
    ///
    /// # Errors
    ///
    /// See [`EventRegistry::modify`].
    #[tracing::instrument(skip(self))]
    pub fn modify_event(&self, payload: ModifyEventPayload) -> Result<Message> {
        let (name, changes) = payload.into_parts();
        self.events.modify(&name, changes)
    }

    // ========== Diagnostics ==========

    /// Disagreements between created-event lists and event ownership
    #[must_use]
    pub fn check_consistency(&self) -> Vec<Drift> {
        let drift = consistency::check(&self.users.list_all(), &self.events.list_all());
        if !drift.is_empty() {
            tracing::warn!(count = drift.len(), "registry drift detected");
        }
        drift
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::DEFAULT_ROLE;
    use event_registry_testing::{SequentialIdGenerator, test_clock};

    fn env() -> RegistryEnvironment {
        RegistryEnvironment::new(
            Arc::new(test_clock()),
            Arc::new(SequentialIdGenerator::new()),
        )
    }

    fn register(registry: &Registry, username: &str) -> User {
        registry
            .register_user(RegisterUserPayload {
                username: username.to_string(),
            })
            .unwrap();
        registry.users().get_profile(username).unwrap().unwrap()
    }

    #[test]
    fn new_matches_the_default_config() {
        let plain = Registry::new(
            Arc::new(BTreeStore::new()),
            Arc::new(BTreeStore::new()),
            env(),
        );
        let configured = Registry::from_config(
            &Config::default(),
            Arc::new(BTreeStore::new()),
            Arc::new(BTreeStore::new()),
            env(),
        );

        assert_eq!(plain.rename_policy(), configured.rename_policy());
        assert_eq!(plain.rename_policy(), RenamePolicy::Orphan);
        assert_eq!(register(&plain, "alice").role, DEFAULT_ROLE);
        assert_eq!(
            register(&plain, "bob").role,
            register(&configured, "bob").role
        );
    }

    #[test]
    fn from_config_applies_role_and_policy() {
        let config = Config {
            default_role: "organizer".to_string(),
            rename_policy: RenamePolicy::Cascade,
            ..Config::default()
        };
        let registry = Registry::from_config(
            &config,
            Arc::new(BTreeStore::new()),
            Arc::new(BTreeStore::new()),
            env(),
        );

        assert_eq!(registry.rename_policy(), RenamePolicy::Cascade);
        assert_eq!(register(&registry, "alice").role, "organizer");
    }
}
