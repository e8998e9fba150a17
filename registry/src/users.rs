//! User registry: the `username -> User` map.
//!
//! Owns username uniqueness and each user's list of created events. The
//! event registry keeps that list in step through
//! [`UserRegistry::link_created_event`] and
//! [`UserRegistry::unlink_created_event`].

use crate::environment::RegistryEnvironment;
use crate::error::{RegistryError, Result};
use crate::types::{DEFAULT_ROLE, Message, User};
use event_registry_core::store::KeyValueStore;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Registry of users keyed by username.
///
/// Cloning is cheap and clones share the same underlying store.
#[derive(Clone)]
pub struct UserRegistry {
    store: Arc<dyn KeyValueStore<User>>,
    env: RegistryEnvironment,
    default_role: String,
}

impl UserRegistry {
    /// Creates a registry over `store`, assigning [`DEFAULT_ROLE`] to new users
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore<User>>, env: RegistryEnvironment) -> Self {
        Self {
            store,
            env,
            default_role: DEFAULT_ROLE.to_string(),
        }
    }

    /// Overrides the role assigned at registration
    #[must_use]
    pub fn with_default_role(mut self, role: impl Into<String>) -> Self {
        self.default_role = role.into();
        self
    }

    /// Registers `username` with no created events.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::InvalidDetails`] if `username` is empty or taken
    pub fn register(&self, username: &str) -> Result<Message> {
        if username.is_empty() {
            return Err(RegistryError::InvalidDetails(
                "Enter correct username".to_string(),
            ));
        }
        if self.store.contains_key(username) {
            return Err(already_taken(username));
        }

        let user = User::new(
            self.env.new_id(),
            username.to_string(),
            self.default_role.clone(),
            self.env.now(),
        );
        info!(username, id = %user.id, "user registered");
        self.store.insert(username.to_string(), user);

        Ok(format!("{username} registered successfully"))
    }

    /// Returns the stored record for `username`.
    ///
    /// Once existence is confirmed the value is always `Some`.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::InvalidDetails`] if `username` is empty
    /// - [`RegistryError::UserDoesNotExist`] if no such user is registered
    pub fn get_profile(&self, username: &str) -> Result<Option<User>> {
        if username.is_empty() {
            return Err(RegistryError::InvalidDetails(
                "User field is empty".to_string(),
            ));
        }
        debug!(username, "loading profile");
        self.store
            .get(username)
            .map(Some)
            .ok_or_else(|| RegistryError::UserDoesNotExist("User not found".to_string()))
    }

    /// Re-keys `old_name` under `new_name`.
    ///
    /// The identifier, timestamp, created events and role carry over. Events
    /// whose `owner` is `old_name` are not touched here.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::InvalidDetails`] if either name is empty or `new_name` is taken
    /// - [`RegistryError::UserDoesNotExist`] if `old_name` is not registered
    pub fn update_profile(&self, old_name: &str, new_name: &str) -> Result<Message> {
        if old_name.is_empty() || new_name.is_empty() {
            return Err(RegistryError::InvalidDetails(
                "Provide correct credentials".to_string(),
            ));
        }
        if self.store.contains_key(new_name) {
            return Err(already_taken(new_name));
        }
        let Some(mut user) = self.store.get(old_name) else {
            return Err(RegistryError::UserDoesNotExist(format!(
                "Cannot update profile: {old_name} not found"
            )));
        };

        user.username = new_name.to_string();
        self.store.insert(new_name.to_string(), user);
        self.store.remove(old_name);
        info!(from = old_name, to = new_name, "user renamed");

        Ok(format!(
            "Successfully updated profile from {old_name} to {new_name}"
        ))
    }

    /// Removes `username`. Events the user created are left in place.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::UserDoesNotExist`] if no such user is registered
    pub fn delete(&self, username: &str) -> Result<Message> {
        if self.store.remove(username).is_none() {
            return Err(RegistryError::UserDoesNotExist(format!(
                "User {username} does not exist"
            )));
        }
        info!(username, "user deleted");
        Ok(format!("User {username} has been deleted successfully"))
    }

    /// Records `event_name` as created by `username`.
    ///
    /// Idempotent: a name already present is not appended again. Does nothing
    /// if the user is absent.
    pub fn link_created_event(&self, username: &str, event_name: &str) {
        let Some(mut user) = self.store.get(username) else {
            warn!(username, event_name, "cannot link event to unknown user");
            return;
        };
        if user.has_created(event_name) {
            debug!(username, event_name, "event already linked");
            return;
        }
        user.events_created.push(event_name.to_string());
        self.store.insert(username.to_string(), user);
        debug!(username, event_name, "event linked to creator");
    }

    /// Drops the first entry equal to `event_name` from the user's list.
    ///
    /// Idempotent: does nothing if the user or the entry is absent.
    pub fn unlink_created_event(&self, username: &str, event_name: &str) {
        let Some(mut user) = self.store.get(username) else {
            warn!(username, event_name, "cannot unlink event from unknown user");
            return;
        };
        let Some(position) = user.events_created.iter().position(|name| name == event_name)
        else {
            warn!(username, event_name, "event was not linked to its owner");
            return;
        };
        user.events_created.remove(position);
        self.store.insert(username.to_string(), user);
        debug!(username, event_name, "event unlinked from creator");
    }

    /// Names of the events `username` created, in creation order.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::UserDoesNotExist`] if no such user is registered
    pub fn list_created_events(&self, username: &str) -> Result<Vec<String>> {
        self.store
            .get(username)
            .map(|user| user.events_created)
            .ok_or_else(|| {
                RegistryError::UserDoesNotExist(format!("User {username} does not exist"))
            })
    }

    /// Whether `username` is registered
    #[must_use]
    pub fn exists(&self, username: &str) -> bool {
        self.store.contains_key(username)
    }

    /// Every registered user in username order
    #[must_use]
    pub fn list_all(&self) -> Vec<User> {
        self.store.values()
    }
}

impl std::fmt::Debug for UserRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserRegistry")
            .field("users", &self.store.len())
            .field("default_role", &self.default_role)
            .finish_non_exhaustive()
    }
}

fn already_taken(username: &str) -> RegistryError {
    RegistryError::InvalidDetails(format!(
        "Username {username} is already taken. Try another one."
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use event_registry_core::environment::Clock;
    use event_registry_testing::{RecordingStore, SequentialIdGenerator, test_clock};

    fn setup() -> (UserRegistry, Arc<RecordingStore<User>>) {
        let store: Arc<RecordingStore<User>> = Arc::new(RecordingStore::new());
        let env = RegistryEnvironment::new(
            Arc::new(test_clock()),
            Arc::new(SequentialIdGenerator::new()),
        );
        (UserRegistry::new(store.clone(), env), store)
    }

    #[test]
    fn register_creates_user_with_defaults() {
        let (users, _) = setup();

        let msg = users.register("alice").unwrap();
        assert_eq!(msg, "alice registered successfully");

        let user = users.get_profile("alice").unwrap().unwrap();
        assert_eq!(user.username, "alice");
        assert_eq!(user.role, "user");
        assert!(user.events_created.is_empty());
        assert_eq!(user.created_at, test_clock().now());
        assert_eq!(user.id.as_uuid().as_u128(), 1);
    }

    #[test]
    fn register_twice_is_rejected_without_writing() {
        let (users, store) = setup();
        users.register("alice").unwrap();

        let err = users.register("alice").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidDetails);
        assert!(err.message().contains("already taken"));
        assert_eq!(store.writes(), 1);
    }

    #[test]
    fn register_empty_username_is_rejected() {
        let (users, store) = setup();
        let err = users.register("").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidDetails);
        assert_eq!(store.writes(), 0);
    }

    #[test]
    fn configured_default_role_is_applied() {
        let (users, _) = setup();
        let users = users.with_default_role("organizer");
        users.register("alice").unwrap();
        assert_eq!(users.get_profile("alice").unwrap().unwrap().role, "organizer");
    }

    #[test]
    fn get_profile_errors() {
        let (users, _) = setup();
        assert_eq!(users.get_profile("").unwrap_err().kind(), ErrorKind::InvalidDetails);
        assert_eq!(
            users.get_profile("ghost").unwrap_err().kind(),
            ErrorKind::UserDoesNotExist
        );
    }

    #[test]
    fn rename_keeps_identity_and_drops_old_key() {
        let (users, _) = setup();
        users.register("alice").unwrap();
        users.link_created_event("alice", "Launch");
        let before = users.get_profile("alice").unwrap().unwrap();

        let msg = users.update_profile("alice", "bob").unwrap();
        assert_eq!(msg, "Successfully updated profile from alice to bob");

        let after = users.get_profile("bob").unwrap().unwrap();
        assert_eq!(after.username, "bob");
        assert_eq!(after.id, before.id);
        assert_eq!(after.created_at, before.created_at);
        assert_eq!(after.events_created, vec!["Launch".to_string()]);
        assert_eq!(after.role, before.role);
        assert_eq!(
            users.get_profile("alice").unwrap_err().kind(),
            ErrorKind::UserDoesNotExist
        );
    }

    #[test]
    fn rename_checks_in_order() {
        let (users, store) = setup();
        users.register("alice").unwrap();
        users.register("bob").unwrap();
        let writes = store.writes();

        assert_eq!(
            users.update_profile("", "bob").unwrap_err().kind(),
            ErrorKind::InvalidDetails
        );
        // Taken name wins over missing source.
        assert_eq!(
            users.update_profile("ghost", "bob").unwrap_err().kind(),
            ErrorKind::InvalidDetails
        );
        assert_eq!(
            users.update_profile("ghost", "carol").unwrap_err().kind(),
            ErrorKind::UserDoesNotExist
        );
        assert_eq!(store.writes(), writes);
    }

    #[test]
    fn rename_to_self_is_rejected_as_taken() {
        let (users, _) = setup();
        users.register("alice").unwrap();
        assert_eq!(
            users.update_profile("alice", "alice").unwrap_err().kind(),
            ErrorKind::InvalidDetails
        );
        assert!(users.exists("alice"));
    }

    #[test]
    fn delete_removes_user() {
        let (users, _) = setup();
        users.register("alice").unwrap();

        assert_eq!(
            users.delete("alice").unwrap(),
            "User alice has been deleted successfully"
        );
        assert!(!users.exists("alice"));
        assert_eq!(users.delete("alice").unwrap_err().kind(), ErrorKind::UserDoesNotExist);
    }

    #[test]
    fn link_is_idempotent_and_unlink_removes_first_match() {
        let (users, _) = setup();
        users.register("alice").unwrap();

        users.link_created_event("alice", "Launch");
        users.link_created_event("alice", "Launch");
        users.link_created_event("alice", "Party");
        assert_eq!(
            users.list_created_events("alice").unwrap(),
            vec!["Launch".to_string(), "Party".to_string()]
        );

        users.unlink_created_event("alice", "Launch");
        users.unlink_created_event("alice", "Launch");
        assert_eq!(users.list_created_events("alice").unwrap(), vec!["Party".to_string()]);
    }

    #[test]
    fn linkage_on_unknown_user_is_a_silent_no_op() {
        let (users, store) = setup();
        users.link_created_event("ghost", "Launch");
        users.unlink_created_event("ghost", "Launch");
        assert_eq!(store.writes(), 0);
        assert!(!users.exists("ghost"));
    }

    #[test]
    fn list_created_events_requires_user() {
        let (users, _) = setup();
        assert_eq!(
            users.list_created_events("ghost").unwrap_err().kind(),
            ErrorKind::UserDoesNotExist
        );
    }
}
