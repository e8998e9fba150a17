//! Cross-map drift detection.
//!
//! A user's `eventsCreated` list should name exactly the events whose
//! `owner` is that user. Renames under the orphan policy and user deletion
//! break this on purpose; [`check`] reports where.

use crate::types::{Event, User};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// One disagreement between the user map and the event map.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Drift {
    /// A user lists an event that is missing or owned by someone else
    DanglingLink {
        /// User holding the entry
        username: String,
        /// Listed event name
        event_name: String,
    },
    /// An event's owner exists but does not list it
    UnlinkedEvent {
        /// Owner named on the event
        owner: String,
        /// Event name
        event_name: String,
    },
    /// An event's owner is not a registered user
    OrphanedEvent {
        /// Owner named on the event
        owner: String,
        /// Event name
        event_name: String,
    },
}

impl fmt::Display for Drift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DanglingLink {
                username,
                event_name,
            } => write!(f, "{username} lists {event_name} but does not own it"),
            Self::UnlinkedEvent { owner, event_name } => {
                write!(f, "{event_name} is owned by {owner} but not listed")
            }
            Self::OrphanedEvent { owner, event_name } => {
                write!(f, "{event_name} is owned by unregistered {owner}")
            }
        }
    }
}

/// Compares both maps and returns every drift found, users first.
#[must_use]
pub fn check(users: &[User], events: &[Event]) -> Vec<Drift> {
    let by_name: BTreeMap<&str, &Event> = events
        .iter()
        .map(|event| (event.name_of_event.as_str(), event))
        .collect();
    let by_username: BTreeMap<&str, &User> = users
        .iter()
        .map(|user| (user.username.as_str(), user))
        .collect();

    let mut drift = Vec::new();

    for user in users {
        for name in &user.events_created {
            let owned = by_name
                .get(name.as_str())
                .is_some_and(|event| event.owner == user.username);
            if !owned {
                drift.push(Drift::DanglingLink {
                    username: user.username.clone(),
                    event_name: name.clone(),
                });
            }
        }
    }

    for event in events {
        match by_username.get(event.owner.as_str()) {
            None => drift.push(Drift::OrphanedEvent {
                owner: event.owner.clone(),
                event_name: event.name_of_event.clone(),
            }),
            Some(user) if !user.has_created(&event.name_of_event) => {
                drift.push(Drift::UnlinkedEvent {
                    owner: event.owner.clone(),
                    event_name: event.name_of_event.clone(),
                });
            }
            Some(_) => {}
        }
    }

    drift
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NewEvent;
    use event_registry_core::environment::{Clock, IdGenerator};
    use event_registry_testing::{SequentialIdGenerator, test_clock};

    fn user(ids: &SequentialIdGenerator, name: &str, events: &[&str]) -> User {
        let mut user = User::new(
            ids.new_id(),
            name.to_string(),
            "user".to_string(),
            test_clock().now(),
        );
        user.events_created = events.iter().map(ToString::to_string).collect();
        user
    }

    fn event(ids: &SequentialIdGenerator, name: &str, owner: &str) -> Event {
        Event::new(
            ids.new_id(),
            NewEvent {
                event_poster: "p".to_string(),
                name_of_event: name.to_string(),
                location_of_event: "l".to_string(),
                requirements: "r".to_string(),
                date: "d".to_string(),
                capacity: 1,
                is_public: false,
            },
            owner.to_string(),
            test_clock().now(),
        )
    }

    #[test]
    fn consistent_maps_report_nothing() {
        let ids = SequentialIdGenerator::new();
        let users = vec![user(&ids, "alice", &["Launch"])];
        let events = vec![event(&ids, "Launch", "alice")];
        assert!(check(&users, &events).is_empty());
    }

    #[test]
    fn renamed_owner_shows_both_sides() {
        let ids = SequentialIdGenerator::new();
        let users = vec![user(&ids, "bob", &["Launch"])];
        let events = vec![event(&ids, "Launch", "alice")];

        assert_eq!(
            check(&users, &events),
            vec![
                Drift::DanglingLink {
                    username: "bob".to_string(),
                    event_name: "Launch".to_string(),
                },
                Drift::OrphanedEvent {
                    owner: "alice".to_string(),
                    event_name: "Launch".to_string(),
                },
            ]
        );
    }

    #[test]
    fn missing_list_entry_is_unlinked() {
        let ids = SequentialIdGenerator::new();
        let users = vec![user(&ids, "alice", &[])];
        let events = vec![event(&ids, "Launch", "alice")];
        let drift = check(&users, &events);
        assert_eq!(drift.len(), 1);
        assert_eq!(drift[0].to_string(), "Launch is owned by alice but not listed");
    }
}
