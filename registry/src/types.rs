//! Domain types for the event registry.
//!
//! Records are stored whole: every mutation reads a record, changes it, and
//! writes the full value back under its key.

use chrono::{DateTime, Utc};
use event_registry_core::Id;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Human-readable success message returned by every mutating operation.
pub type Message = String;

/// Role given to newly registered users unless configured otherwise.
pub const DEFAULT_ROLE: &str = "user";

// ============================================================================
// User
// ============================================================================

/// A registered user, stored under its `username`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Assigned at registration, survives renames
    pub id: Id,
    /// When the user registered
    pub created_at: DateTime<Utc>,
    /// Unique name, also the store key
    pub username: String,
    /// Names of events this user created, in creation order
    pub events_created: Vec<String>,
    /// Role tag
    pub role: String,
}

impl User {
    /// Creates a freshly registered user with no events
    #[must_use]
    pub const fn new(id: Id, username: String, role: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            created_at,
            username,
            events_created: Vec::new(),
            role,
        }
    }

    /// Whether `event_name` is recorded as created by this user
    #[must_use]
    pub fn has_created(&self, event_name: &str) -> bool {
        self.events_created.iter().any(|name| name == event_name)
    }
}

// ============================================================================
// Event
// ============================================================================

/// Descriptive fields supplied when an event is created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    /// Poster image or URL
    pub event_poster: String,
    /// Unique event name, becomes the store key
    pub name_of_event: String,
    /// Where the event takes place
    pub location_of_event: String,
    /// What attendees need to bring or satisfy
    pub requirements: String,
    /// When the event takes place
    pub date: String,
    /// Maximum number of attendees
    pub capacity: u64,
    /// Visibility flag
    pub is_public: bool,
}

impl NewEvent {
    /// Name of the first required descriptive field that is empty, if any
    #[must_use]
    pub fn first_missing_field(&self) -> Option<&'static str> {
        [
            ("eventPoster", &self.event_poster),
            ("nameOfEvent", &self.name_of_event),
            ("locationOfEvent", &self.location_of_event),
            ("date", &self.date),
            ("requirements", &self.requirements),
        ]
        .into_iter()
        .find_map(|(field, value)| value.is_empty().then_some(field))
    }
}

/// A stored event, keyed by `name_of_event`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Assigned at creation
    pub id: Id,
    /// Poster image or URL
    pub event_poster: String,
    /// Unique name, also the store key
    pub name_of_event: String,
    /// Where the event takes place (mutable)
    pub location_of_event: String,
    /// What attendees need
    pub requirements: String,
    /// When the event takes place (mutable)
    pub date: String,
    /// When the event was created
    pub created_at: DateTime<Utc>,
    /// Username of the creator
    pub owner: String,
    /// Booked usernames in booking order, no duplicates
    pub attendance: Vec<String>,
    /// Maximum number of attendees (mutable)
    pub capacity: u64,
    /// Visibility flag
    pub is_public: bool,
    /// Starts at 1, bumped once per `modify`
    pub version: u64,
}

impl Event {
    /// Builds a new event at version 1 with no attendees
    #[must_use]
    pub fn new(id: Id, details: NewEvent, owner: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            event_poster: details.event_poster,
            name_of_event: details.name_of_event,
            location_of_event: details.location_of_event,
            requirements: details.requirements,
            date: details.date,
            created_at,
            owner,
            attendance: Vec::new(),
            capacity: details.capacity,
            is_public: details.is_public,
            version: 1,
        }
    }

    /// Whether no further bookings fit
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.attendance.len() as u64 >= self.capacity
    }

    /// Whether `username` already holds a booking
    #[must_use]
    pub fn is_attending(&self, username: &str) -> bool {
        self.attendance.iter().any(|name| name == username)
    }

    /// Seats left before the event is full
    #[must_use]
    pub fn remaining(&self) -> u64 {
        self.capacity.saturating_sub(self.attendance.len() as u64)
    }
}

/// Field changes requested by `modify`.
///
/// `None` leaves the field unchanged. `Some(value)` writes `value` verbatim,
/// including an empty string, which clears the field.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventChanges {
    /// Replacement location
    pub new_location: Option<String>,
    /// Replacement date
    pub new_date: Option<String>,
    /// Replacement capacity
    pub new_capacity: Option<u64>,
}

impl EventChanges {
    /// Whether no field is being changed
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.new_location.is_none() && self.new_date.is_none() && self.new_capacity.is_none()
    }

    /// Writes the provided fields into `event`
    pub fn apply_to(self, event: &mut Event) {
        if let Some(location) = self.new_location {
            event.location_of_event = location;
        }
        if let Some(date) = self.new_date {
            event.date = date;
        }
        if let Some(capacity) = self.new_capacity {
            event.capacity = capacity;
        }
    }
}

// ============================================================================
// Policies
// ============================================================================

/// What happens to a user's events when the user is renamed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenamePolicy {
    /// Events keep the old owner string
    #[default]
    Orphan,
    /// Events owned by the old name are re-pointed at the new name
    Cascade,
}

impl FromStr for RenamePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "orphan" => Ok(Self::Orphan),
            "cascade" => Ok(Self::Cascade),
            other => Err(format!("unknown rename policy: {other}")),
        }
    }
}

impl fmt::Display for RenamePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Orphan => write!(f, "orphan"),
            Self::Cascade => write!(f, "cascade"),
        }
    }
}
