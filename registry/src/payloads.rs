//! Request payloads accepted by the [`Registry`](crate::Registry) facade.
//!
//! The dispatcher deserializes these from whatever wire format it speaks;
//! field names are camelCase to match existing clients.

use crate::types::{EventChanges, NewEvent};
use serde::{Deserialize, Serialize};

/// `registerUser` payload
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterUserPayload {
    /// Requested username
    pub username: String,
}

/// `getUserProfile` / `listCreatedEvents` payload
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfilePayload {
    /// Username to look up
    pub user: String,
}

/// `updateUserProfile` payload
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserProfilePayload {
    /// Current username
    pub user_name: String,
    /// Desired username
    pub new_user_name: String,
}

/// `deleteProfile` payload
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteProfilePayload {
    /// Username to delete
    pub owner: String,
}

/// `createEvent` payload; `owner` is the creating user
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventsPayload {
    /// Poster image or URL
    pub event_poster: String,
    /// Unique event name
    pub name_of_event: String,
    /// Location
    pub location_of_event: String,
    /// Attendee requirements
    pub requirements: String,
    /// Creating user
    pub owner: String,
    /// Date
    pub date: String,
    /// Maximum attendees
    pub capacity: u64,
    /// Visibility flag
    pub is_public: bool,
}

impl EventsPayload {
    /// Splits the payload into event details and the creator's username
    #[must_use]
    pub fn into_parts(self) -> (NewEvent, String) {
        (
            NewEvent {
                event_poster: self.event_poster,
                name_of_event: self.name_of_event,
                location_of_event: self.location_of_event,
                requirements: self.requirements,
                date: self.date,
                capacity: self.capacity,
                is_public: self.is_public,
            },
            self.owner,
        )
    }
}

/// `getAnEventDetail` payload
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetEventPayload {
    /// Event to look up
    pub name_of_event: String,
}

/// `deleteEvent` payload
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteEventPayload {
    /// Event to delete
    pub name_of_event: String,
    /// Username of the requester, compared against the event's owner
    pub owner_of_event: String,
}

/// `bookEvent` payload
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookEventPayload {
    /// Username booking a seat
    pub user: String,
    /// Event to book
    pub event_name: String,
}

/// `modifyEvent` payload; absent or `null` fields are left unchanged
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifyEventPayload {
    /// Event to modify
    pub name_of_event: String,
    /// Replacement location
    #[serde(default)]
    pub new_location: Option<String>,
    /// Replacement date
    #[serde(default)]
    pub new_date: Option<String>,
    /// Replacement capacity
    #[serde(default)]
    pub new_capacity: Option<u64>,
}

impl ModifyEventPayload {
    /// Splits the payload into the event name and its changes
    #[must_use]
    pub fn into_parts(self) -> (String, EventChanges) {
        (
            self.name_of_event,
            EventChanges {
                new_location: self.new_location,
                new_date: self.new_date,
                new_capacity: self.new_capacity,
            },
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn modify_payload_treats_missing_and_null_alike() {
        let payload: ModifyEventPayload = serde_json::from_str(
            r#"{"nameOfEvent":"Launch","newDate":null,"newCapacity":3}"#,
        )
        .unwrap();
        let (name, changes) = payload.into_parts();
        assert_eq!(name, "Launch");
        assert_eq!(changes.new_location, None);
        assert_eq!(changes.new_date, None);
        assert_eq!(changes.new_capacity, Some(3));
    }

    #[test]
    fn modify_payload_keeps_explicit_empty_string() {
        let payload: ModifyEventPayload =
            serde_json::from_str(r#"{"nameOfEvent":"Launch","newLocation":""}"#).unwrap();
        assert_eq!(payload.into_parts().1.new_location, Some(String::new()));
    }

    #[test]
    fn events_payload_splits_owner_from_details() {
        let payload: EventsPayload = serde_json::from_str(
            r#"{
                "eventPoster": "poster.png",
                "nameOfEvent": "Launch",
                "locationOfEvent": "Hall A",
                "requirements": "Ticket",
                "owner": "alice",
                "date": "2025-06-01",
                "capacity": 1,
                "isPublic": true
            }"#,
        )
        .unwrap();
        let (details, owner) = payload.into_parts();
        assert_eq!(owner, "alice");
        assert_eq!(details.name_of_event, "Launch");
        assert!(details.is_public);
    }

    #[test]
    fn update_profile_payload_uses_source_field_names() {
        let payload: UpdateUserProfilePayload =
            serde_json::from_str(r#"{"userName":"alice","newUserName":"bob"}"#).unwrap();
        assert_eq!(payload.user_name, "alice");
        assert_eq!(payload.new_user_name, "bob");
    }
}
