//! Event Registry - users, events, ownership and bookings
//!
//! A small registry in which users register under unique names, create
//! events, and book attendance. State lives in two injected ordered
//! key-value maps:
//!
//! - `username -> User` owned by [`UserRegistry`]
//! - `eventName -> Event` owned by [`EventRegistry`]
//!
//! # Architecture
//!
//! ```text
//!   dispatcher (transport, rendering)
//!                │
//!                ▼
//!        ┌──────────────┐
//!        │   Registry   │  one method per operation
//!        └──────────────┘
//!           │        │
//!           ▼        ▼
//!  ┌──────────────┐  ┌──────────────┐
//!  │ UserRegistry │◄─│EventRegistry │  create/delete keep
//!  └──────────────┘  └──────────────┘  eventsCreated in step
//!           │                 │
//!           ▼                 ▼
//!     KeyValueStore<User>  KeyValueStore<Event>
//! ```
//!
//! # Key Rules
//!
//! - Usernames and event names are unique map keys
//! - Only an event's owner may delete it
//! - `attendance.len() <= capacity` after every booking; no double booking
//! - `version` starts at 1 and grows by exactly 1 per `modify`
//!
//! # Example
//!
//! ```
//! use event_registry::{Config, Registry};
//! use event_registry::payloads::{BookEventPayload, EventsPayload, RegisterUserPayload};
//!
//! let registry = Registry::in_memory(&Config::default());
//! registry.register_user(RegisterUserPayload { username: "alice".into() })?;
//! registry.create_event(EventsPayload {
//!     event_poster: "poster.png".into(),
//!     name_of_event: "Launch".into(),
//!     location_of_event: "Hall A".into(),
//!     requirements: "None".into(),
//!     owner: "alice".into(),
//!     date: "2025-06-01".into(),
//!     capacity: 1,
//!     is_public: true,
//! })?;
//! registry.book_event(BookEventPayload { user: "bob".into(), event_name: "Launch".into() })?;
//!
//! assert_eq!(registry.get_all_events()[0].attendance, vec!["bob".to_string()]);
//! # Ok::<(), event_registry::RegistryError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod app;
pub mod config;
pub mod consistency;
pub mod environment;
pub mod error;
pub mod events;
pub mod payloads;
pub mod types;
pub mod users;

pub use app::Registry;
pub use config::Config;
pub use consistency::Drift;
pub use environment::RegistryEnvironment;
pub use error::{ErrorKind, RegistryError, Result};
pub use events::EventRegistry;
pub use types::*;
pub use users::UserRegistry;
