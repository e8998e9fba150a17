//! Error types returned by registry operations.
//!
//! Every failure is an ordinary, reportable outcome: operations validate
//! first and return the first violation they find, before any write.

use serde::Serialize;
use thiserror::Error;

/// Errors returned by the user and event registries.
///
/// The set is closed. Each variant carries a message suitable for showing
/// to the caller as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RegistryError {
    /// No event is stored under the requested name.
    #[error("Event does not exist: {0}")]
    EventDoesNotExist(String),

    /// No user is stored under the requested username.
    #[error("User does not exist: {0}")]
    UserDoesNotExist(String),

    /// Empty or malformed input, or a name that is already taken.
    #[error("Invalid details: {0}")]
    InvalidDetails(String),

    /// An operation addressed an event without naming it.
    #[error("Event name is required: {0}")]
    EventNameIsRequired(String),

    /// The requester is not the event's owner.
    #[error("Must be owner: {0}")]
    MustBeOwner(String),

    /// The event has no seats left.
    #[error("Event full: {0}")]
    EventFull(String),
}

/// Fieldless discriminant of [`RegistryError`], handy for matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`RegistryError::EventDoesNotExist`]
    EventDoesNotExist,
    /// See [`RegistryError::UserDoesNotExist`]
    UserDoesNotExist,
    /// See [`RegistryError::InvalidDetails`]
    InvalidDetails,
    /// See [`RegistryError::EventNameIsRequired`]
    EventNameIsRequired,
    /// See [`RegistryError::MustBeOwner`]
    MustBeOwner,
    /// See [`RegistryError::EventFull`]
    EventFull,
}

impl RegistryError {
    /// The kind of failure, without its message
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::EventDoesNotExist(_) => ErrorKind::EventDoesNotExist,
            Self::UserDoesNotExist(_) => ErrorKind::UserDoesNotExist,
            Self::InvalidDetails(_) => ErrorKind::InvalidDetails,
            Self::EventNameIsRequired(_) => ErrorKind::EventNameIsRequired,
            Self::MustBeOwner(_) => ErrorKind::MustBeOwner,
            Self::EventFull(_) => ErrorKind::EventFull,
        }
    }

    /// The caller-facing message
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::EventDoesNotExist(msg)
            | Self::UserDoesNotExist(msg)
            | Self::InvalidDetails(msg)
            | Self::EventNameIsRequired(msg)
            | Self::MustBeOwner(msg)
            | Self::EventFull(msg) => msg,
        }
    }
}

/// Result alias used throughout the registry
pub type Result<T> = std::result::Result<T, RegistryError>;
