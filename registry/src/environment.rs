//! Injected dependencies shared by both registries.

use event_registry_core::environment::{Clock, IdGenerator, SystemClock, UuidGenerator};
use event_registry_core::{DateTime, Id, Utc};
use std::sync::Arc;

/// Environment dependencies for the registries
#[derive(Clone)]
pub struct RegistryEnvironment {
    /// Clock for `createdAt` timestamps
    pub clock: Arc<dyn Clock>,
    /// Identifier source for new records
    pub ids: Arc<dyn IdGenerator>,
}

impl RegistryEnvironment {
    /// Creates a new `RegistryEnvironment`
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { clock, ids }
    }

    /// System clock and random UUIDs
    #[must_use]
    pub fn production() -> Self {
        Self::new(Arc::new(SystemClock), Arc::new(UuidGenerator))
    }

    pub(crate) fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub(crate) fn new_id(&self) -> Id {
        self.ids.new_id()
    }
}

impl std::fmt::Debug for RegistryEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryEnvironment").finish_non_exhaustive()
    }
}
