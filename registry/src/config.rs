//! Configuration management for the registry.
//!
//! Loads configuration from environment variables with sensible defaults.

use crate::types::{DEFAULT_ROLE, RenamePolicy};
use std::env;

/// Default tracing filter when neither `REGISTRY_LOG_LEVEL` nor `RUST_LOG` is set
pub const DEFAULT_LOG_FILTER: &str = "info,event_registry=debug";

/// Registry configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Tracing filter directive (e.g. `info,event_registry=debug`)
    pub log_level: String,
    /// Role assigned to newly registered users
    pub default_role: String,
    /// How renaming a user affects the events they own
    pub rename_policy: RenamePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_FILTER.to_string(),
            default_role: DEFAULT_ROLE.to_string(),
            rename_policy: RenamePolicy::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparsable values fall back to their defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            log_level: lookup("REGISTRY_LOG_LEVEL")
                .or_else(|| lookup("RUST_LOG"))
                .unwrap_or(defaults.log_level),
            default_role: lookup("REGISTRY_DEFAULT_ROLE")
                .filter(|role| !role.is_empty())
                .unwrap_or(defaults.default_role),
            rename_policy: lookup("REGISTRY_RENAME_POLICY")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.rename_policy),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        assert_eq!(Config::from_lookup(lookup(&[])), Config::default());
    }

    #[test]
    fn explicit_values_are_used() {
        let config = Config::from_lookup(lookup(&[
            ("REGISTRY_LOG_LEVEL", "warn"),
            ("REGISTRY_DEFAULT_ROLE", "member"),
            ("REGISTRY_RENAME_POLICY", "cascade"),
        ]));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.default_role, "member");
        assert_eq!(config.rename_policy, RenamePolicy::Cascade);
    }

    #[test]
    fn rust_log_is_a_fallback_for_log_level() {
        let config = Config::from_lookup(lookup(&[("RUST_LOG", "trace")]));
        assert_eq!(config.log_level, "trace");
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = Config::from_lookup(lookup(&[
            ("REGISTRY_DEFAULT_ROLE", ""),
            ("REGISTRY_RENAME_POLICY", "sometimes"),
        ]));
        assert_eq!(config.default_role, "user");
        assert_eq!(config.rename_policy, RenamePolicy::Orphan);
    }
}
