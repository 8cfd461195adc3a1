//! Environment-based configuration for the task store.
//!
//! | variable                       | default | meaning                           |
//! |--------------------------------|---------|-----------------------------------|
//! | `TASKSTORE_LATENCY_MS`         | `500`   | mock backend delay per call       |
//! | `TASKSTORE_SEED`               | `true`  | start with the "Sample Task"      |
//! | `TASKSTORE_BROADCAST_CAPACITY` | `16`    | action broadcast channel capacity |

use crate::api::DEFAULT_LATENCY;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable holding the mock latency in milliseconds
pub const LATENCY_VAR: &str = "TASKSTORE_LATENCY_MS";
/// Environment variable toggling the sample record
pub const SEED_VAR: &str = "TASKSTORE_SEED";
/// Environment variable holding the broadcast channel capacity
pub const BROADCAST_CAPACITY_VAR: &str = "TASKSTORE_BROADCAST_CAPACITY";

/// Configuration error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A variable was set but could not be parsed
    #[error("Failed to parse {var}={value}: {reason}")]
    ParseError {
        /// Variable name
        var: &'static str,
        /// Raw value
        value: String,
        /// Why it was rejected
        reason: String,
    },

    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

/// Task store configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TasksConfig {
    /// Artificial delay applied to every mock backend call
    #[serde(with = "millis")]
    pub latency: Duration,
    /// Whether the backend starts with the sample record
    pub seed_sample: bool,
    /// Capacity of the store's action broadcast channel
    pub broadcast_capacity: usize,
}

impl Default for TasksConfig {
    fn default() -> Self {
        Self {
            latency: DEFAULT_LATENCY,
            seed_sample: true,
            broadcast_capacity: 16,
        }
    }
}

impl TasksConfig {
    /// Load from process environment variables
    ///
    /// # Errors
    ///
    /// Returns error if a variable is set to an unparseable value or the
    /// result fails [`TasksConfig::validate`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load using `lookup` to resolve variable names
    ///
    /// Unset variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Same as [`TasksConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(LATENCY_VAR) {
            let millis = parse_number(LATENCY_VAR, &value)?;
            config.latency = Duration::from_millis(millis);
        }

        if let Some(value) = lookup(SEED_VAR) {
            config.seed_sample = parse_bool(SEED_VAR, &value)?;
        }

        if let Some(value) = lookup(BROADCAST_CAPACITY_VAR) {
            let capacity = parse_number(BROADCAST_CAPACITY_VAR, &value)?;
            config.broadcast_capacity =
                usize::try_from(capacity).map_err(|e| ConfigError::ParseError {
                    var: BROADCAST_CAPACITY_VAR,
                    value: value.clone(),
                    reason: e.to_string(),
                })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns error if the broadcast capacity is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.broadcast_capacity == 0 {
            return Err(ConfigError::ValidationError(
                "broadcast_capacity must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_number(var: &'static str, value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|e| ConfigError::ParseError {
            var,
            value: value.to_string(),
            reason: e.to_string(),
        })
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::ParseError {
            var,
            value: value.to_string(),
            reason: "expected true/false".to_string(),
        }),
    }
}

/// Serialize a `Duration` as whole milliseconds
mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |var: &str| map.get(var).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = TasksConfig::from_lookup(|_| None);
        assert_eq!(config, Ok(TasksConfig::default()));
    }

    #[test]
    fn reads_all_variables() {
        let config = TasksConfig::from_lookup(lookup_from(&[
            (LATENCY_VAR, "25"),
            (SEED_VAR, "no"),
            (BROADCAST_CAPACITY_VAR, "64"),
        ]));

        assert_eq!(
            config,
            Ok(TasksConfig {
                latency: Duration::from_millis(25),
                seed_sample: false,
                broadcast_capacity: 64,
            })
        );
    }

    #[test]
    fn rejects_bad_latency() {
        let err = TasksConfig::from_lookup(lookup_from(&[(LATENCY_VAR, "fast")]));
        assert!(matches!(
            err,
            Err(ConfigError::ParseError { var: LATENCY_VAR, .. })
        ));
    }

    #[test]
    fn rejects_bad_bool() {
        let err = TasksConfig::from_lookup(lookup_from(&[(SEED_VAR, "maybe")]));
        assert!(matches!(err, Err(ConfigError::ParseError { var: SEED_VAR, .. })));
    }

    #[test]
    fn rejects_zero_capacity() {
        let err = TasksConfig::from_lookup(lookup_from(&[(BROADCAST_CAPACITY_VAR, "0")]));
        assert!(matches!(err, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn latency_serializes_as_millis() {
        let json = serde_json::to_value(TasksConfig::default()).unwrap_or_default();
        assert_eq!(json["latency"], 500);

        let parsed: Result<TasksConfig, _> = serde_json::from_value(json);
        assert_eq!(parsed.ok(), Some(TasksConfig::default()));
    }
}
