//! Controller timing configuration.
//!
//! # Invariants
//! - `notification_ttl_ms` is non-zero; a zero TTL would expire a
//!   notification in the same tick that shows it.
//! - Missing JSON keys fall back to defaults.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

pub const DEFAULT_LOAD_DELAY_MS: u64 = 1_500;
pub const DEFAULT_NOTIFICATION_TTL_MS: u64 = 5_000;

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    ZeroNotificationTtl,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid controller config: {err}"),
            Self::ZeroNotificationTtl => write!(f, "notification_ttl_ms must be > 0"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::ZeroNotificationTtl => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Timings for the simulated load and notification expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Delay before the initial snapshot lands in the store.
    pub load_delay_ms: u64,
    /// Lifetime of each notification, and so of the undo window.
    pub notification_ttl_ms: u64,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            load_delay_ms: DEFAULT_LOAD_DELAY_MS,
            notification_ttl_ms: DEFAULT_NOTIFICATION_TTL_MS,
        }
    }
}

impl ControllerConfig {
    /// Config with no load delay, for callers that already hold data.
    pub fn immediate() -> Self {
        Self {
            load_delay_ms: 0,
            ..Self::default()
        }
    }

    /// Parses and validates a JSON config document.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.notification_ttl_ms == 0 {
            return Err(ConfigError::ZeroNotificationTtl);
        }
        Ok(())
    }

    pub fn load_delay(&self) -> Duration {
        Duration::from_millis(self.load_delay_ms)
    }

    pub fn notification_ttl(&self) -> Duration {
        Duration::from_millis(self.notification_ttl_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, ControllerConfig, DEFAULT_NOTIFICATION_TTL_MS};

    #[test]
    fn missing_keys_use_defaults() {
        let config = ControllerConfig::from_json_str(r#"{"load_delay_ms": 0}"#).unwrap();
        assert_eq!(config.load_delay_ms, 0);
        assert_eq!(config.notification_ttl_ms, DEFAULT_NOTIFICATION_TTL_MS);
    }

    #[test]
    fn zero_ttl_is_rejected() {
        let err = ControllerConfig::from_json_str(r#"{"notification_ttl_ms": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroNotificationTtl));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = ControllerConfig::from_json_str("{").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
