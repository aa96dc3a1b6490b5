//! Application configuration read from the process environment.
//!
//! ```
//! use todo_core::config::TodoConfig;
//!
//! let config = TodoConfig::from_lookup(|key| match key {
//!     "TODO_DEADLINE_WARNING_HOURS" => Some("48".to_owned()),
//!     _ => None,
//! })
//! .expect("valid configuration");
//! assert_eq!(config.deadline_warning_hours, 48);
//! assert!(config.notification_email.is_none());
//! ```

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable holding the deadline warning window in hours.
pub const DEADLINE_WARNING_HOURS_VAR: &str = "TODO_DEADLINE_WARNING_HOURS";

/// Environment variable holding the notification recipient.
pub const NOTIFICATION_EMAIL_VAR: &str = "TODO_NOTIFICATION_EMAIL";

const DEFAULT_DEADLINE_WARNING_HOURS: u32 = 24;

/// Errors raised while loading [`TodoConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A variable was set to something that does not parse.
    #[error("{key} has invalid value {value:?}: {reason}")]
    InvalidValue {
        /// Variable name.
        key: &'static str,
        /// Raw value.
        value: String,
        /// Why the value was refused.
        reason: String,
    },
}

/// Runtime settings for the task-management core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TodoConfig {
    /// Width of the deadline warning window, in hours.
    pub deadline_warning_hours: u32,
    /// Recipient for outgoing notifications, if any.
    pub notification_email: Option<String>,
}

impl Default for TodoConfig {
    fn default() -> Self {
        Self {
            deadline_warning_hours: DEFAULT_DEADLINE_WARNING_HOURS,
            notification_email: None,
        }
    }
}

impl TodoConfig {
    /// Loads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for malformed variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads the configuration through `lookup`, falling back to defaults for
    /// unset or blank variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when the warning window is not a
    /// positive whole number of hours or the e-mail address lacks an `@`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();
        if let Some(raw) = read(DEADLINE_WARNING_HOURS_VAR) {
            config.deadline_warning_hours = parse_hours(raw)?;
        }
        if let Some(raw) = read(NOTIFICATION_EMAIL_VAR) {
            if !raw.contains('@') {
                return Err(ConfigError::InvalidValue {
                    key: NOTIFICATION_EMAIL_VAR,
                    value: raw,
                    reason: "expected an e-mail address".to_owned(),
                });
            }
            config.notification_email = Some(raw);
        }
        Ok(config)
    }

    /// Returns the deadline warning window.
    #[must_use]
    pub fn deadline_warning_threshold(&self) -> TimeDelta {
        TimeDelta::hours(i64::from(self.deadline_warning_hours))
    }
}

fn parse_hours(raw: String) -> Result<u32, ConfigError> {
    match raw.parse::<u32>() {
        Ok(0) => Err(ConfigError::InvalidValue {
            key: DEADLINE_WARNING_HOURS_VAR,
            value: raw,
            reason: "must be at least one hour".to_owned(),
        }),
        Ok(hours) => Ok(hours),
        Err(err) => Err(ConfigError::InvalidValue {
            key: DEADLINE_WARNING_HOURS_VAR,
            value: raw,
            reason: err.to_string(),
        }),
    }
}
