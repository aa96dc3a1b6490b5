//! Task priority and the deadline-driven priority policy.

use super::{ParseDomainValueError, Task};
use chrono::TimeDelta;
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task urgency level, ordered from least to most urgent.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    /// Can wait.
    Low,
    /// Default urgency.
    #[default]
    Medium,
    /// Needs attention soon.
    High,
}

impl Priority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Priority {
    type Error = ParseDomainValueError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "LOW" => Ok(Self::Low),
            "MEDIUM" => Ok(Self::Medium),
            "HIGH" => Ok(Self::High),
            _ => Err(ParseDomainValueError::new("priority", value)),
        }
    }
}

/// Derives a task's priority from how close its deadline is.
///
/// The calculation is pure: it never mutates the task.
#[derive(Debug, Clone, Copy, Default)]
pub struct PriorityCalculator;

impl PriorityCalculator {
    const HIGH_WINDOW_HOURS: i64 = 12;
    const MEDIUM_WINDOW_DAYS: i64 = 2;

    /// Returns the priority the task should carry right now.
    ///
    /// - no deadline: the task's current priority
    /// - overdue or at most 12 hours left: `High`
    /// - at most 2 days left: `Medium`
    /// - otherwise: `Low`
    #[must_use]
    pub fn calculate(task: &Task, clock: &impl Clock) -> Priority {
        let Some(deadline) = task.deadline() else {
            return task.priority();
        };

        let remaining = deadline.time_remaining(clock);
        if deadline.is_overdue(clock) || remaining <= TimeDelta::hours(Self::HIGH_WINDOW_HOURS) {
            Priority::High
        } else if remaining <= TimeDelta::days(Self::MEDIUM_WINDOW_DAYS) {
            Priority::Medium
        } else {
            Priority::Low
        }
    }
}
