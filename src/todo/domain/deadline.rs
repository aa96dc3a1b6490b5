//! Deadline value object.

use super::{Task, TodoDomainError};
use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Immutable due instant that was strictly in the future when created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Deadline {
    due_at: DateTime<Utc>,
}

impl Deadline {
    /// Creates a deadline due at `due_at`.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::DeadlineNotInFuture`] when `due_at` is not
    /// strictly after the clock's current instant.
    pub fn new(due_at: DateTime<Utc>, clock: &impl Clock) -> Result<Self, TodoDomainError> {
        if due_at <= clock.utc() {
            return Err(TodoDomainError::DeadlineNotInFuture(due_at));
        }
        Ok(Self { due_at })
    }

    /// Reconstructs a deadline from storage without re-checking the instant.
    #[must_use]
    pub const fn from_persisted(due_at: DateTime<Utc>) -> Self {
        Self { due_at }
    }

    /// Returns the due instant.
    #[must_use]
    pub const fn due_at(&self) -> DateTime<Utc> {
        self.due_at
    }

    /// Returns `true` once the due instant has passed.
    #[must_use]
    pub fn is_overdue(&self, clock: &impl Clock) -> bool {
        clock.utc() > self.due_at
    }

    /// Returns the time left until the due instant, floored at zero.
    #[must_use]
    pub fn time_remaining(&self, clock: &impl Clock) -> TimeDelta {
        (self.due_at - clock.utc()).max(TimeDelta::zero())
    }

    /// Returns `true` when `0 < time_remaining <= threshold`.
    #[must_use]
    pub fn is_approaching(&self, threshold: TimeDelta, clock: &impl Clock) -> bool {
        let remaining = self.time_remaining(clock);
        remaining > TimeDelta::zero() && remaining <= threshold
    }

    /// Returns the whole days left, rounded down.
    #[must_use]
    pub fn remaining_whole_days(&self, clock: &impl Clock) -> u64 {
        u64::try_from(self.time_remaining(clock).num_days()).unwrap_or(0)
    }
}

impl fmt::Display for Deadline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.due_at.to_rfc3339())
    }
}

/// Warning window used when none is configured.
#[must_use]
pub fn default_warning_threshold() -> TimeDelta {
    TimeDelta::days(1)
}

/// A task whose deadline falls inside the warning window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApproachingDeadline<'a> {
    /// The task being warned about.
    pub task: &'a Task,
    /// Whole days left before the deadline.
    pub remaining_days: u64,
}

/// Selects unfinished tasks whose deadlines are approaching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeadlineScanner {
    threshold: TimeDelta,
}

impl DeadlineScanner {
    /// Creates a scanner warning about deadlines within `threshold`.
    #[must_use]
    pub const fn new(threshold: TimeDelta) -> Self {
        Self { threshold }
    }

    /// Returns the configured warning window.
    #[must_use]
    pub const fn threshold(&self) -> TimeDelta {
        self.threshold
    }

    /// Returns every unfinished task in `tasks` with an approaching deadline,
    /// in input order.
    #[must_use]
    pub fn approaching<'a>(
        &self,
        tasks: &'a [Task],
        clock: &impl Clock,
    ) -> Vec<ApproachingDeadline<'a>> {
        tasks
            .iter()
            .filter(|task| !task.status().is_terminal())
            .filter_map(|task| {
                let deadline = task.deadline()?;
                deadline
                    .is_approaching(self.threshold, clock)
                    .then(|| ApproachingDeadline {
                        task,
                        remaining_days: deadline.remaining_whole_days(clock),
                    })
            })
            .collect()
    }
}

impl Default for DeadlineScanner {
    fn default() -> Self {
        Self::new(default_warning_threshold())
    }
}
