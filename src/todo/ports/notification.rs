//! Outbound notification port.
//!
//! Use cases call these methods only after every write of the operation has
//! been persisted.

use crate::todo::domain::Task;
use async_trait::async_trait;
use thiserror::Error;

/// Result type for notification operations.
pub type NotificationResult = Result<(), NotificationError>;

/// Notification delivery contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationPort: Send + Sync {
    /// Announces that a task was completed.
    async fn notify_task_completed(&self, task: &Task) -> NotificationResult;

    /// Announces that a task was raised to high priority.
    async fn notify_task_high_priority(&self, task: &Task) -> NotificationResult;

    /// Warns that a task's deadline is near.
    async fn notify_task_deadline_approaching(
        &self,
        task: &Task,
        days_remaining: u64,
    ) -> NotificationResult;
}

/// Delivery failure reported by a notifier.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("notification delivery failed: {0}")]
pub struct NotificationError(pub String);
