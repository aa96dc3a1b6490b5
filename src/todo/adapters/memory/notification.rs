//! Notifier that records every notification for later inspection.

use async_trait::async_trait;
use std::sync::{Arc, Mutex, PoisonError};

use crate::todo::{
    domain::{Task, TaskId},
    ports::{NotificationError, NotificationPort, NotificationResult},
};

/// A notification captured by [`RecordingNotifier`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationEvent {
    /// A task was completed.
    TaskCompleted(TaskId),
    /// A task was raised to high priority.
    TaskHighPriority(TaskId),
    /// A task's deadline is approaching.
    DeadlineApproaching {
        /// The task being warned about.
        task_id: TaskId,
        /// Whole days left.
        days_remaining: u64,
    },
}

/// Thread-safe notifier that keeps notifications in memory, in send order.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    events: Arc<Mutex<Vec<NotificationEvent>>>,
}

impl RecordingNotifier {
    /// Creates a notifier with no recorded events.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every recorded event in send order.
    #[must_use]
    pub fn events(&self) -> Vec<NotificationEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the tasks announced as completed.
    #[must_use]
    pub fn completed_tasks(&self) -> Vec<TaskId> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                NotificationEvent::TaskCompleted(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    /// Returns the tasks announced as high priority.
    #[must_use]
    pub fn high_priority_tasks(&self) -> Vec<TaskId> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                NotificationEvent::TaskHighPriority(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    /// Returns the deadline warnings as `(task, days_remaining)` pairs.
    #[must_use]
    pub fn deadline_warnings(&self) -> Vec<(TaskId, u64)> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                NotificationEvent::DeadlineApproaching {
                    task_id,
                    days_remaining,
                } => Some((task_id, days_remaining)),
                _ => None,
            })
            .collect()
    }

    fn record(&self, event: NotificationEvent) -> NotificationResult {
        self.events
            .lock()
            .map_err(|err| NotificationError(err.to_string()))?
            .push(event);
        Ok(())
    }
}

#[async_trait]
impl NotificationPort for RecordingNotifier {
    async fn notify_task_completed(&self, task: &Task) -> NotificationResult {
        self.record(NotificationEvent::TaskCompleted(task.id()))
    }

    async fn notify_task_high_priority(&self, task: &Task) -> NotificationResult {
        self.record(NotificationEvent::TaskHighPriority(task.id()))
    }

    async fn notify_task_deadline_approaching(
        &self,
        task: &Task,
        days_remaining: u64,
    ) -> NotificationResult {
        self.record(NotificationEvent::DeadlineApproaching {
            task_id: task.id(),
            days_remaining,
        })
    }
}
