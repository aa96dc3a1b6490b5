//! Notifier that emits notifications as structured log events.

use async_trait::async_trait;
use tracing::info;

use crate::todo::{
    domain::Task,
    ports::{NotificationPort, NotificationResult},
};

/// Notifier that writes each notification to the `tracing` pipeline.
///
/// Useful where no outbound channel is configured: operators still see the
/// notifications in the application log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

#[async_trait]
impl NotificationPort for TracingNotifier {
    async fn notify_task_completed(&self, task: &Task) -> NotificationResult {
        info!(task_id = %task.id(), title = %task.title(), "task completed");
        Ok(())
    }

    async fn notify_task_high_priority(&self, task: &Task) -> NotificationResult {
        info!(task_id = %task.id(), title = %task.title(), "task set to high priority");
        Ok(())
    }

    async fn notify_task_deadline_approaching(
        &self,
        task: &Task,
        days_remaining: u64,
    ) -> NotificationResult {
        info!(
            task_id = %task.id(),
            title = %task.title(),
            days_remaining,
            "task deadline approaching"
        );
        Ok(())
    }
}
