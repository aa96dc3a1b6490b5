//! Notifier selected from configuration.

use async_trait::async_trait;

use super::{TracingNotifier, memory::RecordingNotifier};
use crate::config::TodoConfig;
use crate::todo::{
    domain::Task,
    ports::{NotificationPort, NotificationResult},
};

/// Notifier chosen by [`ConfiguredNotifier::from_config`].
#[derive(Debug, Clone)]
pub enum ConfiguredNotifier {
    /// Keeps notifications in memory; used when no recipient is configured.
    Recording(RecordingNotifier),
    /// Writes notifications to the log on behalf of the configured recipient.
    Tracing {
        /// Configured recipient address.
        recipient: String,
        /// Underlying log notifier.
        notifier: TracingNotifier,
    },
}

impl ConfiguredNotifier {
    /// Picks the notifier for `config`.
    #[must_use]
    pub fn from_config(config: &TodoConfig) -> Self {
        config.notification_email.as_ref().map_or_else(
            || Self::Recording(RecordingNotifier::new()),
            |recipient| Self::Tracing {
                recipient: recipient.clone(),
                notifier: TracingNotifier,
            },
        )
    }

    /// Returns the recording notifier, if that is the one in use.
    #[must_use]
    pub const fn as_recording(&self) -> Option<&RecordingNotifier> {
        match self {
            Self::Recording(notifier) => Some(notifier),
            Self::Tracing { .. } => None,
        }
    }

    /// Returns the configured recipient, if any.
    #[must_use]
    pub fn recipient(&self) -> Option<&str> {
        match self {
            Self::Recording(_) => None,
            Self::Tracing { recipient, .. } => Some(recipient),
        }
    }

    fn port(&self) -> &dyn NotificationPort {
        match self {
            Self::Recording(notifier) => notifier,
            Self::Tracing { notifier, .. } => notifier,
        }
    }
}

#[async_trait]
impl NotificationPort for ConfiguredNotifier {
    async fn notify_task_completed(&self, task: &Task) -> NotificationResult {
        self.port().notify_task_completed(task).await
    }

    async fn notify_task_high_priority(&self, task: &Task) -> NotificationResult {
        self.port().notify_task_high_priority(task).await
    }

    async fn notify_task_deadline_approaching(
        &self,
        task: &Task,
        days_remaining: u64,
    ) -> NotificationResult {
        self.port()
            .notify_task_deadline_approaching(task, days_remaining)
            .await
    }
}
