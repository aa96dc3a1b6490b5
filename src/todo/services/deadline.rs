//! Deadline warning scan.

use crate::outcome::UseCaseResult;
use crate::todo::{
    domain::DeadlineScanner,
    ports::{NotificationPort, TaskRepository},
    services::{
        DeadlineCheckResponse,
        boundary::{Interrupt, conclude},
    },
};
use chrono::TimeDelta;
use mockable::Clock;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Warns about every unfinished task whose deadline is approaching.
///
/// The scan mutates nothing. Each run sends a warning for every task still
/// inside the window, so repeated runs repeat warnings.
#[derive(Clone)]
pub struct CheckDeadlinesUseCase<T, N, C>
where
    T: TaskRepository,
    N: NotificationPort,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    notifier: Arc<N>,
    clock: Arc<C>,
    scanner: DeadlineScanner,
}

impl<T, N, C> CheckDeadlinesUseCase<T, N, C>
where
    T: TaskRepository,
    N: NotificationPort,
    C: Clock + Send + Sync,
{
    /// Creates the use case with the default one-day window.
    #[must_use]
    pub fn new(tasks: Arc<T>, notifier: Arc<N>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            notifier,
            clock,
            scanner: DeadlineScanner::default(),
        }
    }

    /// Replaces the warning window.
    #[must_use]
    pub const fn with_threshold(mut self, threshold: TimeDelta) -> Self {
        self.scanner = DeadlineScanner::new(threshold);
        self
    }

    /// Returns the configured warning window.
    #[must_use]
    pub const fn threshold(&self) -> TimeDelta {
        self.scanner.threshold()
    }

    /// Runs the scan and reports how many warnings were sent.
    ///
    /// # Errors
    ///
    /// Returns [`crate::outcome::UseCaseFault`] for unmapped storage or
    /// notification failures.
    #[instrument(skip_all, fields(threshold_hours = self.scanner.threshold().num_hours()))]
    pub async fn execute(&self) -> UseCaseResult<DeadlineCheckResponse> {
        conclude(self.run().await)
    }

    async fn run(&self) -> Result<DeadlineCheckResponse, Interrupt> {
        let active = self.tasks.get_active_tasks().await?;
        let mut notifications_sent = 0;
        for warning in self.scanner.approaching(&active, &*self.clock) {
            self.notifier
                .notify_task_deadline_approaching(warning.task, warning.remaining_days)
                .await?;
            notifications_sent += 1;
        }
        debug!(scanned = active.len(), notifications_sent, "deadline scan finished");
        Ok(DeadlineCheckResponse { notifications_sent })
    }
}
