//! Shared clock and repository doubles for integration tests.

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use todo_core::config::TodoConfig;
use todo_core::todo::{
    adapters::memory::{InMemoryProjectRepository, InMemoryTaskRepository, RecordingNotifier},
    domain::{ProjectId, Task, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
    services::TodoApplication,
};

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// Monday 2 March 2026, 09:00 UTC.
    pub fn reference() -> Self {
        Self(
            Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0)
                .single()
                .unwrap_or_default(),
        )
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// In-memory task repository that can be told to refuse completing a task.
#[derive(Debug, Clone, Default)]
pub struct GuardedTaskRepository {
    inner: InMemoryTaskRepository,
    locked: Arc<Mutex<Option<TaskId>>>,
}

impl GuardedTaskRepository {
    /// Refuses every later save of `task_id` in the `DONE` state.
    pub fn refuse_completion_of(&self, task_id: TaskId) {
        *self.locked.lock().unwrap_or_else(PoisonError::into_inner) = Some(task_id);
    }

    fn refuses(&self, task: &Task) -> bool {
        let locked = *self.locked.lock().unwrap_or_else(PoisonError::into_inner);
        task.is_done() && locked == Some(task.id())
    }
}

#[async_trait]
impl TaskRepository for GuardedTaskRepository {
    async fn get(&self, id: TaskId) -> TaskRepositoryResult<Task> {
        self.inner.get(id).await
    }

    async fn save(&self, task: &Task) -> TaskRepositoryResult<()> {
        if self.refuses(task) {
            return Err(TaskRepositoryError::BusinessRule(format!(
                "task {} is under review and cannot be completed",
                task.id()
            )));
        }
        self.inner.save(task).await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.inner.delete(id).await
    }

    async fn find_by_project(&self, project_id: ProjectId) -> TaskRepositoryResult<Vec<Task>> {
        self.inner.find_by_project(project_id).await
    }

    async fn get_active_tasks(&self) -> TaskRepositoryResult<Vec<Task>> {
        self.inner.get_active_tasks().await
    }
}

/// Application wired over the guarded repository and a recording notifier.
pub type TestApplication = TodoApplication<
    GuardedTaskRepository,
    InMemoryProjectRepository,
    RecordingNotifier,
    FixedClock,
>;

/// Builds a [`TestApplication`] at the reference instant.
///
/// # Errors
///
/// Returns an error if the INBOX project cannot be seeded.
pub fn test_application(config: TodoConfig) -> Result<TestApplication, eyre::Report> {
    let clock = FixedClock::reference();
    let projects = InMemoryProjectRepository::new(&clock)?;
    Ok(TodoApplication::new(
        Arc::new(GuardedTaskRepository::default()),
        Arc::new(projects),
        Arc::new(RecordingNotifier::new()),
        Arc::new(clock),
    )
    .with_config(config))
}
