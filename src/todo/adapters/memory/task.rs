//! In-memory task repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::debug;

use crate::todo::{
    domain::{ProjectId, Task, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<HashMap<TaskId, Task>>>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_poisoned(err: &impl ToString) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

/// Collects matching tasks oldest first so listings are stable.
fn collect_sorted<'a>(tasks: impl Iterator<Item = &'a Task>) -> Vec<Task> {
    let mut found: Vec<Task> = tasks.cloned().collect();
    found.sort_by_key(|task| (task.created_at(), task.id()));
    found
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn get(&self, id: TaskId) -> TaskRepositoryResult<Task> {
        let state = self.state.read().map_err(|err| lock_poisoned(&err))?;
        state
            .get(&id)
            .cloned()
            .ok_or(TaskRepositoryError::NotFound(id))
    }

    async fn save(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| lock_poisoned(&err))?;
        debug!(task_id = %task.id(), project_id = %task.project_id(), "saving task");
        state.insert(task.id(), task.clone());
        Ok(())
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| lock_poisoned(&err))?;
        state.remove(&id);
        Ok(())
    }

    async fn find_by_project(&self, project_id: ProjectId) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(|err| lock_poisoned(&err))?;
        Ok(collect_sorted(
            state
                .values()
                .filter(|task| task.project_id() == project_id),
        ))
    }

    async fn get_active_tasks(&self) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(|err| lock_poisoned(&err))?;
        Ok(collect_sorted(state.values().filter(|task| !task.is_done())))
    }
}
