//! Repository port for task persistence and lookup.

use crate::todo::domain::{ProjectId, Task, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Loads a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn get(&self, id: TaskId) -> TaskRepositoryResult<Task>;

    /// Inserts or replaces a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Validation`] or
    /// [`TaskRepositoryError::BusinessRule`] when the store rejects the
    /// write.
    async fn save(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Removes a task; removing an absent task is a no-op.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()>;

    /// Returns every task owned by the given project.
    async fn find_by_project(&self, project_id: ProjectId) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns every task whose status is not `DONE`.
    async fn get_active_tasks(&self) -> TaskRepositoryResult<Vec<Task>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// The task was not found.
    #[error("Task with id {0} not found")]
    NotFound(TaskId),

    /// The store rejected malformed task data.
    #[error("{0}")]
    Validation(String),

    /// The store rejected a write that breaks a storage-level rule.
    #[error("{0}")]
    BusinessRule(String),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
