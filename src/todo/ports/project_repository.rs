//! Repository port for project persistence and the INBOX lookup.

use crate::todo::domain::{Project, ProjectId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for project repository operations.
pub type ProjectRepositoryResult<T> = Result<T, ProjectRepositoryError>;

/// Project persistence contract.
///
/// Implementations guarantee that exactly one INBOX project exists once they
/// are initialised.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Loads a project by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::NotFound`] when the project does not
    /// exist.
    async fn get(&self, id: ProjectId) -> ProjectRepositoryResult<Project>;

    /// Inserts or replaces a project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::Validation`] or
    /// [`ProjectRepositoryError::BusinessRule`] when the store rejects the
    /// write.
    async fn save(&self, project: &Project) -> ProjectRepositoryResult<()>;

    /// Removes a project; removing an absent project is a no-op.
    async fn delete(&self, id: ProjectId) -> ProjectRepositoryResult<()>;

    /// Returns the INBOX project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::InboxNotFound`] when the store was
    /// never initialised with one.
    async fn get_inbox(&self) -> ProjectRepositoryResult<Project>;

    /// Returns every project.
    async fn get_all(&self) -> ProjectRepositoryResult<Vec<Project>>;
}

/// Errors returned by project repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ProjectRepositoryError {
    /// The project was not found.
    #[error("Project with id {0} not found")]
    NotFound(ProjectId),

    /// The INBOX project is missing.
    #[error("the INBOX project was not found")]
    InboxNotFound,

    /// The store rejected malformed project data.
    #[error("{0}")]
    Validation(String),

    /// The store rejected a write that breaks a storage-level rule.
    #[error("{0}")]
    BusinessRule(String),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ProjectRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
