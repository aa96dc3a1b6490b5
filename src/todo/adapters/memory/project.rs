//! In-memory project repository seeded with the INBOX project.

use async_trait::async_trait;
use mockable::Clock;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::debug;

use crate::todo::{
    domain::{Project, ProjectId, TodoDomainError},
    ports::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult},
};

/// Thread-safe in-memory project repository.
#[derive(Debug, Clone)]
pub struct InMemoryProjectRepository {
    state: Arc<RwLock<InMemoryProjectState>>,
}

#[derive(Debug)]
struct InMemoryProjectState {
    projects: HashMap<ProjectId, Project>,
    inbox_id: ProjectId,
}

impl InMemoryProjectRepository {
    /// Creates a repository holding only a freshly created INBOX project.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError`] if the INBOX project cannot be built.
    pub fn new(clock: &impl Clock) -> Result<Self, TodoDomainError> {
        let inbox = Project::create_inbox(clock)?;
        Ok(Self::with_inbox(inbox))
    }

    /// Creates a repository around an existing INBOX project.
    #[must_use]
    pub fn with_inbox(inbox: Project) -> Self {
        let inbox_id = inbox.id();
        let projects = HashMap::from([(inbox_id, inbox)]);
        Self {
            state: Arc::new(RwLock::new(InMemoryProjectState { projects, inbox_id })),
        }
    }
}

fn lock_poisoned(err: &impl ToString) -> ProjectRepositoryError {
    ProjectRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn get(&self, id: ProjectId) -> ProjectRepositoryResult<Project> {
        let state = self.state.read().map_err(|err| lock_poisoned(&err))?;
        state
            .projects
            .get(&id)
            .cloned()
            .ok_or(ProjectRepositoryError::NotFound(id))
    }

    async fn save(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| lock_poisoned(&err))?;
        if project.is_inbox() && project.id() != state.inbox_id {
            return Err(ProjectRepositoryError::BusinessRule(
                "an INBOX project already exists".to_owned(),
            ));
        }
        debug!(project_id = %project.id(), tasks = project.task_ids().len(), "saving project");
        state.projects.insert(project.id(), project.clone());
        Ok(())
    }

    async fn delete(&self, id: ProjectId) -> ProjectRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| lock_poisoned(&err))?;
        if id == state.inbox_id {
            return Err(ProjectRepositoryError::BusinessRule(
                TodoDomainError::InboxNotDeletable.to_string(),
            ));
        }
        state.projects.remove(&id);
        Ok(())
    }

    async fn get_inbox(&self) -> ProjectRepositoryResult<Project> {
        let state = self.state.read().map_err(|err| lock_poisoned(&err))?;
        state
            .projects
            .get(&state.inbox_id)
            .cloned()
            .ok_or(ProjectRepositoryError::InboxNotFound)
    }

    async fn get_all(&self) -> ProjectRepositoryResult<Vec<Project>> {
        let state = self.state.read().map_err(|err| lock_poisoned(&err))?;
        let mut projects: Vec<Project> = state.projects.values().cloned().collect();
        projects.sort_by_key(|project| (!project.is_inbox(), project.created_at(), project.id()));
        Ok(projects)
    }
}
