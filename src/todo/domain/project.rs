//! Project aggregate root.

use super::{
    CompletionNotes, Description, ProjectId, ProjectName, ProjectStatus, ProjectType, Task,
    TaskId, TodoDomainError,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Name given to the INBOX project when it is seeded.
pub const INBOX_NAME: &str = "INBOX";

const INBOX_DESCRIPTION: &str = "Default project for tasks without an explicit project";

/// Project aggregate root.
///
/// A project owns its tasks by identity only. Resolving the tasks themselves
/// always goes through the task repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    name: ProjectName,
    description: Description,
    project_type: ProjectType,
    status: ProjectStatus,
    task_ids: Vec<TaskId>,
    created_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
    completion_notes: Option<CompletionNotes>,
}

/// Parameter object for reconstructing a persisted project aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedProjectData {
    /// Persisted project identifier.
    pub id: ProjectId,
    /// Persisted name.
    pub name: ProjectName,
    /// Persisted description.
    pub description: Description,
    /// Persisted project type.
    pub project_type: ProjectType,
    /// Persisted lifecycle status.
    pub status: ProjectStatus,
    /// Identities of owned tasks.
    pub task_ids: Vec<TaskId>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
    /// Persisted completion notes.
    pub completion_notes: Option<CompletionNotes>,
}

impl Project {
    /// Creates a new active `REGULAR` project.
    #[must_use]
    pub fn new(name: ProjectName, description: Description, clock: &impl Clock) -> Self {
        Self::with_type(name, description, ProjectType::Regular, clock)
    }

    /// Creates the INBOX project.
    ///
    /// # Errors
    ///
    /// Returns a validation error only if the fixed INBOX texts were to
    /// violate the field limits.
    pub fn create_inbox(clock: &impl Clock) -> Result<Self, TodoDomainError> {
        Ok(Self::with_type(
            ProjectName::new(INBOX_NAME)?,
            Description::new(INBOX_DESCRIPTION)?,
            ProjectType::Inbox,
            clock,
        ))
    }

    fn with_type(
        name: ProjectName,
        description: Description,
        project_type: ProjectType,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: ProjectId::new(),
            name,
            description,
            project_type,
            status: ProjectStatus::Active,
            task_ids: Vec::new(),
            created_at: clock.utc(),
            completed_at: None,
            completion_notes: None,
        }
    }

    /// Reconstructs a project from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedProjectData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            description: data.description,
            project_type: data.project_type,
            status: data.status,
            task_ids: data.task_ids,
            created_at: data.created_at,
            completed_at: data.completed_at,
            completion_notes: data.completion_notes,
        }
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Returns the name.
    #[must_use]
    pub const fn name(&self) -> &ProjectName {
        &self.name
    }

    /// Returns the description.
    #[must_use]
    pub const fn description(&self) -> &Description {
        &self.description
    }

    /// Returns the project type.
    #[must_use]
    pub const fn project_type(&self) -> ProjectType {
        self.project_type
    }

    /// Returns `true` for the INBOX project.
    #[must_use]
    pub const fn is_inbox(&self) -> bool {
        matches!(self.project_type, ProjectType::Inbox)
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> ProjectStatus {
        self.status
    }

    /// Returns the identities of owned tasks in registration order.
    #[must_use]
    pub fn task_ids(&self) -> &[TaskId] {
        &self.task_ids
    }

    /// Returns `true` when `task_id` is registered with this project.
    #[must_use]
    pub fn owns(&self, task_id: TaskId) -> bool {
        self.task_ids.contains(&task_id)
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the completion timestamp, if completed.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns the completion notes, if any.
    #[must_use]
    pub const fn completion_notes(&self) -> Option<&CompletionNotes> {
        self.completion_notes.as_ref()
    }

    /// Registers `task` with this project and points the task at it.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::ProjectNotAcceptingTasks`] when the project
    /// is completed; neither aggregate is modified in that case.
    pub fn add_task(&mut self, task: &mut Task) -> Result<(), TodoDomainError> {
        if self.status == ProjectStatus::Completed {
            return Err(TodoDomainError::ProjectNotAcceptingTasks(self.id));
        }
        if !self.owns(task.id()) {
            self.task_ids.push(task.id());
        }
        task.assign_to(self.id);
        Ok(())
    }

    /// Deregisters a task identity; returns `true` if it was registered.
    pub fn remove_task(&mut self, task_id: TaskId) -> bool {
        let before = self.task_ids.len();
        self.task_ids.retain(|id| *id != task_id);
        self.task_ids.len() != before
    }

    /// Filters `tasks` down to the ones this project owns that are not `DONE`,
    /// in registration order.
    #[must_use]
    pub fn incomplete_tasks<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        self.task_ids
            .iter()
            .filter_map(|task_id| tasks.iter().find(|task| task.id() == *task_id))
            .filter(|task| !task.is_done())
            .collect()
    }

    /// Renames the project and/or replaces its description.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::InboxNotEditable`] for the INBOX project.
    pub fn update_details(
        &mut self,
        name: Option<ProjectName>,
        description: Option<Description>,
    ) -> Result<(), TodoDomainError> {
        if self.is_inbox() {
            return Err(TodoDomainError::InboxNotEditable);
        }
        if let Some(new_name) = name {
            self.name = new_name;
        }
        if let Some(new_description) = description {
            self.description = new_description;
        }
        Ok(())
    }

    /// Checks that the project may be deleted.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::InboxNotDeletable`] for the INBOX project.
    pub const fn ensure_deletable(&self) -> Result<(), TodoDomainError> {
        if self.is_inbox() {
            return Err(TodoDomainError::InboxNotDeletable);
        }
        Ok(())
    }

    /// Marks the project as completed.
    ///
    /// Owned tasks are not touched; completing them is coordinated by the
    /// caller so that each task write can be compensated independently.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::InboxNotCompletable`] for the INBOX project
    /// or [`TodoDomainError::ProjectAlreadyCompleted`] when not active.
    pub fn mark_completed(
        &mut self,
        notes: Option<CompletionNotes>,
        clock: &impl Clock,
    ) -> Result<(), TodoDomainError> {
        if self.is_inbox() {
            return Err(TodoDomainError::InboxNotCompletable);
        }
        if self.status != ProjectStatus::Active {
            return Err(TodoDomainError::ProjectAlreadyCompleted(self.id));
        }
        self.status = ProjectStatus::Completed;
        self.completed_at = Some(clock.utc());
        self.completion_notes = notes;
        Ok(())
    }
}
