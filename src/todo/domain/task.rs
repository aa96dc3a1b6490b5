//! Task aggregate root.

use super::{
    CompletionNotes, Deadline, Description, Priority, ProjectId, TaskId, TaskStatus, TaskTitle,
    TodoDomainError,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task aggregate root.
///
/// `completed_at` and `completion_notes` are only ever written by
/// [`Task::complete`], together with the move to [`TaskStatus::Done`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    description: Description,
    project_id: ProjectId,
    deadline: Option<Deadline>,
    priority: Priority,
    status: TaskStatus,
    created_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
    completion_notes: Option<CompletionNotes>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description.
    pub description: Description,
    /// Owning project.
    pub project_id: ProjectId,
    /// Persisted deadline, if any.
    pub deadline: Option<Deadline>,
    /// Persisted priority.
    pub priority: Priority,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
    /// Persisted completion notes.
    pub completion_notes: Option<CompletionNotes>,
}

impl Task {
    /// Creates a new `TODO` task owned by `project_id`.
    #[must_use]
    pub fn new(
        title: TaskTitle,
        description: Description,
        project_id: ProjectId,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: TaskId::new(),
            title,
            description,
            project_id,
            deadline: None,
            priority: Priority::default(),
            status: TaskStatus::Todo,
            created_at: clock.utc(),
            completed_at: None,
            completion_notes: None,
        }
    }

    /// Sets the initial deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: Deadline) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Sets the initial priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            project_id: data.project_id,
            deadline: data.deadline,
            priority: data.priority,
            status: data.status,
            created_at: data.created_at,
            completed_at: data.completed_at,
            completion_notes: data.completion_notes,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub const fn description(&self) -> &Description {
        &self.description
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<Deadline> {
        self.deadline
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the completion timestamp; set iff the task is `DONE`.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns the completion notes; only set once the task is `DONE`.
    #[must_use]
    pub const fn completion_notes(&self) -> Option<&CompletionNotes> {
        self.completion_notes.as_ref()
    }

    /// Returns `true` when the task is `DONE`.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        self.status.is_terminal()
    }

    /// Returns `true` when a deadline exists and has passed.
    #[must_use]
    pub fn is_overdue(&self, clock: &impl Clock) -> bool {
        self.deadline
            .is_some_and(|deadline| deadline.is_overdue(clock))
    }

    /// Moves a `TODO` task to `IN_PROGRESS`.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::TaskNotStartable`] unless the task is
    /// `TODO`.
    pub fn start(&mut self) -> Result<(), TodoDomainError> {
        if self.status != TaskStatus::Todo {
            return Err(TodoDomainError::TaskNotStartable {
                task_id: self.id,
                status: self.status,
            });
        }
        self.status = TaskStatus::InProgress;
        Ok(())
    }

    /// Completes the task, recording the completion time and notes.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::TaskAlreadyCompleted`] when the task is
    /// already `DONE`; nothing is modified in that case.
    pub fn complete(
        &mut self,
        notes: Option<CompletionNotes>,
        clock: &impl Clock,
    ) -> Result<(), TodoDomainError> {
        if self.is_done() {
            return Err(TodoDomainError::TaskAlreadyCompleted(self.id));
        }
        self.status = TaskStatus::Done;
        self.completed_at = Some(clock.utc());
        self.completion_notes = notes;
        Ok(())
    }

    /// Replaces the priority.
    pub const fn set_priority(&mut self, priority: Priority) {
        self.priority = priority;
    }

    /// Replaces or clears the deadline.
    pub const fn set_deadline(&mut self, deadline: Option<Deadline>) {
        self.deadline = deadline;
    }

    /// Replaces the title and/or description.
    pub fn update_details(&mut self, title: Option<TaskTitle>, description: Option<Description>) {
        if let Some(new_title) = title {
            self.title = new_title;
        }
        if let Some(new_description) = description {
            self.description = new_description;
        }
    }

    /// Moves the task to another owning project.
    pub(crate) const fn assign_to(&mut self, project_id: ProjectId) {
        self.project_id = project_id;
    }
}
