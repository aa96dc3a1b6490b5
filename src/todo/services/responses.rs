//! Response values returned by successful use cases.

use crate::todo::domain::{
    Priority, Project, ProjectId, ProjectStatus, ProjectType, Task, TaskId, TaskStatus,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// Snapshot of a task as seen by callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskResponse {
    /// Task identifier.
    pub id: TaskId,
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Lifecycle status.
    pub status: TaskStatus,
    /// Priority.
    pub priority: Priority,
    /// Due instant, if any.
    pub due_at: Option<DateTime<Utc>>,
    /// Owning project.
    pub project_id: ProjectId,
    /// Completion timestamp, if done.
    pub completed_at: Option<DateTime<Utc>>,
    /// Completion notes, if any.
    pub completion_notes: Option<String>,
}

impl From<&Task> for TaskResponse {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id(),
            title: task.title().as_str().to_owned(),
            description: task.description().as_str().to_owned(),
            status: task.status(),
            priority: task.priority(),
            due_at: task.deadline().map(|deadline| deadline.due_at()),
            project_id: task.project_id(),
            completed_at: task.completed_at(),
            completion_notes: task
                .completion_notes()
                .map(|notes| notes.as_str().to_owned()),
        }
    }
}

/// Snapshot of a project and its tasks as seen by callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectResponse {
    /// Project identifier.
    pub id: ProjectId,
    /// Name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Regular or INBOX.
    pub project_type: ProjectType,
    /// Lifecycle status.
    pub status: ProjectStatus,
    /// Completion timestamp, if completed.
    pub completed_at: Option<DateTime<Utc>>,
    /// Completion notes, if any.
    pub completion_notes: Option<String>,
    /// Owned tasks.
    pub tasks: Vec<TaskResponse>,
}

impl ProjectResponse {
    /// Builds a response from a project and the tasks it owns.
    ///
    /// Tasks not registered with the project are ignored.
    #[must_use]
    pub fn new(project: &Project, tasks: &[Task]) -> Self {
        Self {
            id: project.id(),
            name: project.name().as_str().to_owned(),
            description: project.description().as_str().to_owned(),
            project_type: project.project_type(),
            status: project.status(),
            completed_at: project.completed_at(),
            completion_notes: project
                .completion_notes()
                .map(|notes| notes.as_str().to_owned()),
            tasks: tasks
                .iter()
                .filter(|task| project.owns(task.id()))
                .map(TaskResponse::from)
                .collect(),
        }
    }

    /// Returns the number of owned tasks.
    #[must_use]
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Returns the number of owned tasks that are `DONE`.
    #[must_use]
    pub fn completed_task_count(&self) -> usize {
        self.tasks
            .iter()
            .filter(|task| task.status == TaskStatus::Done)
            .count()
    }
}

/// Summary of a completed project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompleteProjectResponse {
    /// Project identifier.
    pub id: ProjectId,
    /// Status after completion.
    pub status: ProjectStatus,
    /// Completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
    /// Completion notes, if any.
    pub completion_notes: Option<String>,
    /// Number of tasks the project owns.
    pub task_count: usize,
    /// Tasks completed as part of this operation, in completion order.
    pub completed_task_ids: Vec<TaskId>,
}

/// Result of a deadline scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeadlineCheckResponse {
    /// Number of deadline warnings sent.
    pub notifications_sent: usize,
}

/// Acknowledgement that an aggregate was deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeletionOutcome {
    /// Identifier of the deleted aggregate.
    pub entity_id: Uuid,
}

impl fmt::Display for DeletionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Successfully deleted entity with ID: {}", self.entity_id)
    }
}
