//! Error types for todo domain validation, state transitions, and parsing.

use super::{ProjectId, TaskId, TaskStatus};
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Classification of a domain rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomainErrorKind {
    /// Malformed input reached the domain.
    Validation,
    /// The change would break an aggregate invariant.
    BusinessRule,
}

/// Errors raised by todo entities and value objects.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TodoDomainError {
    /// A required text field is empty after trimming.
    #[error("{field} is required")]
    EmptyField {
        /// Name of the rejected field.
        field: &'static str,
    },

    /// A text field exceeds its character limit.
    #[error("{field} cannot exceed {max} characters")]
    FieldTooLong {
        /// Name of the rejected field.
        field: &'static str,
        /// Maximum number of characters allowed.
        max: usize,
    },

    /// The deadline is not strictly in the future.
    #[error("deadline must be in the future, got {0}")]
    DeadlineNotInFuture(DateTime<Utc>),

    /// Only `TODO` tasks can be started.
    #[error("only TODO tasks can be started (task {task_id} is {status})")]
    TaskNotStartable {
        /// Task that rejected the transition.
        task_id: TaskId,
        /// Status at the time of the request.
        status: TaskStatus,
    },

    /// The task is already `DONE`.
    #[error("task {0} is already completed")]
    TaskAlreadyCompleted(TaskId),

    /// Completed projects accept no new tasks.
    #[error("cannot add tasks to a completed project ({0})")]
    ProjectNotAcceptingTasks(ProjectId),

    /// The project has already been completed.
    #[error("project {0} is already completed")]
    ProjectAlreadyCompleted(ProjectId),

    /// The INBOX project can never be completed.
    #[error("the INBOX project cannot be completed")]
    InboxNotCompletable,

    /// The INBOX project can never be deleted.
    #[error("the INBOX project cannot be deleted")]
    InboxNotDeletable,

    /// The INBOX project keeps its fixed name and description.
    #[error("the INBOX project cannot be edited")]
    InboxNotEditable,
}

impl TodoDomainError {
    /// Returns whether the error is a validation or business-rule rejection.
    #[must_use]
    pub const fn kind(&self) -> DomainErrorKind {
        match self {
            Self::EmptyField { .. } | Self::FieldTooLong { .. } | Self::DeadlineNotInFuture(_) => {
                DomainErrorKind::Validation
            }
            Self::TaskNotStartable { .. }
            | Self::TaskAlreadyCompleted(_)
            | Self::ProjectNotAcceptingTasks(_)
            | Self::ProjectAlreadyCompleted(_)
            | Self::InboxNotCompletable
            | Self::InboxNotDeletable
            | Self::InboxNotEditable => DomainErrorKind::BusinessRule,
        }
    }
}

/// Error returned while parsing an enumerated domain value.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown {kind}: {value}")]
pub struct ParseDomainValueError {
    /// Name of the enumeration being parsed.
    pub kind: &'static str,
    /// Rejected input.
    pub value: String,
}

impl ParseDomainValueError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
        }
    }
}
