//! Translation of domain and port errors at the use-case boundary, plus the
//! compensating writes used when a multi-step operation is rejected.

use crate::outcome::{ErrorCode, Outcome, UseCaseError, UseCaseFault, UseCaseResult};
use crate::todo::{
    domain::{DomainErrorKind, Project, Task, TodoDomainError},
    ports::{
        NotificationError, ProjectRepository, ProjectRepositoryError, TaskRepository,
        TaskRepositoryError,
    },
};
use tracing::{error, info, warn};

/// Reason a use case stopped before producing its value.
#[derive(Debug)]
pub(crate) enum Interrupt {
    /// A recoverable rejection, reported as a failed [`Outcome`].
    Rejected(UseCaseError),
    /// An unmapped failure that escapes the use case.
    Fault(UseCaseFault),
}

impl Interrupt {
    /// Returns `true` for rejections that warrant compensating writes.
    ///
    /// Only validation and business-rule rejections are compensated; a
    /// missing aggregate or an infrastructure fault is not.
    pub(crate) fn is_compensable(&self) -> bool {
        matches!(
            self,
            Self::Rejected(err) if matches!(
                err.code(),
                ErrorCode::ValidationError | ErrorCode::BusinessRuleViolation
            )
        )
    }
}

impl From<TodoDomainError> for Interrupt {
    fn from(err: TodoDomainError) -> Self {
        let message = err.to_string();
        Self::Rejected(match err.kind() {
            DomainErrorKind::Validation => UseCaseError::validation(message),
            DomainErrorKind::BusinessRule => UseCaseError::business_rule_violation(message),
        })
    }
}

impl From<TaskRepositoryError> for Interrupt {
    fn from(err: TaskRepositoryError) -> Self {
        match err {
            TaskRepositoryError::NotFound(id) => {
                Self::Rejected(UseCaseError::not_found("Task", id))
            }
            TaskRepositoryError::Validation(message) => {
                Self::Rejected(UseCaseError::validation(message))
            }
            TaskRepositoryError::BusinessRule(message) => {
                Self::Rejected(UseCaseError::business_rule_violation(message))
            }
            TaskRepositoryError::Persistence(source) => {
                Self::Fault(UseCaseFault::Repository(source))
            }
        }
    }
}

impl From<ProjectRepositoryError> for Interrupt {
    fn from(err: ProjectRepositoryError) -> Self {
        match err {
            ProjectRepositoryError::NotFound(id) => {
                Self::Rejected(UseCaseError::not_found("Project", id))
            }
            ProjectRepositoryError::InboxNotFound => Self::Rejected(
                UseCaseError::new(ErrorCode::NotFound, err.to_string())
                    .with_detail("entity", "Project"),
            ),
            ProjectRepositoryError::Validation(message) => {
                Self::Rejected(UseCaseError::validation(message))
            }
            ProjectRepositoryError::BusinessRule(message) => {
                Self::Rejected(UseCaseError::business_rule_violation(message))
            }
            ProjectRepositoryError::Persistence(source) => {
                Self::Fault(UseCaseFault::Repository(source))
            }
        }
    }
}

impl From<NotificationError> for Interrupt {
    fn from(err: NotificationError) -> Self {
        Self::Fault(UseCaseFault::notification(err))
    }
}

/// Converts an internal result into the public use-case result.
pub(crate) fn conclude<T>(result: Result<T, Interrupt>) -> UseCaseResult<T> {
    match result {
        Ok(value) => Ok(Outcome::Success(value)),
        Err(Interrupt::Rejected(err)) => {
            info!(code = %err.code(), message = err.message(), "use case rejected");
            Ok(Outcome::Failure(err))
        }
        Err(Interrupt::Fault(fault)) => {
            error!(%fault, "use case fault");
            Err(fault)
        }
    }
}

/// Re-saves task snapshots, continuing past individual failures.
///
/// Returns the number of snapshots that could not be written back.
pub(crate) async fn restore_tasks<R>(repository: &R, snapshots: &[Task]) -> usize
where
    R: TaskRepository + ?Sized,
{
    let mut failed = 0;
    for snapshot in snapshots {
        if let Err(err) = repository.save(snapshot).await {
            error!(task_id = %snapshot.id(), %err, "failed to restore task snapshot");
            failed += 1;
        }
    }
    failed
}

/// Re-saves a project snapshot; returns `false` if the write failed.
pub(crate) async fn restore_project<R>(repository: &R, snapshot: &Project) -> bool
where
    R: ProjectRepository + ?Sized,
{
    match repository.save(snapshot).await {
        Ok(()) => true,
        Err(err) => {
            error!(project_id = %snapshot.id(), %err, "failed to restore project snapshot");
            false
        }
    }
}

/// Saves `task`, writing `snapshot` back if the save is rejected.
pub(crate) async fn save_task_or_restore<R>(
    repository: &R,
    task: &Task,
    snapshot: &Task,
) -> Result<(), Interrupt>
where
    R: TaskRepository + ?Sized,
{
    let Err(err) = repository.save(task).await else {
        return Ok(());
    };
    let interrupt = Interrupt::from(err);
    if interrupt.is_compensable() {
        warn!(task_id = %task.id(), "task save rejected, restoring snapshot");
        restore_tasks(repository, std::slice::from_ref(snapshot)).await;
    }
    Err(interrupt)
}

/// Saves `project`, writing `snapshot` back if the save is rejected.
pub(crate) async fn save_project_or_restore<R>(
    repository: &R,
    project: &Project,
    snapshot: &Project,
) -> Result<(), Interrupt>
where
    R: ProjectRepository + ?Sized,
{
    let Err(err) = repository.save(project).await else {
        return Ok(());
    };
    let interrupt = Interrupt::from(err);
    if interrupt.is_compensable() {
        warn!(project_id = %project.id(), "project save rejected, restoring snapshot");
        restore_project(repository, snapshot).await;
    }
    Err(interrupt)
}
