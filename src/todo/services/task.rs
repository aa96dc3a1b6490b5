//! Task use cases: creation, lifecycle transitions, edits, and deletion.

use crate::outcome::UseCaseResult;
use crate::todo::{
    domain::{
        CompletionNotes, Deadline, Description, Priority, PriorityCalculator, ProjectId, Task,
        TaskId, TaskTitle,
    },
    ports::{NotificationPort, ProjectRepository, ProjectRepositoryError, TaskRepository},
    services::{
        AggregateGuard, AggregateLocks, DeletionOutcome, TaskResponse,
        boundary::{Interrupt, conclude, restore_tasks, save_task_or_restore},
    },
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use tracing::{instrument, warn};

/// Loads a task and locks the project that owns it.
///
/// The task is read again once the lock is held so the caller mutates the
/// latest stored state.
async fn lock_task<T>(
    tasks: &T,
    locks: &AggregateLocks,
    task_id: TaskId,
) -> Result<(AggregateGuard, Task), Interrupt>
where
    T: TaskRepository + ?Sized,
{
    let owner = tasks.get(task_id).await?.project_id();
    let guard = locks.lock(owner).await;
    let task = tasks.get(task_id).await?;
    Ok((guard, task))
}

// ── Create ──────────────────────────────────────────────────────────

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: String,
    project_id: Option<ProjectId>,
    due_at: Option<DateTime<Utc>>,
    priority: Option<Priority>,
}

impl CreateTaskRequest {
    /// Creates a request for a task in the INBOX project.
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            project_id: None,
            due_at: None,
            priority: None,
        }
    }

    /// Targets an explicit project instead of the INBOX.
    #[must_use]
    pub const fn with_project(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(project_id);
        self
    }

    /// Sets the due instant.
    #[must_use]
    pub const fn with_due_at(mut self, due_at: DateTime<Utc>) -> Self {
        self.due_at = Some(due_at);
        self
    }

    /// Sets an explicit priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }
}

/// Creates a `TODO` task and registers it with its owning project.
#[derive(Clone)]
pub struct CreateTaskUseCase<T, P, C>
where
    T: TaskRepository,
    P: ProjectRepository,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    projects: Arc<P>,
    clock: Arc<C>,
    locks: Arc<AggregateLocks>,
}

impl<T, P, C> CreateTaskUseCase<T, P, C>
where
    T: TaskRepository,
    P: ProjectRepository,
    C: Clock + Send + Sync,
{
    /// Creates the use case with a private lock registry.
    #[must_use]
    pub fn new(tasks: Arc<T>, projects: Arc<P>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            projects,
            clock,
            locks: Arc::default(),
        }
    }

    /// Shares a lock registry with other use cases.
    #[must_use]
    pub fn with_locks(mut self, locks: Arc<AggregateLocks>) -> Self {
        self.locks = locks;
        self
    }

    /// Creates the task.
    ///
    /// Without an explicit project the task lands in the INBOX. Without an
    /// explicit priority it is derived from the deadline, defaulting to
    /// `MEDIUM`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::outcome::UseCaseFault`] only for unmapped storage
    /// failures; rejections are reported through the outcome.
    #[instrument(skip_all, fields(project_id = ?request.project_id))]
    pub async fn execute(&self, request: CreateTaskRequest) -> UseCaseResult<TaskResponse> {
        conclude(self.run(request).await)
    }

    async fn run(&self, request: CreateTaskRequest) -> Result<TaskResponse, Interrupt> {
        let CreateTaskRequest {
            title: raw_title,
            description: raw_description,
            project_id,
            due_at,
            priority,
        } = request;

        let title = TaskTitle::new(raw_title)?;
        let description = Description::new(raw_description)?;
        let deadline = due_at
            .map(|due| Deadline::new(due, &*self.clock))
            .transpose()?;

        let target = match project_id {
            Some(id) => id,
            None => self.projects.get_inbox().await?.id(),
        };
        let _guard = self.locks.lock(target).await;
        let mut project = self.projects.get(target).await?;

        let mut task = Task::new(title, description, project.id(), &*self.clock);
        if let Some(due) = deadline {
            task = task.with_deadline(due);
        }
        let initial_priority =
            priority.unwrap_or_else(|| PriorityCalculator::calculate(&task, &*self.clock));
        task.set_priority(initial_priority);
        project.add_task(&mut task)?;

        self.tasks.save(&task).await?;
        if let Err(err) = self.projects.save(&project).await {
            let interrupt = Interrupt::from(err);
            if interrupt.is_compensable() {
                warn!(task_id = %task.id(), "project save rejected, removing new task");
                if let Err(delete_err) = self.tasks.delete(task.id()).await {
                    warn!(task_id = %task.id(), %delete_err, "failed to remove new task");
                }
            }
            return Err(interrupt);
        }
        Ok(TaskResponse::from(&task))
    }
}

// ── Complete ────────────────────────────────────────────────────────

/// Request payload for completing a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompleteTaskRequest {
    task_id: TaskId,
    completion_notes: Option<String>,
}

impl CompleteTaskRequest {
    /// Creates a request without completion notes.
    #[must_use]
    pub const fn new(task_id: TaskId) -> Self {
        Self {
            task_id,
            completion_notes: None,
        }
    }

    /// Sets completion notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.completion_notes = Some(notes.into());
        self
    }
}

/// Completes a single task, restoring its prior state if the save is
/// rejected.
#[derive(Clone)]
pub struct CompleteTaskUseCase<T, N, C>
where
    T: TaskRepository,
    N: NotificationPort,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    notifier: Arc<N>,
    clock: Arc<C>,
    locks: Arc<AggregateLocks>,
}

impl<T, N, C> CompleteTaskUseCase<T, N, C>
where
    T: TaskRepository,
    N: NotificationPort,
    C: Clock + Send + Sync,
{
    /// Creates the use case with a private lock registry.
    #[must_use]
    pub fn new(tasks: Arc<T>, notifier: Arc<N>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            notifier,
            clock,
            locks: Arc::default(),
        }
    }

    /// Shares a lock registry with other use cases.
    #[must_use]
    pub fn with_locks(mut self, locks: Arc<AggregateLocks>) -> Self {
        self.locks = locks;
        self
    }

    /// Completes the task and, once persisted, announces it.
    ///
    /// # Errors
    ///
    /// Returns [`crate::outcome::UseCaseFault`] for unmapped storage or
    /// notification failures.
    #[instrument(skip_all, fields(task_id = %request.task_id))]
    pub async fn execute(&self, request: CompleteTaskRequest) -> UseCaseResult<TaskResponse> {
        conclude(self.run(request).await)
    }

    async fn run(&self, request: CompleteTaskRequest) -> Result<TaskResponse, Interrupt> {
        let notes = CompletionNotes::parse_optional(request.completion_notes)?;
        let (_guard, mut task) = lock_task(&*self.tasks, &self.locks, request.task_id).await?;

        let snapshot = task.clone();
        task.complete(notes, &*self.clock)?;
        save_task_or_restore(&*self.tasks, &task, &snapshot).await?;

        self.notifier.notify_task_completed(&task).await?;
        Ok(TaskResponse::from(&task))
    }
}

// ── Start ───────────────────────────────────────────────────────────

/// Moves a `TODO` task to `IN_PROGRESS`.
#[derive(Clone)]
pub struct StartTaskUseCase<T>
where
    T: TaskRepository,
{
    tasks: Arc<T>,
    locks: Arc<AggregateLocks>,
}

impl<T> StartTaskUseCase<T>
where
    T: TaskRepository,
{
    /// Creates the use case with a private lock registry.
    #[must_use]
    pub fn new(tasks: Arc<T>) -> Self {
        Self {
            tasks,
            locks: Arc::default(),
        }
    }

    /// Shares a lock registry with other use cases.
    #[must_use]
    pub fn with_locks(mut self, locks: Arc<AggregateLocks>) -> Self {
        self.locks = locks;
        self
    }

    /// Starts the task.
    ///
    /// # Errors
    ///
    /// Returns [`crate::outcome::UseCaseFault`] for unmapped storage failures.
    #[instrument(skip_all, fields(%task_id))]
    pub async fn execute(&self, task_id: TaskId) -> UseCaseResult<TaskResponse> {
        conclude(self.run(task_id).await)
    }

    async fn run(&self, task_id: TaskId) -> Result<TaskResponse, Interrupt> {
        let (_guard, mut task) = lock_task(&*self.tasks, &self.locks, task_id).await?;
        let snapshot = task.clone();
        task.start()?;
        save_task_or_restore(&*self.tasks, &task, &snapshot).await?;
        Ok(TaskResponse::from(&task))
    }
}

// ── Set priority ────────────────────────────────────────────────────

/// Request payload for changing a task's priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetTaskPriorityRequest {
    task_id: TaskId,
    priority: Priority,
}

impl SetTaskPriorityRequest {
    /// Creates the request.
    #[must_use]
    pub const fn new(task_id: TaskId, priority: Priority) -> Self {
        Self { task_id, priority }
    }
}

/// Sets a task's priority and announces `HIGH` priority once persisted.
#[derive(Clone)]
pub struct SetTaskPriorityUseCase<T, N>
where
    T: TaskRepository,
    N: NotificationPort,
{
    tasks: Arc<T>,
    notifier: Arc<N>,
    locks: Arc<AggregateLocks>,
}

impl<T, N> SetTaskPriorityUseCase<T, N>
where
    T: TaskRepository,
    N: NotificationPort,
{
    /// Creates the use case with a private lock registry.
    #[must_use]
    pub fn new(tasks: Arc<T>, notifier: Arc<N>) -> Self {
        Self {
            tasks,
            notifier,
            locks: Arc::default(),
        }
    }

    /// Shares a lock registry with other use cases.
    #[must_use]
    pub fn with_locks(mut self, locks: Arc<AggregateLocks>) -> Self {
        self.locks = locks;
        self
    }

    /// Applies the new priority.
    ///
    /// # Errors
    ///
    /// Returns [`crate::outcome::UseCaseFault`] for unmapped storage or
    /// notification failures.
    #[instrument(skip_all, fields(task_id = %request.task_id, priority = %request.priority))]
    pub async fn execute(&self, request: SetTaskPriorityRequest) -> UseCaseResult<TaskResponse> {
        conclude(self.run(request).await)
    }

    async fn run(&self, request: SetTaskPriorityRequest) -> Result<TaskResponse, Interrupt> {
        let (_guard, mut task) = lock_task(&*self.tasks, &self.locks, request.task_id).await?;
        let snapshot = task.clone();
        task.set_priority(request.priority);
        save_task_or_restore(&*self.tasks, &task, &snapshot).await?;

        if task.priority() == Priority::High {
            self.notifier.notify_task_high_priority(&task).await?;
        }
        Ok(TaskResponse::from(&task))
    }
}

// ── Get ─────────────────────────────────────────────────────────────

/// Loads a single task.
#[derive(Clone)]
pub struct GetTaskUseCase<T>
where
    T: TaskRepository,
{
    tasks: Arc<T>,
}

impl<T> GetTaskUseCase<T>
where
    T: TaskRepository,
{
    /// Creates the use case.
    #[must_use]
    pub const fn new(tasks: Arc<T>) -> Self {
        Self { tasks }
    }

    /// Returns the task or `NOT_FOUND`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::outcome::UseCaseFault`] for unmapped storage failures.
    #[instrument(skip_all, fields(%task_id))]
    pub async fn execute(&self, task_id: TaskId) -> UseCaseResult<TaskResponse> {
        let result = self.tasks.get(task_id).await;
        conclude(
            result
                .map(|task| TaskResponse::from(&task))
                .map_err(Interrupt::from),
        )
    }
}

// ── Update ──────────────────────────────────────────────────────────

/// Request payload for editing a task. Absent fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    task_id: TaskId,
    title: Option<String>,
    description: Option<String>,
    priority: Option<Priority>,
    due_at: Option<Option<DateTime<Utc>>>,
}

impl UpdateTaskRequest {
    /// Creates a request that changes nothing yet.
    #[must_use]
    pub const fn new(task_id: TaskId) -> Self {
        Self {
            task_id,
            title: None,
            description: None,
            priority: None,
            due_at: None,
        }
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Replaces the due instant.
    #[must_use]
    pub const fn with_due_at(mut self, due_at: DateTime<Utc>) -> Self {
        self.due_at = Some(Some(due_at));
        self
    }

    /// Removes the deadline.
    #[must_use]
    pub const fn clear_deadline(mut self) -> Self {
        self.due_at = Some(None);
        self
    }
}

/// Edits a task's details, restoring its prior state if the save is
/// rejected.
#[derive(Clone)]
pub struct UpdateTaskUseCase<T, N, C>
where
    T: TaskRepository,
    N: NotificationPort,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    notifier: Arc<N>,
    clock: Arc<C>,
    locks: Arc<AggregateLocks>,
}

impl<T, N, C> UpdateTaskUseCase<T, N, C>
where
    T: TaskRepository,
    N: NotificationPort,
    C: Clock + Send + Sync,
{
    /// Creates the use case with a private lock registry.
    #[must_use]
    pub fn new(tasks: Arc<T>, notifier: Arc<N>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            notifier,
            clock,
            locks: Arc::default(),
        }
    }

    /// Shares a lock registry with other use cases.
    #[must_use]
    pub fn with_locks(mut self, locks: Arc<AggregateLocks>) -> Self {
        self.locks = locks;
        self
    }

    /// Applies the edits.
    ///
    /// # Errors
    ///
    /// Returns [`crate::outcome::UseCaseFault`] for unmapped storage or
    /// notification failures.
    #[instrument(skip_all, fields(task_id = %request.task_id))]
    pub async fn execute(&self, request: UpdateTaskRequest) -> UseCaseResult<TaskResponse> {
        conclude(self.run(request).await)
    }

    async fn run(&self, request: UpdateTaskRequest) -> Result<TaskResponse, Interrupt> {
        let UpdateTaskRequest {
            task_id,
            title: raw_title,
            description: raw_description,
            priority,
            due_at,
        } = request;

        let title = raw_title.map(TaskTitle::new).transpose()?;
        let description = raw_description.map(Description::new).transpose()?;
        let deadline = due_at
            .map(|due| due.map(|at| Deadline::new(at, &*self.clock)).transpose())
            .transpose()?;

        let (_guard, mut task) = lock_task(&*self.tasks, &self.locks, task_id).await?;
        let snapshot = task.clone();
        task.update_details(title, description);
        if let Some(new_priority) = priority {
            task.set_priority(new_priority);
        }
        if let Some(new_deadline) = deadline {
            task.set_deadline(new_deadline);
        }
        save_task_or_restore(&*self.tasks, &task, &snapshot).await?;

        if priority == Some(Priority::High) {
            self.notifier.notify_task_high_priority(&task).await?;
        }
        Ok(TaskResponse::from(&task))
    }
}

// ── Delete ──────────────────────────────────────────────────────────

/// Deletes a task and deregisters it from its project.
#[derive(Clone)]
pub struct DeleteTaskUseCase<T, P>
where
    T: TaskRepository,
    P: ProjectRepository,
{
    tasks: Arc<T>,
    projects: Arc<P>,
    locks: Arc<AggregateLocks>,
}

impl<T, P> DeleteTaskUseCase<T, P>
where
    T: TaskRepository,
    P: ProjectRepository,
{
    /// Creates the use case with a private lock registry.
    #[must_use]
    pub fn new(tasks: Arc<T>, projects: Arc<P>) -> Self {
        Self {
            tasks,
            projects,
            locks: Arc::default(),
        }
    }

    /// Shares a lock registry with other use cases.
    #[must_use]
    pub fn with_locks(mut self, locks: Arc<AggregateLocks>) -> Self {
        self.locks = locks;
        self
    }

    /// Deletes the task, or reports `NOT_FOUND` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`crate::outcome::UseCaseFault`] for unmapped storage failures.
    #[instrument(skip_all, fields(%task_id))]
    pub async fn execute(&self, task_id: TaskId) -> UseCaseResult<DeletionOutcome> {
        conclude(self.run(task_id).await)
    }

    async fn run(&self, task_id: TaskId) -> Result<DeletionOutcome, Interrupt> {
        let (_guard, task) = lock_task(&*self.tasks, &self.locks, task_id).await?;
        self.tasks.delete(task_id).await?;

        if let Err(interrupt) = self.deregister(&task).await {
            if interrupt.is_compensable() {
                warn!(%task_id, "project update rejected, restoring deleted task");
                restore_tasks(&*self.tasks, std::slice::from_ref(&task)).await;
            }
            return Err(interrupt);
        }

        Ok(DeletionOutcome {
            entity_id: task_id.into_inner(),
        })
    }

    /// Drops `task` from its project. A project that is already gone has
    /// nothing to deregister.
    async fn deregister(&self, task: &Task) -> Result<(), Interrupt> {
        let mut project = match self.projects.get(task.project_id()).await {
            Ok(project) => project,
            Err(ProjectRepositoryError::NotFound(_)) => return Ok(()),
            Err(err) => return Err(err.into()),
        };
        if project.remove_task(task.id()) {
            self.projects.save(&project).await?;
        }
        Ok(())
    }
}
