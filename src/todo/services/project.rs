//! Project use cases, including all-or-nothing project completion.

use crate::outcome::UseCaseResult;
use crate::todo::{
    domain::{CompletionNotes, Description, Project, ProjectId, ProjectName, Task},
    ports::{NotificationPort, ProjectRepository, TaskRepository},
    services::{
        AggregateLocks, CompleteProjectResponse, DeletionOutcome, ProjectResponse,
        boundary::{
            Interrupt, conclude, restore_project, restore_tasks, save_project_or_restore,
        },
    },
};
use mockable::Clock;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

// ── Create ──────────────────────────────────────────────────────────

/// Request payload for creating a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProjectRequest {
    name: String,
    description: String,
}

impl CreateProjectRequest {
    /// Creates the request.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Creates an active `REGULAR` project.
#[derive(Clone)]
pub struct CreateProjectUseCase<P, C>
where
    P: ProjectRepository,
    C: Clock + Send + Sync,
{
    projects: Arc<P>,
    clock: Arc<C>,
}

impl<P, C> CreateProjectUseCase<P, C>
where
    P: ProjectRepository,
    C: Clock + Send + Sync,
{
    /// Creates the use case.
    #[must_use]
    pub const fn new(projects: Arc<P>, clock: Arc<C>) -> Self {
        Self { projects, clock }
    }

    /// Creates and persists the project. Names need not be unique.
    ///
    /// # Errors
    ///
    /// Returns [`crate::outcome::UseCaseFault`] for unmapped storage failures.
    #[instrument(skip_all)]
    pub async fn execute(&self, request: CreateProjectRequest) -> UseCaseResult<ProjectResponse> {
        conclude(self.run(request).await)
    }

    async fn run(&self, request: CreateProjectRequest) -> Result<ProjectResponse, Interrupt> {
        let name = ProjectName::new(request.name)?;
        let description = Description::new(request.description)?;
        let project = Project::new(name, description, &*self.clock);
        self.projects.save(&project).await?;
        debug!(project_id = %project.id(), "project created");
        Ok(ProjectResponse::new(&project, &[]))
    }
}

// ── Complete ────────────────────────────────────────────────────────

/// Request payload for completing a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompleteProjectRequest {
    project_id: ProjectId,
    completion_notes: Option<String>,
}

impl CompleteProjectRequest {
    /// Creates a request without completion notes.
    #[must_use]
    pub const fn new(project_id: ProjectId) -> Self {
        Self {
            project_id,
            completion_notes: None,
        }
    }

    /// Sets completion notes, applied to the project and each task it
    /// completes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.completion_notes = Some(notes.into());
        self
    }
}

/// Completes a project together with every incomplete task it owns.
///
/// Either the project and all of its formerly incomplete tasks end up
/// completed, or every snapshot taken before the first write is saved back
/// and the failure is reported. Compensation is best-effort: a failure while
/// restoring is logged and the remaining snapshots are still written.
#[derive(Clone)]
pub struct CompleteProjectUseCase<T, P, N, C>
where
    T: TaskRepository,
    P: ProjectRepository,
    N: NotificationPort,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    projects: Arc<P>,
    notifier: Arc<N>,
    clock: Arc<C>,
    locks: Arc<AggregateLocks>,
}

impl<T, P, N, C> CompleteProjectUseCase<T, P, N, C>
where
    T: TaskRepository,
    P: ProjectRepository,
    N: NotificationPort,
    C: Clock + Send + Sync,
{
    /// Creates the use case with a private lock registry.
    #[must_use]
    pub fn new(tasks: Arc<T>, projects: Arc<P>, notifier: Arc<N>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            projects,
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

    /// Completes the project.
    ///
    /// # Errors
    ///
    /// Returns [`crate::outcome::UseCaseFault`] for unmapped storage or
    /// notification failures. Storage faults are not compensated.
    #[instrument(skip_all, fields(project_id = %request.project_id))]
    pub async fn execute(
        &self,
        request: CompleteProjectRequest,
    ) -> UseCaseResult<CompleteProjectResponse> {
        conclude(self.run(request).await)
    }

    async fn run(
        &self,
        request: CompleteProjectRequest,
    ) -> Result<CompleteProjectResponse, Interrupt> {
        let notes = CompletionNotes::parse_optional(request.completion_notes)?;
        let _guard = self.locks.lock(request.project_id).await;

        let mut project = self.projects.get(request.project_id).await?;
        let owned = self.tasks.find_by_project(project.id()).await?;
        let task_snapshots: Vec<Task> = project
            .incomplete_tasks(&owned)
            .into_iter()
            .cloned()
            .collect();
        let project_snapshot = project.clone();

        let completed = match self.apply(&mut project, &task_snapshots, notes).await {
            Ok(completed) => completed,
            Err(interrupt) => {
                if interrupt.is_compensable() {
                    self.compensate(&project_snapshot, &task_snapshots).await;
                }
                return Err(interrupt);
            }
        };

        for task in &task_snapshots {
            self.notifier.notify_task_completed(task).await?;
        }

        Ok(CompleteProjectResponse {
            id: project.id(),
            status: project.status(),
            completed_at: project.completed_at(),
            completion_notes: project
                .completion_notes()
                .map(|value| value.as_str().to_owned()),
            task_count: project.task_ids().len(),
            completed_task_ids: completed.iter().map(Task::id).collect(),
        })
    }

    /// Completes and saves each snapshot's task, then the project.
    async fn apply(
        &self,
        project: &mut Project,
        task_snapshots: &[Task],
        notes: Option<CompletionNotes>,
    ) -> Result<Vec<Task>, Interrupt> {
        let mut completed = Vec::with_capacity(task_snapshots.len());
        for snapshot in task_snapshots {
            let mut task = snapshot.clone();
            task.complete(notes.clone(), &*self.clock)?;
            self.tasks.save(&task).await?;
            completed.push(task);
        }

        project.mark_completed(notes, &*self.clock)?;
        self.projects.save(project).await?;
        Ok(completed)
    }

    async fn compensate(&self, project_snapshot: &Project, task_snapshots: &[Task]) {
        warn!(
            project_id = %project_snapshot.id(),
            tasks = task_snapshots.len(),
            "project completion rejected, restoring snapshots"
        );
        let failed_tasks = restore_tasks(&*self.tasks, task_snapshots).await;
        let project_restored = restore_project(&*self.projects, project_snapshot).await;
        if failed_tasks > 0 || !project_restored {
            warn!(
                project_id = %project_snapshot.id(),
                failed_tasks,
                project_restored,
                "project completion only partially restored"
            );
        }
    }
}

// ── Get / list ──────────────────────────────────────────────────────

/// Loads a single project with its tasks.
#[derive(Clone)]
pub struct GetProjectUseCase<T, P>
where
    T: TaskRepository,
    P: ProjectRepository,
{
    tasks: Arc<T>,
    projects: Arc<P>,
}

impl<T, P> GetProjectUseCase<T, P>
where
    T: TaskRepository,
    P: ProjectRepository,
{
    /// Creates the use case.
    #[must_use]
    pub const fn new(tasks: Arc<T>, projects: Arc<P>) -> Self {
        Self { tasks, projects }
    }

    /// Returns the project or `NOT_FOUND`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::outcome::UseCaseFault`] for unmapped storage failures.
    #[instrument(skip_all, fields(%project_id))]
    pub async fn execute(&self, project_id: ProjectId) -> UseCaseResult<ProjectResponse> {
        conclude(self.run(project_id).await)
    }

    async fn run(&self, project_id: ProjectId) -> Result<ProjectResponse, Interrupt> {
        let project = self.projects.get(project_id).await?;
        let tasks = self.tasks.find_by_project(project_id).await?;
        Ok(ProjectResponse::new(&project, &tasks))
    }
}

/// Lists every project, INBOX first.
#[derive(Clone)]
pub struct ListProjectsUseCase<T, P>
where
    T: TaskRepository,
    P: ProjectRepository,
{
    tasks: Arc<T>,
    projects: Arc<P>,
}

impl<T, P> ListProjectsUseCase<T, P>
where
    T: TaskRepository,
    P: ProjectRepository,
{
    /// Creates the use case.
    #[must_use]
    pub const fn new(tasks: Arc<T>, projects: Arc<P>) -> Self {
        Self { tasks, projects }
    }

    /// Returns all projects with their tasks.
    ///
    /// # Errors
    ///
    /// Returns [`crate::outcome::UseCaseFault`] for unmapped storage failures.
    #[instrument(skip_all)]
    pub async fn execute(&self) -> UseCaseResult<Vec<ProjectResponse>> {
        conclude(self.run().await)
    }

    async fn run(&self) -> Result<Vec<ProjectResponse>, Interrupt> {
        let projects = self.projects.get_all().await?;
        let mut responses = Vec::with_capacity(projects.len());
        for project in &projects {
            let tasks = self.tasks.find_by_project(project.id()).await?;
            responses.push(ProjectResponse::new(project, &tasks));
        }
        Ok(responses)
    }
}

// ── Update ──────────────────────────────────────────────────────────

/// Request payload for editing a project. Absent fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateProjectRequest {
    project_id: ProjectId,
    name: Option<String>,
    description: Option<String>,
}

impl UpdateProjectRequest {
    /// Creates a request that changes nothing yet.
    #[must_use]
    pub const fn new(project_id: ProjectId) -> Self {
        Self {
            project_id,
            name: None,
            description: None,
        }
    }

    /// Renames the project.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Renames or re-describes a project. The INBOX cannot be edited.
#[derive(Clone)]
pub struct UpdateProjectUseCase<T, P>
where
    T: TaskRepository,
    P: ProjectRepository,
{
    tasks: Arc<T>,
    projects: Arc<P>,
    locks: Arc<AggregateLocks>,
}

impl<T, P> UpdateProjectUseCase<T, P>
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

    /// Applies the edits.
    ///
    /// # Errors
    ///
    /// Returns [`crate::outcome::UseCaseFault`] for unmapped storage failures.
    #[instrument(skip_all, fields(project_id = %request.project_id))]
    pub async fn execute(&self, request: UpdateProjectRequest) -> UseCaseResult<ProjectResponse> {
        conclude(self.run(request).await)
    }

    async fn run(&self, request: UpdateProjectRequest) -> Result<ProjectResponse, Interrupt> {
        let name = request.name.map(ProjectName::new).transpose()?;
        let description = request.description.map(Description::new).transpose()?;

        let _guard = self.locks.lock(request.project_id).await;
        let mut project = self.projects.get(request.project_id).await?;
        let snapshot = project.clone();
        project.update_details(name, description)?;
        save_project_or_restore(&*self.projects, &project, &snapshot).await?;

        let tasks = self.tasks.find_by_project(project.id()).await?;
        Ok(ProjectResponse::new(&project, &tasks))
    }
}

// ── Delete ──────────────────────────────────────────────────────────

/// Deletes a project together with the tasks it owns. The INBOX cannot be
/// deleted.
#[derive(Clone)]
pub struct DeleteProjectUseCase<T, P>
where
    T: TaskRepository,
    P: ProjectRepository,
{
    tasks: Arc<T>,
    projects: Arc<P>,
    locks: Arc<AggregateLocks>,
}

impl<T, P> DeleteProjectUseCase<T, P>
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

    /// Deletes the project and its tasks.
    ///
    /// # Errors
    ///
    /// Returns [`crate::outcome::UseCaseFault`] for unmapped storage failures.
    #[instrument(skip_all, fields(%project_id))]
    pub async fn execute(&self, project_id: ProjectId) -> UseCaseResult<DeletionOutcome> {
        conclude(self.run(project_id).await)
    }

    async fn run(&self, project_id: ProjectId) -> Result<DeletionOutcome, Interrupt> {
        let _guard = self.locks.lock(project_id).await;
        let project = self.projects.get(project_id).await?;
        project.ensure_deletable()?;

        let owned = self.tasks.find_by_project(project_id).await?;
        if let Err(interrupt) = self.delete_all(project_id, &owned).await {
            if interrupt.is_compensable() {
                warn!(%project_id, "project delete rejected, restoring its tasks");
                restore_tasks(&*self.tasks, &owned).await;
            }
            return Err(interrupt);
        }

        debug!(%project_id, tasks = owned.len(), "project deleted");
        Ok(DeletionOutcome {
            entity_id: project_id.into_inner(),
        })
    }

    async fn delete_all(&self, project_id: ProjectId, owned: &[Task]) -> Result<(), Interrupt> {
        for task in owned {
            self.tasks.delete(task.id()).await?;
        }
        self.projects.delete(project_id).await?;
        Ok(())
    }
}
