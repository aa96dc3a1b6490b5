//! Shared fixtures for todo unit tests.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;
use rstest::fixture;

use crate::todo::{
    adapters::memory::{InMemoryProjectRepository, InMemoryTaskRepository, RecordingNotifier},
    domain::{
        Deadline, Description, Project, ProjectId, ProjectName, Task, TaskId, TaskTitle,
    },
    ports::{
        ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult, TaskRepository,
        TaskRepositoryError, TaskRepositoryResult,
    },
};

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<Utc>,
}

impl FixedClock {
    pub const fn at(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.now
    }
}

pub fn reference_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0)
        .single()
        .expect("valid reference instant")
}

#[fixture]
pub fn clock() -> FixedClock {
    FixedClock::at(reference_instant())
}

pub fn title(value: &str) -> TaskTitle {
    TaskTitle::new(value).expect("valid title")
}

pub fn description(value: &str) -> Description {
    Description::new(value).expect("valid description")
}

pub fn deadline_in(clock: &FixedClock, offset: TimeDelta) -> Deadline {
    Deadline::new(clock.now() + offset, clock).expect("future deadline")
}

pub fn regular_project(name: &str, clock: &FixedClock) -> Project {
    Project::new(
        ProjectName::new(name).expect("valid project name"),
        description(""),
        clock,
    )
}

/// Repositories, notifier and clock wired together for service tests.
pub struct Harness {
    pub tasks: Arc<InMemoryTaskRepository>,
    pub projects: Arc<InMemoryProjectRepository>,
    pub notifier: Arc<RecordingNotifier>,
    pub clock: Arc<FixedClock>,
}

impl Harness {
    pub async fn inbox_id(&self) -> ProjectId {
        self.projects
            .get_inbox()
            .await
            .expect("inbox is seeded")
            .id()
    }

    /// Stores a new regular project.
    pub async fn seed_project(&self, name: &str) -> ProjectId {
        let project = regular_project(name, &self.clock);
        self.projects
            .save(&project)
            .await
            .expect("project should save");
        project.id()
    }

    /// Stores a task registered with `project_id`, optionally due after
    /// `due_in`.
    pub async fn seed_task(
        &self,
        project_id: ProjectId,
        name: &str,
        due_in: Option<TimeDelta>,
    ) -> Task {
        let mut project = self
            .projects
            .get(project_id)
            .await
            .expect("project exists");
        let mut task = Task::new(title(name), description(""), project_id, &*self.clock);
        if let Some(offset) = due_in {
            task = task.with_deadline(deadline_in(&self.clock, offset));
        }
        project.add_task(&mut task).expect("project accepts tasks");
        self.tasks.save(&task).await.expect("task should save");
        self.projects
            .save(&project)
            .await
            .expect("project should save");
        task
    }

    pub async fn task(&self, task_id: TaskId) -> Task {
        self.tasks.get(task_id).await.expect("task exists")
    }

    pub async fn project(&self, project_id: ProjectId) -> Project {
        self.projects
            .get(project_id)
            .await
            .expect("project exists")
    }
}

#[fixture]
pub fn harness(clock: FixedClock) -> Harness {
    Harness {
        tasks: Arc::new(InMemoryTaskRepository::new()),
        projects: Arc::new(
            InMemoryProjectRepository::new(&clock).expect("inbox should be seeded"),
        ),
        notifier: Arc::new(RecordingNotifier::new()),
        clock: Arc::new(clock),
    }
}

/// Which writes [`FailingTaskRepository`] refuses.
#[derive(Debug, Clone, Copy)]
pub enum TaskFailure {
    /// Rejects saving the given task once it is `DONE`.
    RejectCompleted(TaskId),
    /// Rejects every save with a validation error.
    RejectAll,
    /// Fails every save with a storage fault.
    Fault,
    /// Rejects deleting the given task with a business-rule error.
    RejectDelete(TaskId),
}

/// Task repository that fails selected writes and delegates everything else.
pub struct FailingTaskRepository {
    pub inner: InMemoryTaskRepository,
    failure: TaskFailure,
}

impl FailingTaskRepository {
    pub const fn new(inner: InMemoryTaskRepository, failure: TaskFailure) -> Self {
        Self { inner, failure }
    }
}

#[async_trait]
impl TaskRepository for FailingTaskRepository {
    async fn get(&self, id: TaskId) -> TaskRepositoryResult<Task> {
        self.inner.get(id).await
    }

    async fn save(&self, task: &Task) -> TaskRepositoryResult<()> {
        match self.failure {
            TaskFailure::RejectCompleted(id) if id == task.id() && task.is_done() => Err(
                TaskRepositoryError::BusinessRule(format!("task {id} is locked by an audit")),
            ),
            TaskFailure::RejectAll => Err(TaskRepositoryError::Validation(
                "storage refused the task".to_owned(),
            )),
            TaskFailure::Fault => Err(TaskRepositoryError::persistence(
                std::io::Error::other("disk unavailable"),
            )),
            TaskFailure::RejectCompleted(_) | TaskFailure::RejectDelete(_) => {
                self.inner.save(task).await
            }
        }
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        match self.failure {
            TaskFailure::RejectDelete(refused) if refused == id => Err(
                TaskRepositoryError::BusinessRule(format!("task {id} is pinned")),
            ),
            _ => self.inner.delete(id).await,
        }
    }

    async fn find_by_project(&self, project_id: ProjectId) -> TaskRepositoryResult<Vec<Task>> {
        self.inner.find_by_project(project_id).await
    }

    async fn get_active_tasks(&self) -> TaskRepositoryResult<Vec<Task>> {
        self.inner.get_active_tasks().await
    }
}

/// Which calls [`FailingProjectRepository`] fails.
#[derive(Debug, Clone, Copy)]
pub enum ProjectFailure {
    /// Rejects saving any project that is completed.
    RejectCompleted,
    /// Rejects every save with a business-rule error.
    RejectAll,
    /// Fails every `get` with a storage fault.
    FaultOnGet,
}

/// Project repository that fails selected calls and delegates everything
/// else.
pub struct FailingProjectRepository {
    pub inner: InMemoryProjectRepository,
    failure: ProjectFailure,
}

impl FailingProjectRepository {
    pub const fn new(inner: InMemoryProjectRepository, failure: ProjectFailure) -> Self {
        Self { inner, failure }
    }
}

#[async_trait]
impl ProjectRepository for FailingProjectRepository {
    async fn get(&self, id: ProjectId) -> ProjectRepositoryResult<Project> {
        if matches!(self.failure, ProjectFailure::FaultOnGet) {
            return Err(ProjectRepositoryError::persistence(std::io::Error::other(
                "project store unreachable",
            )));
        }
        self.inner.get(id).await
    }

    async fn save(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let rejected = match self.failure {
            ProjectFailure::RejectCompleted => project.completed_at().is_some(),
            ProjectFailure::RejectAll => true,
            ProjectFailure::FaultOnGet => false,
        };
        if rejected {
            return Err(ProjectRepositoryError::BusinessRule(format!(
                "project {} is frozen",
                project.id()
            )));
        }
        self.inner.save(project).await
    }

    async fn delete(&self, id: ProjectId) -> ProjectRepositoryResult<()> {
        self.inner.delete(id).await
    }

    async fn get_inbox(&self) -> ProjectRepositoryResult<Project> {
        self.inner.get_inbox().await
    }

    async fn get_all(&self) -> ProjectRepositoryResult<Vec<Project>> {
        self.inner.get_all().await
    }
}
