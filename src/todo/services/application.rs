//! Wiring facade that hands out use cases over shared collaborators.

use crate::config::TodoConfig;
use crate::todo::{
    adapters::{
        ConfiguredNotifier,
        memory::{InMemoryProjectRepository, InMemoryTaskRepository},
    },
    domain::TodoDomainError,
    ports::{NotificationPort, ProjectRepository, TaskRepository},
    services::{
        AggregateLocks, CheckDeadlinesUseCase, CompleteProjectUseCase, CompleteTaskUseCase,
        CreateProjectUseCase, CreateTaskUseCase, DeleteProjectUseCase, DeleteTaskUseCase,
        GetProjectUseCase, GetTaskUseCase, ListProjectsUseCase, SetTaskPriorityUseCase,
        StartTaskUseCase, UpdateProjectUseCase, UpdateTaskUseCase,
    },
};
use mockable::Clock;
use std::sync::Arc;

/// Shares repositories, notifier, clock and one lock registry across every
/// use case it builds.
pub struct TodoApplication<T, P, N, C>
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
    config: TodoConfig,
}

/// Application backed by the in-memory adapters.
pub type InMemoryTodoApplication<C> =
    TodoApplication<InMemoryTaskRepository, InMemoryProjectRepository, ConfiguredNotifier, C>;

impl<C> InMemoryTodoApplication<C>
where
    C: Clock + Send + Sync,
{
    /// Builds an application over fresh in-memory repositories with the
    /// notifier selected by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError`] if the INBOX project cannot be seeded.
    pub fn in_memory(config: TodoConfig, clock: Arc<C>) -> Result<Self, TodoDomainError> {
        let projects = InMemoryProjectRepository::new(&*clock)?;
        let notifier = Self::notifier_for(&config);
        Ok(Self::new(
            Arc::new(InMemoryTaskRepository::new()),
            Arc::new(projects),
            Arc::new(notifier),
            clock,
        )
        .with_config(config))
    }

    /// Returns the notifier `config` asks for.
    #[must_use]
    pub fn notifier_for(config: &TodoConfig) -> ConfiguredNotifier {
        ConfiguredNotifier::from_config(config)
    }
}

impl<T, P, N, C> TodoApplication<T, P, N, C>
where
    T: TaskRepository,
    P: ProjectRepository,
    N: NotificationPort,
    C: Clock + Send + Sync,
{
    /// Creates the facade with default configuration.
    #[must_use]
    pub fn new(tasks: Arc<T>, projects: Arc<P>, notifier: Arc<N>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            projects,
            notifier,
            clock,
            locks: Arc::new(AggregateLocks::new()),
            config: TodoConfig::default(),
        }
    }

    /// Replaces the configuration.
    #[must_use]
    pub fn with_config(mut self, config: TodoConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &TodoConfig {
        &self.config
    }

    /// Returns the task repository.
    #[must_use]
    pub const fn tasks(&self) -> &Arc<T> {
        &self.tasks
    }

    /// Returns the project repository.
    #[must_use]
    pub const fn projects(&self) -> &Arc<P> {
        &self.projects
    }

    /// Returns the notifier.
    #[must_use]
    pub const fn notifier(&self) -> &Arc<N> {
        &self.notifier
    }

    /// Returns the clock.
    #[must_use]
    pub const fn clock(&self) -> &Arc<C> {
        &self.clock
    }

    /// Returns the shared lock registry.
    #[must_use]
    pub const fn locks(&self) -> &Arc<AggregateLocks> {
        &self.locks
    }

    /// Builds [`CreateTaskUseCase`].
    #[must_use]
    pub fn create_task(&self) -> CreateTaskUseCase<T, P, C> {
        CreateTaskUseCase::new(
            Arc::clone(&self.tasks),
            Arc::clone(&self.projects),
            Arc::clone(&self.clock),
        )
        .with_locks(Arc::clone(&self.locks))
    }

    /// Builds [`StartTaskUseCase`].
    #[must_use]
    pub fn start_task(&self) -> StartTaskUseCase<T> {
        StartTaskUseCase::new(Arc::clone(&self.tasks)).with_locks(Arc::clone(&self.locks))
    }

    /// Builds [`CompleteTaskUseCase`].
    #[must_use]
    pub fn complete_task(&self) -> CompleteTaskUseCase<T, N, C> {
        CompleteTaskUseCase::new(
            Arc::clone(&self.tasks),
            Arc::clone(&self.notifier),
            Arc::clone(&self.clock),
        )
        .with_locks(Arc::clone(&self.locks))
    }

    /// Builds [`SetTaskPriorityUseCase`].
    #[must_use]
    pub fn set_task_priority(&self) -> SetTaskPriorityUseCase<T, N> {
        SetTaskPriorityUseCase::new(Arc::clone(&self.tasks), Arc::clone(&self.notifier))
            .with_locks(Arc::clone(&self.locks))
    }

    /// Builds [`GetTaskUseCase`].
    #[must_use]
    pub fn get_task(&self) -> GetTaskUseCase<T> {
        GetTaskUseCase::new(Arc::clone(&self.tasks))
    }

    /// Builds [`UpdateTaskUseCase`].
    #[must_use]
    pub fn update_task(&self) -> UpdateTaskUseCase<T, N, C> {
        UpdateTaskUseCase::new(
            Arc::clone(&self.tasks),
            Arc::clone(&self.notifier),
            Arc::clone(&self.clock),
        )
        .with_locks(Arc::clone(&self.locks))
    }

    /// Builds [`DeleteTaskUseCase`].
    #[must_use]
    pub fn delete_task(&self) -> DeleteTaskUseCase<T, P> {
        DeleteTaskUseCase::new(Arc::clone(&self.tasks), Arc::clone(&self.projects))
            .with_locks(Arc::clone(&self.locks))
    }

    /// Builds [`CreateProjectUseCase`].
    #[must_use]
    pub fn create_project(&self) -> CreateProjectUseCase<P, C> {
        CreateProjectUseCase::new(Arc::clone(&self.projects), Arc::clone(&self.clock))
    }

    /// Builds [`CompleteProjectUseCase`].
    #[must_use]
    pub fn complete_project(&self) -> CompleteProjectUseCase<T, P, N, C> {
        CompleteProjectUseCase::new(
            Arc::clone(&self.tasks),
            Arc::clone(&self.projects),
            Arc::clone(&self.notifier),
            Arc::clone(&self.clock),
        )
        .with_locks(Arc::clone(&self.locks))
    }

    /// Builds [`GetProjectUseCase`].
    #[must_use]
    pub fn get_project(&self) -> GetProjectUseCase<T, P> {
        GetProjectUseCase::new(Arc::clone(&self.tasks), Arc::clone(&self.projects))
    }

    /// Builds [`ListProjectsUseCase`].
    #[must_use]
    pub fn list_projects(&self) -> ListProjectsUseCase<T, P> {
        ListProjectsUseCase::new(Arc::clone(&self.tasks), Arc::clone(&self.projects))
    }

    /// Builds [`UpdateProjectUseCase`].
    #[must_use]
    pub fn update_project(&self) -> UpdateProjectUseCase<T, P> {
        UpdateProjectUseCase::new(Arc::clone(&self.tasks), Arc::clone(&self.projects))
            .with_locks(Arc::clone(&self.locks))
    }

    /// Builds [`DeleteProjectUseCase`].
    #[must_use]
    pub fn delete_project(&self) -> DeleteProjectUseCase<T, P> {
        DeleteProjectUseCase::new(Arc::clone(&self.tasks), Arc::clone(&self.projects))
            .with_locks(Arc::clone(&self.locks))
    }

    /// Builds [`CheckDeadlinesUseCase`] with the configured warning window.
    #[must_use]
    pub fn check_deadlines(&self) -> CheckDeadlinesUseCase<T, N, C> {
        CheckDeadlinesUseCase::new(
            Arc::clone(&self.tasks),
            Arc::clone(&self.notifier),
            Arc::clone(&self.clock),
        )
        .with_threshold(self.config.deadline_warning_threshold())
    }
}
