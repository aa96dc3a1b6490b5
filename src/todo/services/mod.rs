//! Use-case orchestrators for task and project management.
//!
//! Each use case exposes a single `execute` method returning
//! [`crate::outcome::UseCaseResult`]. Domain and repository rejections come
//! back as a failed [`crate::outcome::Outcome`]; storage and notifier faults
//! escape as [`crate::outcome::UseCaseFault`]. Notifications are only sent
//! once every write of an operation has succeeded.

mod application;
mod boundary;
mod deadline;
mod locks;
mod project;
mod responses;
mod task;

pub use application::{InMemoryTodoApplication, TodoApplication};
pub use deadline::CheckDeadlinesUseCase;
pub use locks::{AggregateGuard, AggregateLocks};
pub use project::{
    CompleteProjectRequest, CompleteProjectUseCase, CreateProjectRequest, CreateProjectUseCase,
    DeleteProjectUseCase, GetProjectUseCase, ListProjectsUseCase, UpdateProjectRequest,
    UpdateProjectUseCase,
};
pub use responses::{
    CompleteProjectResponse, DeadlineCheckResponse, DeletionOutcome, ProjectResponse,
    TaskResponse,
};
pub use task::{
    CompleteTaskRequest, CompleteTaskUseCase, CreateTaskRequest, CreateTaskUseCase,
    DeleteTaskUseCase, GetTaskUseCase, SetTaskPriorityRequest, SetTaskPriorityUseCase,
    StartTaskUseCase, UpdateTaskRequest, UpdateTaskUseCase,
};
