//! Port contracts for task and project management.
//!
//! Use cases depend only on these traits, never on a concrete adapter.

pub mod notification;
pub mod project_repository;
pub mod task_repository;

pub use notification::{NotificationError, NotificationPort, NotificationResult};
pub use project_repository::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult};
pub use task_repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
