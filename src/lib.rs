//! Todo core: use-case orchestration for task and project management.
//!
//! This crate provides the domain model, port contracts and use cases behind
//! a task manager: creating and completing tasks, grouping them into
//! projects, completing projects atomically and warning about approaching
//! deadlines.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Entities and value objects with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for storage and notifications
//! - **Adapters**: Concrete implementations of ports (in-memory, log-backed)
//! - **Services**: Use cases returning an [`outcome::Outcome`]
//!
//! # Modules
//!
//! - [`config`]: Environment-driven settings
//! - [`outcome`]: Success/failure values returned by every use case
//! - [`todo`]: Tasks, projects and their use cases
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use mockable::DefaultClock;
//! use todo_core::config::TodoConfig;
//! use todo_core::todo::services::{CreateTaskRequest, InMemoryTodoApplication};
//!
//! # tokio::runtime::Builder::new_current_thread()
//! #     .build()
//! #     .expect("runtime")
//! #     .block_on(async {
//! let app = InMemoryTodoApplication::in_memory(TodoConfig::default(), Arc::new(DefaultClock))
//!     .expect("INBOX is seeded");
//! let outcome = app
//!     .create_task()
//!     .execute(CreateTaskRequest::new("Write release notes", ""))
//!     .await
//!     .expect("no storage fault");
//! assert!(outcome.is_success());
//! # });
//! ```

pub mod config;
pub mod outcome;
pub mod todo;
