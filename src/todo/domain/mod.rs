//! Domain model for task and project management.
//!
//! Entities enforce their own state machines and report rejections as
//! [`TodoDomainError`]. Time-dependent behaviour takes an explicit clock so
//! that no entity reads the system time on its own.

mod deadline;
mod error;
mod ids;
mod priority;
mod project;
mod status;
mod task;
mod text;

pub use deadline::{ApproachingDeadline, Deadline, DeadlineScanner, default_warning_threshold};
pub use error::{DomainErrorKind, ParseDomainValueError, TodoDomainError};
pub use ids::{ProjectId, TaskId};
pub use priority::{Priority, PriorityCalculator};
pub use project::{INBOX_NAME, PersistedProjectData, Project};
pub use status::{ProjectStatus, ProjectType, TaskStatus};
pub use task::{PersistedTaskData, Task};
pub use text::{CompletionNotes, Description, ProjectName, TaskTitle};
