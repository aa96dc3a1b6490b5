//! In-memory adapters for todo ports.

mod notification;
mod project;
mod task;

pub use notification::{NotificationEvent, RecordingNotifier};
pub use project::InMemoryProjectRepository;
pub use task::InMemoryTaskRepository;
