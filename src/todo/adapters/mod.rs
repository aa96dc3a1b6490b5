//! Adapter implementations for todo ports.

pub mod configured;
pub mod memory;
pub mod tracing_notifier;

pub use configured::ConfiguredNotifier;
pub use tracing_notifier::TracingNotifier;
