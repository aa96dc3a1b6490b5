//! Step definitions for project completion BDD scenarios.

pub mod given;
pub mod then;
