//! Task and project management core.
//!
//! Tasks move through `TODO`, `IN_PROGRESS` and `DONE`; projects group tasks
//! and can be completed as a whole, taking their unfinished tasks with them.
//! Every task belongs to exactly one project, with the INBOX project
//! collecting tasks created without one. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Use-case orchestrators in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
