//! Per-project mutual exclusion for use-case critical sections.
//!
//! The snapshot-and-compensate pattern is only sound while no other caller
//! mutates the same aggregates. Every mutating use case therefore holds the
//! lock of the project owning the aggregates it touches, and takes exactly
//! one such lock per invocation so lock ordering cannot deadlock.

use crate::todo::domain::ProjectId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Registry of per-project async locks.
#[derive(Debug, Default)]
pub struct AggregateLocks {
    entries: Mutex<HashMap<ProjectId, Arc<AsyncMutex<()>>>>,
}

/// Held while a use case owns a project's aggregates.
#[derive(Debug)]
#[must_use = "the project is unlocked as soon as the guard is dropped"]
pub struct AggregateGuard {
    project_id: ProjectId,
    _guard: OwnedMutexGuard<()>,
}

impl AggregateGuard {
    /// Returns the locked project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }
}

impl AggregateLocks {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for exclusive access to `project_id`.
    pub async fn lock(&self, project_id: ProjectId) -> AggregateGuard {
        let mutex = {
            let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
            // Entries referenced only by the map are idle.
            entries.retain(|_, entry| Arc::strong_count(entry) > 1);
            Arc::clone(entries.entry(project_id).or_default())
        };
        AggregateGuard {
            project_id,
            _guard: mutex.lock_owned().await,
        }
    }

    /// Returns the number of projects with a live lock entry.
    #[must_use]
    pub fn tracked(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .filter(|entry| Arc::strong_count(entry) > 1)
            .count()
    }
}
