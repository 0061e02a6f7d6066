//! Last-seen copy of the source snapshot, kept for inspection.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::sync::domain::{TaskId, TaskRecord};

/// Id-keyed copy of the most recent source snapshot.
///
/// The cache reflects what the last completed cycle saw, not what the
/// destination accepted. It is never consulted for reconciliation.
/// Replacement swaps the whole map at once, so readers see either the
/// previous snapshot or the new one.
#[derive(Debug, Default)]
pub struct LocalCache {
    tasks: RwLock<Arc<HashMap<TaskId, TaskRecord>>>,
}

impl LocalCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites the cache with `records`, discarding prior contents.
    pub fn replace(&self, records: &[TaskRecord]) {
        let next: HashMap<TaskId, TaskRecord> = records
            .iter()
            .map(|record| (record.id().clone(), record.clone()))
            .collect();
        let mut tasks = self.tasks.write().unwrap_or_else(PoisonError::into_inner);
        *tasks = Arc::new(next);
    }

    /// Returns the cached record with `id`, if present.
    #[must_use]
    pub fn get(&self, id: &TaskId) -> Option<TaskRecord> {
        self.current().get(id).cloned()
    }

    /// Returns every cached record sorted by id.
    #[must_use]
    pub fn tasks(&self) -> Vec<TaskRecord> {
        let mut records: Vec<TaskRecord> = self.current().values().cloned().collect();
        records.sort_by(|left, right| left.id().cmp(right.id()));
        records
    }

    /// Returns the number of cached records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.current().len()
    }

    /// Returns whether the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.current().is_empty()
    }

    fn current(&self) -> Arc<HashMap<TaskId, TaskRecord>> {
        Arc::clone(&self.tasks.read().unwrap_or_else(PoisonError::into_inner))
    }
}
