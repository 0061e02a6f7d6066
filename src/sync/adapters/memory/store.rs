//! In-memory task store usable as both snapshot source and push sink.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::sync::{
    domain::{TaskId, TaskRecord},
    ports::{
        PushOutcome, PushSink, PushSinkError, PushSinkResult, SnapshotSource, SnapshotSourceError,
        SnapshotSourceResult,
    },
};

/// Thread-safe in-memory task store.
///
/// Fetching returns every record sorted by id. Pushing upserts each record
/// by id, so a destination store converges on the source after one cycle.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskStore {
    tasks: Arc<RwLock<HashMap<TaskId, TaskRecord>>>,
}

impl InMemoryTaskStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with `records`; later duplicates win.
    #[must_use]
    pub fn with_records(records: impl IntoIterator<Item = TaskRecord>) -> Self {
        let tasks = records
            .into_iter()
            .map(|record| (record.id().clone(), record))
            .collect();
        Self {
            tasks: Arc::new(RwLock::new(tasks)),
        }
    }

    /// Inserts or overwrites one record.
    ///
    /// # Errors
    ///
    /// Returns [`PushSinkError::Backend`] when the store lock is poisoned.
    pub fn upsert(&self, record: TaskRecord) -> PushSinkResult<()> {
        let mut tasks = self
            .tasks
            .write()
            .map_err(|err| PushSinkError::backend(std::io::Error::other(err.to_string())))?;
        tasks.insert(record.id().clone(), record);
        Ok(())
    }

    /// Replaces the whole contents of the store with `records`.
    ///
    /// # Errors
    ///
    /// Returns [`PushSinkError::Backend`] when the store lock is poisoned.
    pub fn replace_all(&self, records: impl IntoIterator<Item = TaskRecord>) -> PushSinkResult<()> {
        let replacement: HashMap<TaskId, TaskRecord> = records
            .into_iter()
            .map(|record| (record.id().clone(), record))
            .collect();
        let mut tasks = self
            .tasks
            .write()
            .map_err(|err| PushSinkError::backend(std::io::Error::other(err.to_string())))?;
        *tasks = replacement;
        Ok(())
    }

    /// Returns the record with `id`, if present.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotSourceError::Backend`] when the store lock is poisoned.
    pub fn get(&self, id: &TaskId) -> SnapshotSourceResult<Option<TaskRecord>> {
        let tasks = self.tasks.read().map_err(|err| {
            SnapshotSourceError::backend(std::io::Error::other(err.to_string()))
        })?;
        Ok(tasks.get(id).cloned())
    }

    /// Returns the number of stored records.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotSourceError::Backend`] when the store lock is poisoned.
    pub fn len(&self) -> SnapshotSourceResult<usize> {
        let tasks = self.tasks.read().map_err(|err| {
            SnapshotSourceError::backend(std::io::Error::other(err.to_string()))
        })?;
        Ok(tasks.len())
    }
}

#[async_trait]
impl SnapshotSource for InMemoryTaskStore {
    async fn fetch(&self) -> SnapshotSourceResult<Vec<TaskRecord>> {
        let tasks = self.tasks.read().map_err(|err| {
            SnapshotSourceError::backend(std::io::Error::other(err.to_string()))
        })?;
        let mut records: Vec<TaskRecord> = tasks.values().cloned().collect();
        records.sort_by(|left, right| left.id().cmp(right.id()));
        Ok(records)
    }
}

#[async_trait]
impl PushSink for InMemoryTaskStore {
    async fn push(&self, records: &[TaskRecord]) -> PushSinkResult<PushOutcome> {
        let mut tasks = self
            .tasks
            .write()
            .map_err(|err| PushSinkError::backend(std::io::Error::other(err.to_string())))?;
        for record in records {
            tasks.insert(record.id().clone(), record.clone());
        }
        Ok(PushOutcome::new(records.len(), 0))
    }
}
