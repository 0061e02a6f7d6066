//! Point-in-time task snapshots.

use super::{TaskDomainError, TaskId, TaskRecord};
use std::collections::HashSet;

/// A full read of all task records from one system, with unique ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    records: Vec<TaskRecord>,
}

impl Snapshot {
    /// Validates a fetched collection of records.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::DuplicateTaskId`] for the first identifier
    /// that appears more than once.
    pub fn new(records: Vec<TaskRecord>) -> Result<Self, TaskDomainError> {
        let mut seen: HashSet<&TaskId> = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id()) {
                return Err(TaskDomainError::DuplicateTaskId(record.id().clone()));
            }
        }
        Ok(Self { records })
    }

    /// Returns the records in fetch order.
    #[must_use]
    pub fn records(&self) -> &[TaskRecord] {
        &self.records
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns whether the snapshot holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Consumes the snapshot, returning its records.
    #[must_use]
    pub fn into_records(self) -> Vec<TaskRecord> {
        self.records
    }
}
