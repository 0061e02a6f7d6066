//! Change detection between a source and a destination snapshot.
//!
//! Reconciliation is additive: records that exist only in the destination are
//! neither reported nor removed.

use super::{TaskId, TaskRecord};
use serde::Serialize;
use std::collections::HashMap;

/// Classification of every source record relative to the destination.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChangePartition {
    to_add: Vec<TaskRecord>,
    to_update: Vec<TaskRecord>,
    unchanged: Vec<TaskRecord>,
}

impl ChangePartition {
    /// Records present in the source but absent from the destination.
    #[must_use]
    pub fn to_add(&self) -> &[TaskRecord] {
        &self.to_add
    }

    /// Records present in both systems where the source is newer or differs.
    #[must_use]
    pub fn to_update(&self) -> &[TaskRecord] {
        &self.to_update
    }

    /// Records present in both systems and considered identical.
    #[must_use]
    pub fn unchanged(&self) -> &[TaskRecord] {
        &self.unchanged
    }

    /// Returns whether anything needs pushing.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.to_add.is_empty() || !self.to_update.is_empty()
    }

    /// Returns the records to push: additions first, then updates.
    #[must_use]
    pub fn pending(&self) -> Vec<TaskRecord> {
        self.to_add
            .iter()
            .chain(self.to_update.iter())
            .cloned()
            .collect()
    }
}

/// Partitions the source snapshot against the destination snapshot.
///
/// Source order is preserved inside each list. The function is pure: equal
/// inputs always produce an equal partition.
#[must_use]
pub fn reconcile(source: &[TaskRecord], destination: &[TaskRecord]) -> ChangePartition {
    let destination_by_id: HashMap<&TaskId, &TaskRecord> = destination
        .iter()
        .map(|record| (record.id(), record))
        .collect();

    let mut partition = ChangePartition::default();
    for record in source {
        match destination_by_id.get(record.id()) {
            None => partition.to_add.push(record.clone()),
            Some(existing) if has_changed(record, existing) => {
                partition.to_update.push(record.clone());
            }
            Some(_) => partition.unchanged.push(record.clone()),
        }
    }
    partition
}

/// Returns whether `source` should overwrite `destination`.
///
/// A strictly newer source timestamp wins regardless of field equality.
/// Otherwise title, description, status and priority are compared exactly.
#[must_use]
pub fn has_changed(source: &TaskRecord, destination: &TaskRecord) -> bool {
    if source.updated_at() > destination.updated_at() {
        return true;
    }

    source.title() != destination.title()
        || source.description() != destination.description()
        || source.status() != destination.status()
        || source.priority() != destination.priority()
}
