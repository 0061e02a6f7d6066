//! Shared builders and clocks for sync unit tests.

use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::sync::domain::{TaskId, TaskPriority, TaskRecord, TaskRecordData, TaskStatus};

const EPOCH_SECONDS: i64 = 1_700_000_000;

/// Returns a fixed instant `offset` seconds after the test epoch.
pub fn at(offset: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(EPOCH_SECONDS + offset, 0).expect("timestamp in range")
}

/// Builds raw record parts created at the epoch and updated at `updated`.
pub fn data(id: &str, title: &str, updated: i64) -> TaskRecordData {
    TaskRecordData {
        id: TaskId::new(id).expect("valid task id"),
        title: title.to_owned(),
        description: None,
        status: TaskStatus::Todo,
        priority: TaskPriority::Medium,
        assignee: None,
        tags: Vec::new(),
        created_at: at(0),
        updated_at: at(updated),
    }
}

/// Builds a valid record created at the epoch and updated at `updated`.
pub fn record(id: &str, title: &str, updated: i64) -> TaskRecord {
    TaskRecord::from_data(data(id, title, updated)).expect("valid task record")
}

/// Returns the identifiers of `records` in order.
pub fn ids(records: &[TaskRecord]) -> Vec<String> {
    records
        .iter()
        .map(|record| record.id().as_str().to_owned())
        .collect()
}

/// Clock that advances one second on every reading.
#[derive(Debug, Default)]
pub struct StepClock {
    ticks: AtomicI64,
}

impl StepClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clock for StepClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let tick = self.ticks.fetch_add(1, Ordering::SeqCst);
        at(0) + TimeDelta::seconds(tick)
    }
}
