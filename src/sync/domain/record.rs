//! Immutable outcome records for sync cycles.

use super::SyncRunId;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// What started a sync cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncTrigger {
    /// Requested by a caller.
    Manual,
    /// Fired by the periodic scheduler.
    Scheduled,
}

impl SyncTrigger {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Scheduled => "scheduled",
        }
    }
}

impl fmt::Display for SyncTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity and timing of one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleTiming {
    /// Cycle identifier.
    pub run_id: SyncRunId,
    /// What started the cycle.
    pub trigger: SyncTrigger,
    /// Clock reading when the cycle started.
    pub started_at: DateTime<Utc>,
    /// Clock reading when the cycle finished or failed.
    pub finished_at: DateTime<Utc>,
}

/// Record counts gathered by a completed cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleCounts {
    /// Records in the source snapshot.
    pub source_count: usize,
    /// Records in the destination snapshot.
    pub destination_count: usize,
    /// Records classified as additions.
    pub added: usize,
    /// Records classified as updates.
    pub updated: usize,
    /// Records classified as unchanged.
    pub unchanged: usize,
    /// Records the sink accepted.
    pub pushed: usize,
    /// Records the sink rejected.
    pub failed: usize,
}

/// Outcome of one sync cycle, as appended to the history.
///
/// `success` means the cycle ran to completion, not that every pushed record
/// was accepted; see `failed` for per-item rejections.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyncRecord {
    run_id: SyncRunId,
    trigger: SyncTrigger,
    timestamp: DateTime<Utc>,
    duration_seconds: f64,
    source_count: usize,
    destination_count: usize,
    added: usize,
    updated: usize,
    unchanged: usize,
    pushed: usize,
    failed: usize,
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl SyncRecord {
    /// Builds the record for a cycle that ran to completion.
    #[must_use]
    pub fn completed(timing: CycleTiming, counts: CycleCounts) -> Self {
        Self {
            run_id: timing.run_id,
            trigger: timing.trigger,
            timestamp: timing.finished_at,
            duration_seconds: elapsed_seconds(timing.started_at, timing.finished_at),
            source_count: counts.source_count,
            destination_count: counts.destination_count,
            added: counts.added,
            updated: counts.updated,
            unchanged: counts.unchanged,
            pushed: counts.pushed,
            failed: counts.failed,
            success: true,
            error: None,
        }
    }

    /// Builds the record for a cycle aborted by `error`.
    ///
    /// Counts are zero because no stage result is trusted after a failure.
    #[must_use]
    pub fn aborted(timing: CycleTiming, error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            ..Self::completed(timing, CycleCounts::default())
        }
    }

    /// Returns the cycle identifier.
    #[must_use]
    pub const fn run_id(&self) -> SyncRunId {
        self.run_id
    }

    /// Returns what started the cycle.
    #[must_use]
    pub const fn trigger(&self) -> SyncTrigger {
        self.trigger
    }

    /// Returns when the cycle finished.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Returns the cycle duration in seconds.
    #[must_use]
    pub const fn duration_seconds(&self) -> f64 {
        self.duration_seconds
    }

    /// Returns the source snapshot size.
    #[must_use]
    pub const fn source_count(&self) -> usize {
        self.source_count
    }

    /// Returns the destination snapshot size.
    #[must_use]
    pub const fn destination_count(&self) -> usize {
        self.destination_count
    }

    /// Returns the number of additions.
    #[must_use]
    pub const fn added(&self) -> usize {
        self.added
    }

    /// Returns the number of updates.
    #[must_use]
    pub const fn updated(&self) -> usize {
        self.updated
    }

    /// Returns the number of unchanged records.
    #[must_use]
    pub const fn unchanged(&self) -> usize {
        self.unchanged
    }

    /// Returns the number of records the sink accepted.
    #[must_use]
    pub const fn pushed(&self) -> usize {
        self.pushed
    }

    /// Returns the number of records the sink rejected.
    #[must_use]
    pub const fn failed(&self) -> usize {
        self.failed
    }

    /// Returns whether the cycle ran to completion.
    #[must_use]
    pub const fn success(&self) -> bool {
        self.success
    }

    /// Returns the failure message of an aborted cycle.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

fn elapsed_seconds(started_at: DateTime<Utc>, finished_at: DateTime<Utc>) -> f64 {
    (finished_at - started_at)
        .to_std()
        .map_or(0.0, |elapsed| elapsed.as_secs_f64())
}
