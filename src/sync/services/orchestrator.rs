//! Service layer running reconciliation cycles between two systems.

use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::Serialize;
use std::num::NonZeroUsize;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use super::{LocalCache, SnapshotSide, SyncError, SyncResult};
use crate::sync::{
    domain::{
        ChangePartition, CycleCounts, CycleTiming, HistoryLimit, HistoryLog, Snapshot,
        SyncRecord, SyncRunId, SyncTrigger, reconcile,
    },
    ports::{PushOutcome, PushSink, SnapshotSource},
};

/// Point-in-time counters of the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SyncStats {
    /// Number of cycles that ran to completion.
    pub total_syncs: u64,
    /// Finish time of the latest completed cycle.
    pub last_sync_time: Option<DateTime<Utc>>,
    /// Number of records in the local cache.
    pub cached_task_count: usize,
}

/// Preview of what a cycle would push, without pushing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DryRunReport {
    /// Records in the source snapshot.
    pub source_count: usize,
    /// Records in the destination snapshot.
    pub destination_count: usize,
    /// Classification of every source record.
    pub partition: ChangePartition,
}

#[derive(Debug)]
struct SyncState {
    history: HistoryLog,
    total_syncs: u64,
    last_sync_time: Option<DateTime<Utc>>,
}

/// Reconciliation orchestrator shared by manual callers and the scheduler.
///
/// At most one cycle body runs at a time; a cycle requested while another is
/// in flight is rejected with [`SyncError::AlreadyInProgress`].
pub struct SyncOrchestrator<S, D, P, C>
where
    S: SnapshotSource,
    D: SnapshotSource,
    P: PushSink,
    C: Clock + Send + Sync,
{
    source: Arc<S>,
    destination: Arc<D>,
    sink: Arc<P>,
    clock: Arc<C>,
    cache: LocalCache,
    state: RwLock<SyncState>,
    cycle_gate: Mutex<()>,
}

impl<S, D, P, C> SyncOrchestrator<S, D, P, C>
where
    S: SnapshotSource,
    D: SnapshotSource,
    P: PushSink,
    C: Clock + Send + Sync,
{
    /// Creates an orchestrator with the default history capacity.
    #[must_use]
    pub fn new(source: Arc<S>, destination: Arc<D>, sink: Arc<P>, clock: Arc<C>) -> Self {
        Self {
            source,
            destination,
            sink,
            clock,
            cache: LocalCache::new(),
            state: RwLock::new(SyncState {
                history: HistoryLog::default(),
                total_syncs: 0,
                last_sync_time: None,
            }),
            cycle_gate: Mutex::new(()),
        }
    }

    /// Replaces the history with an empty log of the given capacity.
    #[must_use]
    pub fn with_history_capacity(mut self, capacity: NonZeroUsize) -> Self {
        self.state
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .history = HistoryLog::with_capacity(capacity);
        self
    }

    /// Runs one manually requested cycle.
    ///
    /// # Errors
    ///
    /// See [`Self::run_cycle`].
    pub async fn sync(&self) -> SyncResult<SyncRecord> {
        self.run_cycle(SyncTrigger::Manual).await
    }

    /// Runs one full cycle: fetch, reconcile, push, cache, record.
    ///
    /// Partial push failures still complete the cycle. Any failure that
    /// aborts the cycle is appended to the history and returned.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::AlreadyInProgress`] without touching the history
    /// when another cycle is running, [`SyncError::Fetch`] or
    /// [`SyncError::InvalidSnapshot`] when a snapshot cannot be obtained, and
    /// [`SyncError::Push`] when the sink fails as a whole.
    pub async fn run_cycle(&self, trigger: SyncTrigger) -> SyncResult<SyncRecord> {
        let Ok(_cycle) = self.cycle_gate.try_lock() else {
            warn!(%trigger, "sync rejected: another cycle is in progress");
            return Err(SyncError::AlreadyInProgress);
        };

        let run_id = SyncRunId::new();
        let started_at = self.clock.utc();
        info!(%run_id, %trigger, "sync cycle started");

        let outcome = self.execute().await;
        let timing = CycleTiming {
            run_id,
            trigger,
            started_at,
            finished_at: self.clock.utc(),
        };

        match outcome {
            Ok(counts) => {
                let record = SyncRecord::completed(timing, counts);
                self.record_completed(record.clone());
                info!(
                    %run_id,
                    %trigger,
                    added = record.added(),
                    updated = record.updated(),
                    unchanged = record.unchanged(),
                    failed = record.failed(),
                    duration_seconds = record.duration_seconds(),
                    "sync cycle completed",
                );
                Ok(record)
            }
            Err(err) => {
                let record = SyncRecord::aborted(timing, err.to_string());
                append_history(&mut self.write_state(), record);
                error!(%run_id, %trigger, error = %err, "sync cycle failed");
                Err(err)
            }
        }
    }

    /// Previews a cycle without pushing or recording anything.
    ///
    /// Safe to call concurrently with [`Self::sync`].
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Fetch`] or [`SyncError::InvalidSnapshot`] when a
    /// snapshot cannot be obtained.
    pub async fn dry_run(&self) -> SyncResult<DryRunReport> {
        let (source, destination) = self.fetch_snapshots().await?;
        let partition = reconcile(source.records(), destination.records());
        info!(
            to_add = partition.to_add().len(),
            to_update = partition.to_update().len(),
            unchanged = partition.unchanged().len(),
            "dry-run reconciliation finished",
        );
        Ok(DryRunReport {
            source_count: source.len(),
            destination_count: destination.len(),
            partition,
        })
    }

    /// Returns the current counters.
    #[must_use]
    pub fn get_stats(&self) -> SyncStats {
        let state = self.read_state();
        SyncStats {
            total_syncs: state.total_syncs,
            last_sync_time: state.last_sync_time,
            cached_task_count: self.cache.len(),
        }
    }

    /// Returns the most recent `limit` history entries, oldest first.
    ///
    /// `None` selects [`HistoryLimit::DEFAULT`].
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Validation`] when `limit` is zero or negative.
    pub fn get_history(&self, limit: Option<i64>) -> SyncResult<Vec<SyncRecord>> {
        let window = limit.map_or(Ok(HistoryLimit::DEFAULT), HistoryLimit::new)?;
        Ok(self.read_state().history.recent(window))
    }

    /// Returns the cache of the last source snapshot.
    #[must_use]
    pub const fn cache(&self) -> &LocalCache {
        &self.cache
    }

    async fn execute(&self) -> SyncResult<CycleCounts> {
        let (source, destination) = self.fetch_snapshots().await?;
        let partition = reconcile(source.records(), destination.records());
        debug!(
            to_add = partition.to_add().len(),
            to_update = partition.to_update().len(),
            unchanged = partition.unchanged().len(),
            "reconciled snapshots",
        );

        let pushed = if partition.has_pending() {
            self.sink.push(&partition.pending()).await?
        } else {
            PushOutcome::default()
        };
        if !pushed.is_clean() {
            warn!(
                pushed = pushed.pushed_count,
                failed = pushed.failed_count,
                "destination rejected some records",
            );
        }

        self.cache.replace(source.records());

        Ok(CycleCounts {
            source_count: source.len(),
            destination_count: destination.len(),
            added: partition.to_add().len(),
            updated: partition.to_update().len(),
            unchanged: partition.unchanged().len(),
            pushed: pushed.pushed_count,
            failed: pushed.failed_count,
        })
    }

    async fn fetch_snapshots(&self) -> SyncResult<(Snapshot, Snapshot)> {
        tokio::try_join!(
            fetch_snapshot(&*self.source, SnapshotSide::Source),
            fetch_snapshot(&*self.destination, SnapshotSide::Destination),
        )
    }

    fn record_completed(&self, record: SyncRecord) {
        let mut state = self.write_state();
        state.total_syncs = state.total_syncs.saturating_add(1);
        state.last_sync_time = Some(record.timestamp());
        append_history(&mut state, record);
    }

    fn read_state(&self) -> RwLockReadGuard<'_, SyncState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, SyncState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

async fn fetch_snapshot<T>(port: &T, side: SnapshotSide) -> SyncResult<Snapshot>
where
    T: SnapshotSource + ?Sized,
{
    let records = port
        .fetch()
        .await
        .map_err(|source| SyncError::Fetch { side, source })?;
    Snapshot::new(records).map_err(|source| SyncError::InvalidSnapshot { side, source })
}

fn append_history(state: &mut SyncState, record: SyncRecord) {
    if let Some(evicted) = state.history.append(record) {
        debug!(run_id = %evicted.run_id(), "evicted oldest history entry");
    }
}
