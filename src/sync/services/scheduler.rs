//! Periodic driver for autonomous sync cycles.

use async_trait::async_trait;
use mockable::Clock;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time;
use tracing::{debug, error, info, warn};

use super::{SyncError, SyncOrchestrator, SyncResult};
use crate::sync::{
    domain::{SyncRecord, SyncTrigger},
    ports::{PushSink, SnapshotSource},
};

/// Anything the scheduler can drive once per interval.
#[async_trait]
pub trait ScheduledSync: Send + Sync {
    /// Runs one cycle on behalf of the scheduler.
    ///
    /// # Errors
    ///
    /// Returns the cycle failure; the scheduler logs it and keeps looping.
    async fn run_scheduled(&self) -> SyncResult<SyncRecord>;
}

#[async_trait]
impl<S, D, P, C> ScheduledSync for SyncOrchestrator<S, D, P, C>
where
    S: SnapshotSource,
    D: SnapshotSource,
    P: PushSink,
    C: Clock + Send + Sync,
{
    async fn run_scheduled(&self) -> SyncResult<SyncRecord> {
        self.run_cycle(SyncTrigger::Scheduled).await
    }
}

/// Errors returned by scheduler control operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SchedulerError {
    /// The configured interval is zero.
    #[error("sync interval must be greater than zero")]
    ZeroInterval,

    /// The scheduler has been started before.
    #[error("sync scheduler has already been started")]
    AlreadyStarted,

    /// The scheduler is not running.
    #[error("sync scheduler is not running")]
    NotRunning,

    /// The loop task ended abnormally.
    #[error("sync scheduler task failed: {0}")]
    Join(String),
}

/// Observable scheduler state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerStatus {
    /// No loop is running.
    Stopped,
    /// The loop is running.
    Running,
}

#[derive(Debug)]
enum SchedulerState {
    NotStarted,
    Running {
        shutdown: watch::Sender<bool>,
        handle: JoinHandle<()>,
    },
    Stopped,
}

/// Single loop that runs a sync cycle after every interval.
///
/// The scheduler starts at most once. Stopping it signals the loop and waits
/// for a cycle already in flight to finish. Dropping it without stopping also
/// ends the loop at its next wake-up.
#[derive(Debug)]
pub struct SyncScheduler {
    interval: Duration,
    state: Mutex<SchedulerState>,
}

impl SyncScheduler {
    /// Creates a stopped scheduler firing every `interval`.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::ZeroInterval`] when `interval` is zero.
    pub fn new(interval: Duration) -> Result<Self, SchedulerError> {
        if interval.is_zero() {
            return Err(SchedulerError::ZeroInterval);
        }
        Ok(Self {
            interval,
            state: Mutex::new(SchedulerState::NotStarted),
        })
    }

    /// Returns the interval between cycles.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns whether the loop is running.
    #[must_use]
    pub fn status(&self) -> SchedulerStatus {
        match *self.state.lock().unwrap_or_else(PoisonError::into_inner) {
            SchedulerState::Running { .. } => SchedulerStatus::Running,
            SchedulerState::NotStarted | SchedulerState::Stopped => SchedulerStatus::Stopped,
        }
    }

    /// Spawns the loop onto the current Tokio runtime.
    ///
    /// The loop sleeps for one interval, runs a cycle, then sleeps again, so
    /// the gap between the end of one cycle and the start of the next is
    /// always a full interval.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::AlreadyStarted`] on any call after the first.
    pub fn start<R>(&self, runner: Arc<R>) -> Result<(), SchedulerError>
    where
        R: ScheduledSync + 'static,
    {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if !matches!(*state, SchedulerState::NotStarted) {
            return Err(SchedulerError::AlreadyStarted);
        }

        let (shutdown, shutdown_rx) = watch::channel(false);
        let handle = tokio::spawn(run_loop(runner, self.interval, shutdown_rx));
        *state = SchedulerState::Running { shutdown, handle };
        info!(interval_secs = self.interval.as_secs(), "sync scheduler started");
        Ok(())
    }

    /// Signals the loop to stop and waits for it to exit.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::NotRunning`] when the loop is not running, or
    /// [`SchedulerError::Join`] when the loop task panicked.
    pub async fn stop(&self) -> Result<(), SchedulerError> {
        let (shutdown, handle) = {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            match std::mem::replace(&mut *state, SchedulerState::Stopped) {
                SchedulerState::Running { shutdown, handle } => (shutdown, handle),
                previous @ (SchedulerState::NotStarted | SchedulerState::Stopped) => {
                    *state = previous;
                    return Err(SchedulerError::NotRunning);
                }
            }
        };

        if shutdown.send(true).is_err() {
            debug!("sync scheduler loop already exited");
        }
        handle
            .await
            .map_err(|err| SchedulerError::Join(err.to_string()))?;
        info!("sync scheduler stopped");
        Ok(())
    }
}

async fn run_loop<R>(runner: Arc<R>, interval: Duration, mut shutdown: watch::Receiver<bool>)
where
    R: ScheduledSync + ?Sized,
{
    loop {
        tokio::select! {
            biased;
            _ = shutdown.changed() => break,
            () = time::sleep(interval) => {
                debug!("scheduled sync triggered");
                match runner.run_scheduled().await {
                    Ok(record) => debug!(run_id = %record.run_id(), "scheduled sync recorded"),
                    Err(SyncError::AlreadyInProgress) => {
                        warn!("scheduled sync skipped: another cycle is in progress");
                    }
                    Err(err) => error!(error = %err, "scheduled sync failed"),
                }
            }
        }
    }
}
