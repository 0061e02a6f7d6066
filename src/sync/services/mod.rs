//! Application services for sync orchestration and scheduling.

mod cache;
mod error;
mod orchestrator;
mod scheduler;

pub use cache::LocalCache;
pub use error::{SnapshotSide, SyncError, SyncResult};
pub use orchestrator::{DryRunReport, SyncOrchestrator, SyncStats};
pub use scheduler::{ScheduledSync, SchedulerError, SchedulerStatus, SyncScheduler};
