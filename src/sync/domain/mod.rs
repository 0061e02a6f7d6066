//! Domain model for task synchronisation.
//!
//! The sync domain models task records, point-in-time snapshots, the pure
//! reconciliation between two snapshots, and the bounded history of cycle
//! outcomes. Infrastructure concerns stay outside the domain boundary.

mod error;
mod history;
mod ids;
mod reconcile;
mod record;
mod snapshot;
mod task;

pub use error::{ParseTaskPriorityError, ParseTaskStatusError, TaskDomainError};
pub use history::{HistoryLimit, HistoryLog};
pub use ids::{SyncRunId, TaskId};
pub use reconcile::{ChangePartition, has_changed, reconcile};
pub use record::{CycleCounts, CycleTiming, SyncRecord, SyncTrigger};
pub use snapshot::Snapshot;
pub use task::{TaskPriority, TaskRecord, TaskRecordData, TaskStatus};
