//! Error types for sync domain validation and parsing.

use super::TaskId;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors returned while constructing domain sync values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task identifier is empty after trimming.
    #[error("task identifier must not be empty")]
    EmptyTaskId,

    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The task was last updated before it was created.
    #[error("task {id} updated_at {updated_at} precedes created_at {created_at}")]
    TimestampsOutOfOrder {
        /// Offending task identifier.
        id: TaskId,
        /// Creation timestamp.
        created_at: DateTime<Utc>,
        /// Latest update timestamp.
        updated_at: DateTime<Utc>,
    },

    /// A snapshot contained the same task identifier more than once.
    #[error("duplicate task identifier in snapshot: {0}")]
    DuplicateTaskId(TaskId),

    /// The requested history window is not a positive number of entries.
    #[error("invalid history limit {0}, expected a positive integer")]
    InvalidHistoryLimit(i64),
}

/// Error returned while parsing task statuses from external input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing task priorities from external input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParseTaskPriorityError(pub String);
