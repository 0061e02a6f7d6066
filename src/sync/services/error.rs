//! Service-level errors for sync orchestration.

use crate::sync::{
    domain::TaskDomainError,
    ports::{PushSinkError, SnapshotSourceError},
};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Which of the two synchronised systems a snapshot came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotSide {
    /// The system whose records are authoritative.
    Source,
    /// The system being brought in line with the source.
    Destination,
}

impl fmt::Display for SnapshotSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Source => "source",
            Self::Destination => "destination",
        })
    }
}

/// Errors returned by sync orchestration operations.
#[derive(Debug, Error)]
pub enum SyncError {
    /// A snapshot could not be fetched.
    #[error("failed to fetch {side} snapshot: {source}")]
    Fetch {
        /// System that failed.
        side: SnapshotSide,
        /// Underlying port failure.
        #[source]
        source: SnapshotSourceError,
    },

    /// A fetched snapshot violated a domain invariant.
    #[error("invalid {side} snapshot: {source}")]
    InvalidSnapshot {
        /// System that produced the snapshot.
        side: SnapshotSide,
        /// Violated invariant.
        #[source]
        source: TaskDomainError,
    },

    /// The push sink failed as a whole.
    #[error("failed to push changes: {0}")]
    Push(#[from] PushSinkError),

    /// Caller input failed validation.
    #[error(transparent)]
    Validation(#[from] TaskDomainError),

    /// Another cycle holds the sync gate.
    #[error("a sync cycle is already in progress")]
    AlreadyInProgress,
}

impl SyncError {
    /// Returns whether the request was rejected before any I/O took place.
    ///
    /// Rejections leave no trace in the history; an outer request layer
    /// should report them as client errors rather than server failures.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::AlreadyInProgress)
    }
}

/// Result type for sync orchestration operations.
pub type SyncResult<T> = Result<T, SyncError>;
