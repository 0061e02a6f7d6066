//! Snapshot port: reads every task record from one system.

use crate::sync::domain::TaskRecord;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for snapshot source operations.
pub type SnapshotSourceResult<T> = Result<T, SnapshotSourceError>;

/// Supplies a fresh, full read of task records on every call.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Fetches all task records currently held by the system.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotSourceError`] when the system cannot be read. The
    /// orchestrator treats every such failure as fatal for the cycle.
    async fn fetch(&self) -> SnapshotSourceResult<Vec<TaskRecord>>;
}

/// Errors returned by snapshot source implementations.
#[derive(Debug, Clone, Error)]
pub enum SnapshotSourceError {
    /// The system could not be reached.
    #[error("snapshot source unavailable: {0}")]
    Unavailable(String),

    /// The system refused the credentials presented to it.
    #[error("snapshot source rejected credentials: {0}")]
    Unauthorized(String),

    /// Backend-specific failure.
    #[error("snapshot source error: {0}")]
    Backend(Arc<dyn std::error::Error + Send + Sync>),
}

impl SnapshotSourceError {
    /// Wraps a backend error.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Arc::new(err))
    }
}
