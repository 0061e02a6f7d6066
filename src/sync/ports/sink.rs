//! Push port: applies task records to the destination system.

use crate::sync::domain::TaskRecord;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

/// Result type for push sink operations.
pub type PushSinkResult<T> = Result<T, PushSinkError>;

/// Per-item tally of a push.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PushOutcome {
    /// Records the destination accepted.
    pub pushed_count: usize,
    /// Records the destination rejected.
    pub failed_count: usize,
}

impl PushOutcome {
    /// Creates an outcome from accepted and rejected counts.
    #[must_use]
    pub const fn new(pushed_count: usize, failed_count: usize) -> Self {
        Self {
            pushed_count,
            failed_count,
        }
    }

    /// Returns whether every record was accepted.
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.failed_count == 0
    }
}

/// Applies records to a destination, creating or overwriting by id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PushSink: Send + Sync {
    /// Pushes `records` and reports how many were accepted and rejected.
    ///
    /// Individual record failures are counted in the outcome, never returned
    /// as errors.
    ///
    /// # Errors
    ///
    /// Returns [`PushSinkError`] only for systemic failures, such as the
    /// destination being wholly unreachable.
    async fn push(&self, records: &[TaskRecord]) -> PushSinkResult<PushOutcome>;
}

/// Systemic errors returned by push sink implementations.
#[derive(Debug, Clone, Error)]
pub enum PushSinkError {
    /// The destination could not be reached.
    #[error("push destination unreachable: {0}")]
    Unreachable(String),

    /// Backend-specific failure.
    #[error("push sink error: {0}")]
    Backend(Arc<dyn std::error::Error + Send + Sync>),
}

impl PushSinkError {
    /// Wraps a backend error.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Arc::new(err))
    }
}
