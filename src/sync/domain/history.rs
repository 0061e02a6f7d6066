//! Bounded, insertion-ordered history of sync outcomes.

use super::{SyncRecord, TaskDomainError};
use std::collections::VecDeque;
use std::num::NonZeroUsize;

/// Ring buffer of [`SyncRecord`]s.
///
/// Entries are kept in the order they were appended. Once the log holds
/// `capacity` entries, each append evicts the oldest entry first.
#[derive(Debug, Clone)]
pub struct HistoryLog {
    entries: VecDeque<SyncRecord>,
    capacity: NonZeroUsize,
}

impl HistoryLog {
    /// Number of entries retained when no capacity is configured.
    #[expect(clippy::unwrap_used, reason = "the literal is non-zero")]
    pub const DEFAULT_CAPACITY: NonZeroUsize = NonZeroUsize::new(100).unwrap();

    /// Creates an empty log holding at most `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.get()),
            capacity,
        }
    }

    /// Appends a record, returning the evicted oldest entry on overflow.
    pub fn append(&mut self, record: SyncRecord) -> Option<SyncRecord> {
        let evicted = if self.entries.len() >= self.capacity.get() {
            self.entries.pop_front()
        } else {
            None
        };
        self.entries.push_back(record);
        evicted
    }

    /// Returns the most recent `limit` entries, oldest first.
    #[must_use]
    pub fn recent(&self, limit: HistoryLimit) -> Vec<SyncRecord> {
        let skip = self.entries.len().saturating_sub(limit.get());
        self.entries.iter().skip(skip).cloned().collect()
    }

    /// Iterates over all entries, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &SyncRecord> {
        self.entries.iter()
    }

    /// Returns the number of retained entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the log is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the maximum number of retained entries.
    #[must_use]
    pub const fn capacity(&self) -> NonZeroUsize {
        self.capacity
    }
}

impl Default for HistoryLog {
    fn default() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }
}

/// Validated size of a history window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryLimit(NonZeroUsize);

impl HistoryLimit {
    /// Window used when the caller does not ask for one.
    #[expect(clippy::unwrap_used, reason = "the literal is non-zero")]
    pub const DEFAULT: Self = Self(NonZeroUsize::new(10).unwrap());

    /// Validates a caller-supplied window size.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidHistoryLimit`] when `value` is zero or
    /// negative.
    pub fn new(value: i64) -> Result<Self, TaskDomainError> {
        usize::try_from(value)
            .ok()
            .and_then(NonZeroUsize::new)
            .map(Self)
            .ok_or(TaskDomainError::InvalidHistoryLimit(value))
    }

    /// Returns the window size.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for HistoryLimit {
    fn default() -> Self {
        Self::DEFAULT
    }
}
