//! Shared test helpers for in-memory sync integration tests.

use mockable::{Clock, DefaultClock};
use rstest::fixture;
use std::io;
use std::sync::Arc;
use task_sync::sync::{
    adapters::memory::{
        InMemoryTaskStore,
        fixtures::{sample_destination_tasks, sample_source_tasks},
    },
    domain::{TaskDomainError, TaskId, TaskRecord},
    services::SyncOrchestrator,
};
use tokio::runtime::Runtime;

/// Orchestrator wired to two in-memory stores, the destination doubling as
/// the push sink.
pub type StoreOrchestrator =
    SyncOrchestrator<InMemoryTaskStore, InMemoryTaskStore, InMemoryTaskStore, DefaultClock>;

/// Source store, destination store and the orchestrator between them.
pub struct SyncHarness {
    pub source: InMemoryTaskStore,
    pub destination: InMemoryTaskStore,
    pub service: Arc<StoreOrchestrator>,
}

impl SyncHarness {
    /// Wires an orchestrator over the given stores.
    #[must_use]
    pub fn new(source: InMemoryTaskStore, destination: InMemoryTaskStore) -> Self {
        let destination_handle = Arc::new(destination.clone());
        let service = Arc::new(SyncOrchestrator::new(
            Arc::new(source.clone()),
            Arc::clone(&destination_handle),
            destination_handle,
            Arc::new(DefaultClock),
        ));
        Self {
            source,
            destination,
            service,
        }
    }
}

/// Provides a tokio runtime for async operations in tests.
///
/// # Errors
///
/// Returns an error if the runtime cannot be created.
#[fixture]
pub fn runtime() -> io::Result<Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}

/// Provides a harness seeded with the sample source and destination tasks.
///
/// # Errors
///
/// Returns an error if a sample record fails validation.
#[fixture]
pub fn seeded() -> Result<SyncHarness, TaskDomainError> {
    let clock = DefaultClock;
    Ok(SyncHarness::new(
        InMemoryTaskStore::with_records(sample_source_tasks(&clock)?),
        InMemoryTaskStore::with_records(sample_destination_tasks(&clock)?),
    ))
}

/// Returns `record` with a new title and a fresh update timestamp.
///
/// # Errors
///
/// Returns an error if the edited record fails validation.
pub fn retitled(record: TaskRecord, title: &str) -> Result<TaskRecord, TaskDomainError> {
    let mut data = record.into_data();
    data.title = title.to_owned();
    data.updated_at = DefaultClock.utc().max(data.updated_at);
    TaskRecord::from_data(data)
}

/// Parses a task identifier used by a test.
///
/// # Errors
///
/// Returns an error if `raw` is blank.
pub fn task_id(raw: &str) -> Result<TaskId, TaskDomainError> {
    TaskId::new(raw)
}
