//! Shared world state for sync cycle BDD scenarios.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use mockable::DefaultClock;
use rstest::fixture;
use task_sync::sync::{
    adapters::memory::InMemoryTaskStore,
    domain::{SyncRecord, TaskRecord},
    ports::{SnapshotSource, SnapshotSourceError, SnapshotSourceResult},
    services::{SyncOrchestrator, SyncResult},
};

/// Source store that can be switched offline mid-scenario.
#[derive(Default)]
pub struct ScenarioSource {
    pub store: InMemoryTaskStore,
    offline: AtomicBool,
}

impl ScenarioSource {
    /// Makes every subsequent fetch fail.
    pub fn go_offline(&self) {
        self.offline.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl SnapshotSource for ScenarioSource {
    async fn fetch(&self) -> SnapshotSourceResult<Vec<TaskRecord>> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(SnapshotSourceError::Unavailable(
                "source system offline".to_owned(),
            ));
        }
        self.store.fetch().await
    }
}

/// Service type used by the BDD world.
pub type TestSyncService =
    SyncOrchestrator<ScenarioSource, InMemoryTaskStore, InMemoryTaskStore, DefaultClock>;

/// Scenario world for sync cycle behaviour tests.
pub struct SyncWorld {
    pub source: Arc<ScenarioSource>,
    pub destination: InMemoryTaskStore,
    pub service: TestSyncService,
    pub last_sync_result: Option<SyncResult<SyncRecord>>,
    pub last_history_result: Option<SyncResult<Vec<SyncRecord>>>,
}

impl SyncWorld {
    /// Creates a world with empty stores on both sides.
    #[must_use]
    pub fn new() -> Self {
        let source = Arc::new(ScenarioSource::default());
        let destination = InMemoryTaskStore::new();
        let destination_handle = Arc::new(destination.clone());
        let service = SyncOrchestrator::new(
            Arc::clone(&source),
            Arc::clone(&destination_handle),
            destination_handle,
            Arc::new(DefaultClock),
        );

        Self {
            source,
            destination,
            service,
            last_sync_result: None,
            last_history_result: None,
        }
    }
}

impl Default for SyncWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> SyncWorld {
    SyncWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
