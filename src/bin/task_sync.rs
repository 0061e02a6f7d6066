//! Runs the task sync engine against the in-memory sample systems.
//!
//! Usage:
//!
//! ```text
//! AUTO_SYNC_ENABLED=true SYNC_INTERVAL_SECONDS=30 task-sync
//! ```
//!
//! With auto-sync disabled (the default) the binary runs one manual cycle,
//! logs the resulting record as JSON and exits. With auto-sync enabled it
//! starts the scheduler and runs until Ctrl-C, then stops the scheduler and
//! logs the final counters.
//!
//! Settings may also come from a `.env` file in the working directory.

use std::sync::Arc;

use mockable::DefaultClock;
use task_sync::{
    config::SyncConfig,
    sync::{
        adapters::memory::{
            InMemoryTaskStore,
            fixtures::{sample_destination_tasks, sample_source_tasks},
        },
        services::{SyncOrchestrator, SyncScheduler},
    },
    telemetry::init_tracing,
};
use tracing::info;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    init_tracing();
    let config = SyncConfig::from_env()?;
    info!(
        auto_sync_enabled = config.auto_sync_enabled,
        interval_secs = config.sync_interval.as_secs(),
        history_capacity = config.history_capacity.get(),
        "task sync engine starting",
    );

    let clock = Arc::new(DefaultClock);
    let source = Arc::new(InMemoryTaskStore::with_records(sample_source_tasks(
        &*clock,
    )?));
    let destination = Arc::new(InMemoryTaskStore::with_records(
        sample_destination_tasks(&*clock)?,
    ));
    let orchestrator = Arc::new(
        SyncOrchestrator::new(source, Arc::clone(&destination), destination, clock)
            .with_history_capacity(config.history_capacity),
    );

    if !config.auto_sync_enabled {
        let record = orchestrator.sync().await?;
        info!(record = %serde_json::to_string(&record)?, "manual sync finished");
        return Ok(());
    }

    let scheduler = SyncScheduler::new(config.sync_interval)?;
    scheduler.start(Arc::clone(&orchestrator))?;
    tokio::signal::ctrl_c().await?;
    info!("received ctrl-c, stopping scheduler");
    scheduler.stop().await?;

    let stats = orchestrator.get_stats();
    info!(stats = %serde_json::to_string(&stats)?, "task sync engine stopped");
    Ok(())
}
