//! Scheduled cycles between in-memory stores under a paused clock.

use crate::in_memory::helpers::{SyncHarness, seeded, task_id};
use mockable::DefaultClock;
use rstest::rstest;
use std::time::Duration;
use task_sync::sync::{
    domain::{SyncTrigger, TaskDomainError, TaskRecord},
    services::{SchedulerStatus, SyncScheduler},
};

type TestResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

const INTERVAL: Duration = Duration::from_secs(30);

/// Scheduled cycles copy the source into the destination and are recorded.
#[rstest]
#[tokio::test(start_paused = true)]
async fn scheduled_cycles_sync_the_stores(
    seeded: Result<SyncHarness, TaskDomainError>,
) -> TestResult {
    let harness = seeded?;
    let scheduler = SyncScheduler::new(INTERVAL)?;
    scheduler.start(harness.service.clone())?;

    tokio::time::sleep(Duration::from_secs(95)).await;
    scheduler.stop().await?;

    assert_eq!(scheduler.status(), SchedulerStatus::Stopped);
    assert_eq!(harness.destination.len()?, 5);
    let history = harness.service.get_history(None)?;
    assert_eq!(history.len(), 3);
    assert!(
        history
            .iter()
            .all(|entry| entry.trigger() == SyncTrigger::Scheduled)
    );
    let added: Vec<usize> = history.iter().map(|entry| entry.added()).collect();
    assert_eq!(added, [3, 0, 0]);
    Ok(())
}

/// Tasks created between ticks are picked up by the next tick.
#[rstest]
#[tokio::test(start_paused = true)]
async fn new_source_task_is_picked_up_on_next_tick(
    seeded: Result<SyncHarness, TaskDomainError>,
) -> TestResult {
    let harness = seeded?;
    let scheduler = SyncScheduler::new(INTERVAL)?;
    scheduler.start(harness.service.clone())?;
    tokio::time::sleep(Duration::from_secs(35)).await;

    let id = task_id("src-4")?;
    harness
        .source
        .upsert(TaskRecord::new(id.clone(), "Rotate credentials", &DefaultClock)?)?;
    assert!(harness.destination.get(&id)?.is_none());

    tokio::time::sleep(INTERVAL).await;
    scheduler.stop().await?;

    assert!(harness.destination.get(&id)?.is_some());
    assert_eq!(harness.service.get_stats().total_syncs, 2);
    Ok(())
}

/// Manual and scheduled cycles share one history.
#[rstest]
#[tokio::test(start_paused = true)]
async fn manual_and_scheduled_cycles_share_history(
    seeded: Result<SyncHarness, TaskDomainError>,
) -> TestResult {
    let harness = seeded?;
    harness.service.sync().await?;
    let scheduler = SyncScheduler::new(INTERVAL)?;
    scheduler.start(harness.service.clone())?;

    tokio::time::sleep(Duration::from_secs(31)).await;
    scheduler.stop().await?;

    let triggers: Vec<SyncTrigger> = harness
        .service
        .get_history(None)?
        .iter()
        .map(|entry| entry.trigger())
        .collect();
    assert_eq!(triggers, [SyncTrigger::Manual, SyncTrigger::Scheduled]);
    Ok(())
}
