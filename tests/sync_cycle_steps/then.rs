//! Then steps for sync cycle BDD scenarios.

use super::world::SyncWorld;
use eyre::WrapErr;
use rstest_bdd_macros::then;
use task_sync::sync::{
    domain::{SyncRecord, TaskDomainError, TaskId},
    services::{SnapshotSide, SyncError},
};

fn last_record(world: &SyncWorld) -> Result<&SyncRecord, eyre::Report> {
    let result = world
        .last_sync_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing sync result in scenario world"))?;
    result
        .as_ref()
        .map_err(|err| eyre::eyre!("unexpected sync failure: {err}"))
}

#[then("the sync succeeds")]
fn sync_succeeds(world: &SyncWorld) -> Result<(), eyre::Report> {
    let record = last_record(world)?;
    if !record.success() {
        return Err(eyre::eyre!("expected a successful record, got {record:?}"));
    }
    Ok(())
}

#[then("the sync reports {added:usize} added, {updated:usize} updated and {unchanged:usize} unchanged")]
fn sync_reports_counts(
    world: &SyncWorld,
    added: usize,
    updated: usize,
    unchanged: usize,
) -> Result<(), eyre::Report> {
    let record = last_record(world)?;
    let actual = (record.added(), record.updated(), record.unchanged());
    if actual != (added, updated, unchanged) {
        return Err(eyre::eyre!(
            "expected ({added}, {updated}, {unchanged}) added/updated/unchanged, found {actual:?}"
        ));
    }
    Ok(())
}

#[then("the destination holds {count:usize} tasks")]
fn destination_holds(world: &SyncWorld, count: usize) -> Result<(), eyre::Report> {
    let actual = world
        .destination
        .len()
        .wrap_err("read destination size")?;
    if actual != count {
        return Err(eyre::eyre!(
            "expected {count} destination tasks, found {actual}"
        ));
    }
    Ok(())
}

#[then(r#"destination task "{id}" is titled "{title}""#)]
fn destination_task_titled(
    world: &SyncWorld,
    id: String,
    title: String,
) -> Result<(), eyre::Report> {
    let task_id = TaskId::new(id).wrap_err("parse scenario task id")?;
    let task = world
        .destination
        .get(&task_id)
        .wrap_err("read destination task")?
        .ok_or_else(|| eyre::eyre!("task {task_id} missing from destination"))?;
    if task.title() != title {
        return Err(eyre::eyre!(
            "expected title '{title}', found '{}'",
            task.title()
        ));
    }
    Ok(())
}

#[then("the total sync count is {count:u64}")]
fn total_sync_count(world: &SyncWorld, count: u64) -> Result<(), eyre::Report> {
    let actual = world.service.get_stats().total_syncs;
    if actual != count {
        return Err(eyre::eyre!("expected {count} completed syncs, found {actual}"));
    }
    Ok(())
}

#[then("the sync fails with a source fetch error")]
fn sync_fails_with_source_fetch_error(world: &SyncWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_sync_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing sync result in scenario world"))?;

    if !matches!(
        result,
        Err(SyncError::Fetch {
            side: SnapshotSide::Source,
            ..
        })
    ) {
        return Err(eyre::eyre!("expected source fetch error, got {result:?}"));
    }
    Ok(())
}

#[then("the history holds {count:usize} failed entry")]
fn history_holds_failed(world: &SyncWorld, count: usize) -> Result<(), eyre::Report> {
    let history = world
        .service
        .get_history(None)
        .wrap_err("read default history window")?;
    let failed = history
        .iter()
        .filter(|entry| !entry.success() && entry.error().is_some())
        .count();
    if failed != count || history.len() != count {
        return Err(eyre::eyre!(
            "expected {count} failed entries, found {failed} of {}",
            history.len()
        ));
    }
    Ok(())
}

#[then("the history request is rejected")]
fn history_request_rejected(world: &SyncWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_history_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing history result in scenario world"))?;

    if !matches!(
        result,
        Err(SyncError::Validation(
            TaskDomainError::InvalidHistoryLimit(0)
        ))
    ) {
        return Err(eyre::eyre!("expected invalid limit error, got {result:?}"));
    }
    Ok(())
}
