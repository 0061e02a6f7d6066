//! Given steps for sync cycle BDD scenarios.

use super::world::SyncWorld;
use eyre::WrapErr;
use mockable::DefaultClock;
use rstest_bdd_macros::given;
use task_sync::sync::domain::{TaskId, TaskRecord};

fn build_task(id: &str, title: String) -> Result<TaskRecord, eyre::Report> {
    let task_id = TaskId::new(id).wrap_err("parse scenario task id")?;
    TaskRecord::new(task_id, title, &DefaultClock).wrap_err("build scenario task")
}

#[given(r#"a source task "{id}" titled "{title}""#)]
fn source_task(world: &mut SyncWorld, id: String, title: String) -> Result<(), eyre::Report> {
    let task = build_task(&id, title)?;
    world
        .source
        .store
        .upsert(task)
        .wrap_err("seed source store")?;
    Ok(())
}

#[given(r#"a destination task "{id}" titled "{title}""#)]
fn destination_task(
    world: &mut SyncWorld,
    id: String,
    title: String,
) -> Result<(), eyre::Report> {
    let task = build_task(&id, title)?;
    world
        .destination
        .upsert(task)
        .wrap_err("seed destination store")?;
    Ok(())
}

#[given("the source system is unavailable")]
fn source_unavailable(world: &mut SyncWorld) {
    world.source.go_offline();
}
