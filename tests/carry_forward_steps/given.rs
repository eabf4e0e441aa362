//! Given steps for carry-forward BDD scenarios.

use super::world::CarryForwardWorld;
use carryover::task::{
    adapters::memory::Fault,
    domain::RawTaskRecord,
    ports::{StoreOperation, TaskStoreError},
};
use eyre::WrapErr;
use rstest_bdd_macros::given;

fn record_yesterday(
    world: &mut CarryForwardWorld,
    owner: &str,
    title: &str,
    completed: Option<bool>,
) -> Result<(), eyre::Report> {
    world.next_record += 1;
    let mut record = RawTaskRecord::new(format!("page-{}", world.next_record))
        .with_title(title)
        .with_owner(owner)
        .with_date(CarryForwardWorld::yesterday()?);
    record.completed = completed;
    world
        .store
        .insert(record)
        .wrap_err("seed yesterday's task")
}

#[given(r#"owner "{owner}" had an incomplete task "{title}" yesterday"#)]
fn incomplete_task_yesterday(
    world: &mut CarryForwardWorld,
    owner: String,
    title: String,
) -> Result<(), eyre::Report> {
    record_yesterday(world, &owner, &title, Some(false))
}

#[given(r#"owner "{owner}" had a completed task "{title}" yesterday"#)]
fn completed_task_yesterday(
    world: &mut CarryForwardWorld,
    owner: String,
    title: String,
) -> Result<(), eyre::Report> {
    record_yesterday(world, &owner, &title, Some(true))
}

#[given(r#"owner "{owner}" had a task "{title}" yesterday without a completion flag"#)]
fn malformed_task_yesterday(
    world: &mut CarryForwardWorld,
    owner: String,
    title: String,
) -> Result<(), eyre::Report> {
    record_yesterday(world, &owner, &title, None)
}

#[given("the task store is unreachable for fetches")]
fn store_unreachable(world: &mut CarryForwardWorld) -> Result<(), eyre::Report> {
    let fault = Fault::new(TaskStoreError::Unavailable("connection refused".to_owned()));
    world
        .store
        .inject(StoreOperation::FetchTasks, fault)
        .wrap_err("inject fetch outage")
}

#[given("the task store drops the first {count:usize} fetches")]
fn store_drops_fetches(world: &mut CarryForwardWorld, count: usize) -> Result<(), eyre::Report> {
    let fault = Fault::new(TaskStoreError::Unavailable("timed out".to_owned())).times(count);
    world
        .store
        .inject(StoreOperation::FetchTasks, fault)
        .wrap_err("inject brief fetch outage")
}

#[given("the task store fails creates after {count:usize} successful writes")]
fn store_fails_creates(world: &mut CarryForwardWorld, count: usize) -> Result<(), eyre::Report> {
    let fault = Fault::new(TaskStoreError::Rejected {
        status: 400,
        message: "validation failed".to_owned(),
    })
    .after(count);
    world
        .store
        .inject(StoreOperation::CreateTask, fault)
        .wrap_err("inject create failure")
}

#[given("the task store fails fetches after {count:usize} successful reads")]
fn store_fails_fetches_after(
    world: &mut CarryForwardWorld,
    count: usize,
) -> Result<(), eyre::Report> {
    let fault = Fault::new(TaskStoreError::Unavailable("connection reset".to_owned())).after(count);
    world
        .store
        .inject(StoreOperation::FetchTasks, fault)
        .wrap_err("inject late fetch outage")
}
