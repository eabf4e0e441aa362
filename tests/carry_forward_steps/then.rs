//! Then steps for carry-forward BDD scenarios.

use super::world::CarryForwardWorld;
use carryover::task::{
    domain::RunStatus,
    ports::StoreOperation,
    services::CarryForwardError,
};
use rstest_bdd_macros::then;

#[then("the run succeeds")]
fn run_succeeds(world: &CarryForwardWorld) -> Result<(), eyre::Report> {
    world
        .result()?
        .as_ref()
        .map(|_| ())
        .map_err(|err| eyre::eyre!("unexpected run failure: {err}"))
}

#[then("the run fails with a validation error")]
fn run_fails_validation(world: &CarryForwardWorld) -> Result<(), eyre::Report> {
    match world.result()? {
        Err(CarryForwardError::Validation(_)) => Ok(()),
        other => Err(eyre::eyre!("expected validation error, got {other:?}")),
    }
}

#[then("the run fails because the store is unavailable")]
fn run_fails_unavailable(world: &CarryForwardWorld) -> Result<(), eyre::Report> {
    match world.result()? {
        Err(CarryForwardError::RemoteUnavailable {
            operation: StoreOperation::FetchTasks,
            ..
        }) => Ok(()),
        other => Err(eyre::eyre!("expected unavailable store, got {other:?}")),
    }
}

#[then("the run stops after {count:usize} successful writes")]
fn run_stops_after_writes(world: &CarryForwardWorld, count: usize) -> Result<(), eyre::Report> {
    match world.result()? {
        Err(CarryForwardError::PartialWrite { written, .. }) if *written == count => Ok(()),
        other => Err(eyre::eyre!(
            "expected partial write of {count}, got {other:?}"
        )),
    }
}

#[then("the store holds {count:usize} carried tasks for today")]
fn store_holds_carried(world: &CarryForwardWorld, count: usize) -> Result<(), eyre::Report> {
    let today = CarryForwardWorld::today()?;
    let created = world.store.created();
    if created.len() != count {
        return Err(eyre::eyre!(
            "expected {count} carried tasks, found {}",
            created.len()
        ));
    }
    if let Some(draft) = created.iter().find(|draft| draft.date() != today) {
        return Err(eyre::eyre!("task {} was carried to {}", draft.title(), draft.date()));
    }
    Ok(())
}

#[then("the carried tasks are all incomplete")]
fn carried_tasks_incomplete(world: &CarryForwardWorld) -> Result<(), eyre::Report> {
    if world.store.created().iter().any(|draft| draft.completed()) {
        return Err(eyre::eyre!("a carried task was created as completed"));
    }
    Ok(())
}

#[then(r#"the logged run status is "{status}""#)]
fn logged_status(world: &CarryForwardWorld, status: String) -> Result<(), eyre::Report> {
    let expected = RunStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("bad status in scenario: {err}"))?;
    let entry = world.logged_entry()?;
    if entry.status() != expected {
        return Err(eyre::eyre!(
            "expected {} log entry, found {}",
            expected.as_str(),
            entry.status().as_str()
        ));
    }
    Ok(())
}

#[then("the logged carried count is {count:usize}")]
fn logged_carried_count(world: &CarryForwardWorld, count: usize) -> Result<(), eyre::Report> {
    let carried = world.logged_entry()?.carried_count();
    if carried != count {
        return Err(eyre::eyre!("expected {count} carried in log, found {carried}"));
    }
    Ok(())
}

#[then("the store was asked for tasks {count:usize} times")]
fn fetch_attempts(world: &CarryForwardWorld, count: usize) -> Result<(), eyre::Report> {
    let calls = world.store.calls(StoreOperation::FetchTasks);
    if calls != count {
        return Err(eyre::eyre!("expected {count} fetch attempts, found {calls}"));
    }
    Ok(())
}

#[then("no run log is written")]
fn no_run_log(world: &CarryForwardWorld) -> Result<(), eyre::Report> {
    let logs = world.store.logs();
    if !logs.is_empty() {
        return Err(eyre::eyre!("expected no log entries, found {}", logs.len()));
    }
    Ok(())
}

#[then("the reported carried count is {count:usize}")]
fn reported_carried_count(world: &CarryForwardWorld, count: usize) -> Result<(), eyre::Report> {
    let entry = world
        .result()?
        .as_ref()
        .map_err(|err| eyre::eyre!("unexpected run failure: {err}"))?;
    if entry.carried_count() != count {
        return Err(eyre::eyre!(
            "expected {count} reported as carried, found {}",
            entry.carried_count()
        ));
    }
    Ok(())
}
