//! When steps for carry-forward BDD scenarios.

use std::sync::Arc;

use super::world::{CarryForwardWorld, run_async};
use carryover::task::services::{CarryForwardService, RetryPolicy};
use mockable::DefaultClock;
use rstest_bdd_macros::when;

fn run(world: &mut CarryForwardWorld, dry_run: bool) -> Result<(), eyre::Report> {
    let service = CarryForwardService::new(
        Arc::new(world.store.clone()),
        Arc::new(DefaultClock),
        world.owners.clone(),
    )
    .with_retry(RetryPolicy::immediate(3))
    .with_dry_run(dry_run);
    let today = CarryForwardWorld::today()?;
    world.last_result = Some(run_async(service.run_for(today)));
    Ok(())
}

#[when("the carry-forward runs")]
fn carry_forward_runs(world: &mut CarryForwardWorld) -> Result<(), eyre::Report> {
    run(world, false)
}

#[when("the carry-forward dry run runs")]
fn carry_forward_dry_run(world: &mut CarryForwardWorld) -> Result<(), eyre::Report> {
    run(world, true)
}
