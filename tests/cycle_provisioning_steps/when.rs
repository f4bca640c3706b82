//! When steps for cycle provisioning BDD scenarios.

use super::world::{CycleWorld, run_async};
use rstest_bdd_macros::when;

#[when("the cycle is provisioned")]
fn provision_cycle(world: &mut CycleWorld) -> Result<(), eyre::Report> {
    let request = world
        .pending_request
        .clone()
        .ok_or_else(|| eyre::eyre!("missing pending request in scenario world"))?;
    world.last_result = Some(run_async(world.service.provision_cycle(request)));
    Ok(())
}
