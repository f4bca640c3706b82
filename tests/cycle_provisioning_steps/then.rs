//! Then steps for cycle provisioning BDD scenarios.

use super::world::{CycleWorld, run_async};
use percurso::board::{ports::BoardRepository, services::BoardServiceError};
use rstest_bdd_macros::then;

#[then(r#"the cycle status is "{status}""#)]
fn cycle_status_is(world: &CycleWorld, status: String) -> Result<(), eyre::Report> {
    let provisioned = world.provisioned()?;
    let actual = provisioned.cycle.status().as_str();
    if actual != status {
        return Err(eyre::eyre!("expected status {status}, found {actual}"));
    }
    Ok(())
}

#[then(r#"the cycle has the columns "{names}" in order"#)]
fn cycle_has_columns(world: &CycleWorld, names: String) -> Result<(), eyre::Report> {
    let provisioned = world.provisioned()?;
    let stored = run_async(world.service.columns_of(provisioned.cycle.id()))
        .map_err(|err| eyre::eyre!("column listing failed: {err}"))?;
    let expected: Vec<&str> = names.split(',').map(str::trim).collect();
    let actual: Vec<&str> = stored.iter().map(|column| column.name()).collect();
    if actual != expected {
        return Err(eyre::eyre!("expected columns {expected:?}, found {actual:?}"));
    }
    let ranks: Vec<u32> = stored.iter().map(|column| column.sequence().value()).collect();
    let dense: Vec<u32> = (1..=u32::try_from(stored.len())?).collect();
    if ranks != dense {
        return Err(eyre::eyre!("expected dense column ranks, found {ranks:?}"));
    }
    Ok(())
}

#[then("provisioning is rejected as invalid")]
fn provisioning_rejected(world: &CycleWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing provisioning result in scenario world"))?;
    if !matches!(result, Err(BoardServiceError::InvalidState(_))) {
        return Err(eyre::eyre!("expected an invalid state error, got {result:?}"));
    }
    Ok(())
}

#[then("provisioning fails with a retryable error")]
fn provisioning_fails_retryably(world: &CycleWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing provisioning result in scenario world"))?;
    match result {
        Err(err) if err.is_retryable() => Ok(()),
        other => Err(eyre::eyre!("expected a retryable failure, got {other:?}")),
    }
}

#[then("the project has no cycles")]
fn project_has_no_cycles(world: &CycleWorld) -> Result<(), eyre::Report> {
    let cycles = run_async(world.repository.cycles_of(world.project_id))
        .map_err(|err| eyre::eyre!("cycle listing failed: {err}"))?;
    if !cycles.is_empty() {
        return Err(eyre::eyre!("expected no cycles, found {}", cycles.len()));
    }
    Ok(())
}
