//! Then steps for project completion BDD scenarios.

use super::world::ProjectCompletionWorld;
use gtd_core::workflow::services::WorkflowError;
use rstest_bdd_macros::then;

#[then("the project has a completion timestamp")]
fn has_completion_timestamp(world: &ProjectCompletionWorld) -> Result<(), eyre::Report> {
    let project = world.project()?;
    eyre::ensure!(
        project.completed_at().is_some(),
        "expected a completion timestamp on {:?}",
        project
    );
    Ok(())
}

#[then("the project has no completion timestamp")]
fn has_no_completion_timestamp(world: &ProjectCompletionWorld) -> Result<(), eyre::Report> {
    let project = world.project()?;
    eyre::ensure!(
        project.completed_at().is_none(),
        "expected no completion timestamp, found {:?}",
        project.completed_at()
    );
    Ok(())
}

#[then("the completion timestamp is unchanged")]
fn completion_unchanged(world: &ProjectCompletionWorld) -> Result<(), eyre::Report> {
    let project = world.project()?;
    eyre::ensure!(
        world.previous_completed_at.is_some(),
        "scenario never recorded a completion timestamp"
    );
    eyre::ensure!(
        project.completed_at() == world.previous_completed_at,
        "expected {:?}, found {:?}",
        world.previous_completed_at,
        project.completed_at()
    );
    Ok(())
}

#[then("the update fails with an invalid status error")]
fn update_fails_with_invalid_status(world: &ProjectCompletionWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_update
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing update result"))?;
    if !matches!(result, Err(WorkflowError::InvalidStatus(_))) {
        return Err(eyre::eyre!("expected InvalidStatus error, got {result:?}"));
    }
    Ok(())
}
