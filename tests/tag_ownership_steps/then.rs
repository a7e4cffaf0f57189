//! Then steps for tag ownership BDD scenarios.

use super::world::{TagOwnershipWorld, run_async};
use eyre::WrapErr;
use gtd_core::workflow::services::WorkflowError;
use rstest_bdd_macros::then;

#[then("the tagging fails as not found")]
fn tagging_not_found(world: &TagOwnershipWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_tagging
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing tagging result"))?;
    if !matches!(result, Err(WorkflowError::NotFound(_))) {
        return Err(eyre::eyre!("expected NotFound error, got {result:?}"));
    }
    Ok(())
}

#[then("the tagging succeeds")]
fn tagging_succeeds(world: &TagOwnershipWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_tagging
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing tagging result"))?;
    if let Err(err) = result {
        return Err(eyre::eyre!("expected tagging to succeed, got {err}"));
    }
    Ok(())
}

#[then("the task tag count is {count:usize}")]
fn task_tag_count(world: &TagOwnershipWorld, count: usize) -> Result<(), eyre::Report> {
    let (owner, task_id) = world
        .task_ids
        .values()
        .next()
        .copied()
        .ok_or_else(|| eyre::eyre!("scenario created no task"))?;
    let tags = run_async(world.tagging.list_tags(owner, task_id)).wrap_err("list task tags")?;
    eyre::ensure!(
        tags.len() == count,
        "expected {count} tags, found {}",
        tags.len()
    );
    Ok(())
}
