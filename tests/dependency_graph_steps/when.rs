//! When steps for dependency graph BDD scenarios.

use super::world::{DependencyGraphWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;

#[when(r#""{dependent}" is made to depend on "{prerequisite}""#)]
fn make_dependency(
    world: &mut DependencyGraphWorld,
    dependent: String,
    prerequisite: String,
) -> Result<(), eyre::Report> {
    let task_id = world.task(&dependent)?;
    let depends_on = world.task(&prerequisite)?;
    world.last_create = Some(run_async(world.graph.create(task_id, depends_on)));
    Ok(())
}

#[when(r#"task "{title}" is deleted with its dependencies"#)]
fn delete_with_dependencies(
    world: &mut DependencyGraphWorld,
    title: String,
) -> Result<(), eyre::Report> {
    let task_id = world.task(&title)?;
    let removed =
        run_async(world.tasks.delete_cascading(task_id)).wrap_err("cascading task delete")?;
    world.removed_edges = Some(removed);
    Ok(())
}
