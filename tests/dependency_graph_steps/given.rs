//! Given steps for dependency graph BDD scenarios.

use super::world::{DependencyGraphWorld, run_async};
use eyre::WrapErr;
use gtd_core::workflow::services::{TaskRequest, UserRequest};
use rstest_bdd_macros::given;

#[given(r#"a user "{username}" with tasks "{first}" and "{second}""#)]
fn user_with_tasks(
    world: &mut DependencyGraphWorld,
    username: String,
    first: String,
    second: String,
) -> Result<(), eyre::Report> {
    let email = format!("{username}@example.com");
    let owner = run_async(world.users.create(UserRequest::new(username, email)))
        .wrap_err("create user for dependency scenario")?
        .id();
    for title in [first, second] {
        let task = run_async(
            world
                .tasks
                .create(TaskRequest::new(owner, title.as_str(), "next")),
        )
        .wrap_err("create task for dependency scenario")?;
        world.task_ids.insert(title, task.id());
    }
    Ok(())
}

#[given(r#""{dependent}" depends on "{prerequisite}""#)]
fn existing_edge(
    world: &mut DependencyGraphWorld,
    dependent: String,
    prerequisite: String,
) -> Result<(), eyre::Report> {
    let task_id = world.task(&dependent)?;
    let depends_on = world.task(&prerequisite)?;
    run_async(world.graph.create(task_id, depends_on)).wrap_err("seed dependency edge")?;
    Ok(())
}
