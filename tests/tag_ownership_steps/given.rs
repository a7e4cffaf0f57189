//! Given steps for tag ownership BDD scenarios.

use super::world::{TagOwnershipWorld, run_async};
use eyre::WrapErr;
use gtd_core::workflow::services::{TagRequest, TaskRequest, UserRequest};
use rstest_bdd_macros::given;

#[given(r#"users "{first}" and "{second}""#)]
fn two_users(
    world: &mut TagOwnershipWorld,
    first: String,
    second: String,
) -> Result<(), eyre::Report> {
    for username in [first, second] {
        let email = format!("{username}@example.com");
        let user = run_async(world.users.create(UserRequest::new(username.as_str(), email)))
            .wrap_err("create user for tagging scenario")?;
        world.user_ids.insert(username, user.id());
    }
    Ok(())
}

#[given(r#""{owner}" owns a task "{title}""#)]
fn owns_task(
    world: &mut TagOwnershipWorld,
    owner: String,
    title: String,
) -> Result<(), eyre::Report> {
    let owner_id = world.user(&owner)?;
    let task = run_async(
        world
            .tasks
            .create(TaskRequest::new(owner_id, title.as_str(), "next")),
    )
    .wrap_err("create task for tagging scenario")?;
    world.task_ids.insert(title, (owner_id, task.id()));
    Ok(())
}

#[given(r#""{owner}" owns a tag "{name}""#)]
fn owns_tag(
    world: &mut TagOwnershipWorld,
    owner: String,
    name: String,
) -> Result<(), eyre::Report> {
    let owner_id = world.user(&owner)?;
    let tag = run_async(world.catalog.create_tag(TagRequest::new(owner_id, name)))
        .wrap_err("create tag for tagging scenario")?;
    world.tag_by_owner.insert(owner, tag.id());
    Ok(())
}
