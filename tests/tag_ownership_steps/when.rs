//! When steps for tag ownership BDD scenarios.

use super::world::{TagOwnershipWorld, run_async};
use rstest_bdd_macros::when;

#[when(r#""{actor}" tags "{title}" with the tag of "{tag_owner}""#)]
fn tag_task(
    world: &mut TagOwnershipWorld,
    actor: String,
    title: String,
    tag_owner: String,
) -> Result<(), eyre::Report> {
    let actor_id = world.user(&actor)?;
    let (_, task_id) = world.task(&title)?;
    let tag_id = world
        .tag_by_owner
        .get(&tag_owner)
        .copied()
        .ok_or_else(|| eyre::eyre!("{tag_owner} owns no tag in scenario"))?;
    world.last_tagging = Some(run_async(world.tagging.add_tag(actor_id, task_id, tag_id)));
    Ok(())
}
