//! When steps for task access BDD scenarios.

use super::world::{TaskAccessWorld, run_async};
use rstest_bdd_macros::when;

#[when(r#""{name}" reads the task"#)]
fn reads_the_task(world: &mut TaskAccessWorld, name: String) -> Result<(), eyre::Report> {
    let actor = world.actor(&name)?;
    let id = world.task()?;
    let result = run_async(world.service.get(id, &actor));
    world.last_read = Some(result);
    Ok(())
}

#[when(r#""{name}" changes the summary to "{summary}""#)]
fn changes_the_summary(
    world: &mut TaskAccessWorld,
    name: String,
    summary: String,
) -> Result<(), eyre::Report> {
    let actor = world.actor(&name)?;
    let id = world.task()?;
    let request = TaskAccessWorld::request("Pump repair", &summary);
    if let Err(err) = run_async(world.service.update(id, request, &actor)) {
        world.last_failure = Some(err);
    }
    Ok(())
}

#[when(r#""{name}" deletes the task"#)]
fn deletes_the_task(world: &mut TaskAccessWorld, name: String) -> Result<(), eyre::Report> {
    let actor = world.actor(&name)?;
    let id = world.task()?;
    run_async(world.service.delete(id, &actor)).map_err(|err| eyre::eyre!("delete failed: {err}"))
}

#[when(r#""{name}" lists tasks"#)]
fn lists_tasks(world: &mut TaskAccessWorld, name: String) -> Result<(), eyre::Report> {
    let actor = world.actor(&name)?;
    let views = run_async(world.service.list(&actor))
        .map_err(|err| eyre::eyre!("listing failed: {err}"))?;
    world.last_listing = Some(views);
    Ok(())
}
