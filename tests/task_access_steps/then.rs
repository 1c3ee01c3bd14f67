//! Then steps for task access BDD scenarios.

use super::world::TaskAccessWorld;
use rstest_bdd_macros::then;

#[then(r#"the read succeeds with summary "{summary}""#)]
fn read_succeeds(world: &TaskAccessWorld, summary: String) -> Result<(), eyre::Report> {
    let result = world
        .last_read
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing read result"))?;
    let view = result
        .as_ref()
        .map_err(|err| eyre::eyre!("expected a successful read, got {err:?}"))?;

    if view.summary.as_str() != summary {
        return Err(eyre::eyre!(
            "expected summary {summary:?}, found {:?}",
            view.summary.as_str()
        ));
    }
    Ok(())
}

#[then(r#"the request fails as "{kind}""#)]
fn request_fails_as(world: &TaskAccessWorld, kind: String) -> Result<(), eyre::Report> {
    let failure = match (&world.last_read, &world.last_failure) {
        (Some(Err(err)), _) | (_, Some(err)) => err,
        _ => return Err(eyre::eyre!("expected a failed request")),
    };

    if failure.kind().as_str() != kind {
        return Err(eyre::eyre!(
            "expected {kind} failure, got {} ({failure})",
            failure.kind()
        ));
    }
    Ok(())
}

#[then("the listing has {count:usize} task")]
fn listing_has(world: &TaskAccessWorld, count: usize) -> Result<(), eyre::Report> {
    let listing = world
        .last_listing
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing listing"))?;

    if listing.len() != count {
        return Err(eyre::eyre!(
            "expected {count} tasks, found {}",
            listing.len()
        ));
    }
    Ok(())
}
