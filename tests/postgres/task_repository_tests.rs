//! Task storage against a real schema: ordering, owner filtering and the
//! foreign-key and missing-row error mappings.

use crate::postgres::helpers::{RepositoryContext, repositories};
use chrono::TimeDelta;
use mockable::Clock;
use rstest::rstest;
use workday::confidentiality::Envelope;
use workday::task::{
    domain::{TaskId, TaskTitle},
    ports::{TaskRepository, TaskRepositoryError},
};
use workday::user::domain::{RoleSlug, UserId};

#[rstest]
fn created_task_reads_back_unchanged(repositories: RepositoryContext) {
    let ctx = repositories;
    let owner = ctx.seed_user("owner@example.com", None);

    let stored = ctx
        .rt
        .block_on(ctx.tasks.create(&ctx.new_task("Fix boiler", owner.id())))
        .expect("task insert");
    let found = ctx
        .rt
        .block_on(ctx.tasks.find_by_id(stored.id()))
        .expect("lookup")
        .expect("task should exist");

    assert_eq!(found, stored);
    assert_eq!(found.summary().as_str(), "sealed:Fix boiler");
    assert_eq!(found.created_at(), ctx.clock.utc());
}

#[rstest]
fn listings_are_ordered_and_filtered_by_owner(repositories: RepositoryContext) {
    let ctx = repositories;
    let manager = ctx.seed_role(RoleSlug::manager());
    let alice = ctx.seed_user("alice@example.com", Some(manager.id));
    let bob = ctx.seed_user("bob@example.com", None);

    let mut created = Vec::new();
    for (title, owner) in [("first", alice.id()), ("second", bob.id()), ("third", alice.id())] {
        let task = ctx
            .rt
            .block_on(ctx.tasks.create(&ctx.new_task(title, owner)))
            .expect("task insert");
        created.push(task.id());
    }

    let all: Vec<TaskId> = ctx
        .rt
        .block_on(ctx.tasks.find_all())
        .expect("list all")
        .iter()
        .map(|task| task.id())
        .collect();
    assert_eq!(all, created);

    let owned: Vec<String> = ctx
        .rt
        .block_on(ctx.tasks.find_by_owner(alice.id()))
        .expect("list owned")
        .iter()
        .map(|task| task.title().as_str().to_owned())
        .collect();
    assert_eq!(owned, vec!["first".to_owned(), "third".to_owned()]);
}

#[rstest]
fn task_for_missing_owner_is_unknown_owner(repositories: RepositoryContext) {
    let ctx = repositories;
    let ghost = UserId::new(4_242);

    let outcome = ctx
        .rt
        .block_on(ctx.tasks.create(&ctx.new_task("Orphan", ghost)));

    assert!(matches!(
        outcome,
        Err(TaskRepositoryError::UnknownOwner(owner)) if owner == ghost
    ));
}

#[rstest]
fn update_persists_revised_fields(repositories: RepositoryContext) {
    let ctx = repositories;
    let owner = ctx.seed_user("owner@example.com", None);
    let mut task = ctx
        .rt
        .block_on(ctx.tasks.create(&ctx.new_task("Draft", owner.id())))
        .expect("task insert");

    let performed_at = ctx.clock.utc() - TimeDelta::days(1);
    task.revise(
        TaskTitle::new("Final").expect("valid title"),
        Envelope::from_stored("sealed:revised".to_owned()),
        performed_at,
        &ctx.clock,
    );
    ctx.rt
        .block_on(ctx.tasks.update(&task))
        .expect("update should succeed");

    let found = ctx
        .rt
        .block_on(ctx.tasks.find_by_id(task.id()))
        .expect("lookup")
        .expect("task should exist");
    assert_eq!(found.title().as_str(), "Final");
    assert_eq!(found.summary().as_str(), "sealed:revised");
    assert_eq!(found.performed_at(), performed_at);
    assert_eq!(found.owner(), owner.id());
}

#[rstest]
fn writes_to_a_deleted_task_are_not_found(repositories: RepositoryContext) {
    let ctx = repositories;
    let owner = ctx.seed_user("owner@example.com", None);
    let task = ctx
        .rt
        .block_on(ctx.tasks.create(&ctx.new_task("Short-lived", owner.id())))
        .expect("task insert");

    ctx.rt
        .block_on(ctx.tasks.delete(task.id()))
        .expect("first delete succeeds");

    assert!(
        ctx.rt
            .block_on(ctx.tasks.find_by_id(task.id()))
            .expect("lookup")
            .is_none()
    );
    assert!(matches!(
        ctx.rt.block_on(ctx.tasks.update(&task)),
        Err(TaskRepositoryError::NotFound(id)) if id == task.id()
    ));
    assert!(matches!(
        ctx.rt.block_on(ctx.tasks.delete(task.id())),
        Err(TaskRepositoryError::NotFound(id)) if id == task.id()
    ));
}
