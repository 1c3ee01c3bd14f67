//! Account and role storage: eager role loading and constraint mapping.

use crate::postgres::helpers::{RepositoryContext, repositories};
use mockable::Clock;
use rstest::rstest;
use workday::user::{
    domain::{EmailAddress, NewRole, RoleId, RoleSlug, UserId},
    ports::{RoleRepository, UserRepository, UserRepositoryError},
};

#[rstest]
fn role_is_loaded_with_the_user(repositories: RepositoryContext) {
    let ctx = repositories;
    let manager = ctx.seed_role(RoleSlug::manager());
    let stored = ctx.seed_user("lead@example.com", Some(manager.id));
    assert_eq!(stored.role(), Some(&manager));

    let by_id = ctx
        .rt
        .block_on(ctx.users.find_by_id(stored.id()))
        .expect("lookup by id")
        .expect("user should exist");
    let email = EmailAddress::new("lead@example.com").expect("valid email");
    let by_email = ctx
        .rt
        .block_on(ctx.users.find_by_email(&email))
        .expect("lookup by email")
        .expect("user should exist");

    assert_eq!(by_id, stored);
    assert_eq!(by_email, stored);
    assert_eq!(by_id.role_id(), Some(manager.id));
}

#[rstest]
fn roleless_user_survives_the_left_join(repositories: RepositoryContext) {
    let ctx = repositories;
    let stored = ctx.seed_user("solo@example.com", None);

    let found = ctx
        .rt
        .block_on(ctx.users.find_by_id(stored.id()))
        .expect("lookup")
        .expect("user should exist");

    assert_eq!(found.role(), None);
    assert_eq!(found.created_at(), ctx.clock.utc());
}

#[rstest]
fn missing_accounts_are_none(repositories: RepositoryContext) {
    let ctx = repositories;
    let email = EmailAddress::new("nobody@example.com").expect("valid email");

    assert!(
        ctx.rt
            .block_on(ctx.users.find_by_id(UserId::new(1)))
            .expect("lookup by id")
            .is_none()
    );
    assert!(
        ctx.rt
            .block_on(ctx.users.find_by_email(&email))
            .expect("lookup by email")
            .is_none()
    );
}

#[rstest]
fn duplicate_email_is_rejected(repositories: RepositoryContext) {
    let ctx = repositories;
    ctx.seed_user("taken@example.com", None);

    let outcome = ctx
        .rt
        .block_on(ctx.users.create(&ctx.new_user("taken@example.com", None)));

    assert!(matches!(
        outcome,
        Err(UserRepositoryError::DuplicateEmail(email)) if email.as_str() == "taken@example.com"
    ));
}

#[rstest]
fn dangling_role_reference_is_unknown_role(repositories: RepositoryContext) {
    let ctx = repositories;
    let missing = RoleId::new(777);

    let outcome = ctx.rt.block_on(
        ctx.users
            .create(&ctx.new_user("lost@example.com", Some(missing))),
    );

    assert!(matches!(
        outcome,
        Err(UserRepositoryError::UnknownRole(role)) if role == missing
    ));
}

#[rstest]
fn duplicate_role_slug_is_rejected(repositories: RepositoryContext) {
    let ctx = repositories;
    let first = ctx.seed_role(RoleSlug::technician());
    assert_eq!(first.created_at, ctx.clock.utc());

    let again =
        NewRole::new("Technician again", RoleSlug::technician(), &ctx.clock).expect("valid role");
    let outcome = ctx.rt.block_on(ctx.users.create_role(&again));

    assert!(matches!(
        outcome,
        Err(UserRepositoryError::DuplicateRole(slug)) if slug == RoleSlug::technician()
    ));
    let found = ctx
        .rt
        .block_on(ctx.users.find_role_by_slug(&RoleSlug::technician()))
        .expect("lookup")
        .expect("role should exist");
    assert_eq!(found, first);
}
