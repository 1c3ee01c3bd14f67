//! `PostgreSQL` repository implementation for user and role storage.

use super::{
    models::{NewRoleRow, NewUserRow, RoleRow, UserRow},
    schema::{roles, users},
};
use crate::user::{
    domain::{
        DisplayName, EmailAddress, NewRole, NewUser, PasswordHash, PersistedUserData, Role,
        RoleId, RoleSlug, User, UserId,
    },
    ports::{RoleRepository, UserRepository, UserRepositoryError, UserRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by user adapters.
pub type UserPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed user and role repository.
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: UserPgPool,
}

impl PostgresUserRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: UserPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> UserRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> UserRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(UserRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(UserRepositoryError::persistence)?
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>> {
        self.run_blocking(move |connection| {
            let row = users::table
                .left_join(roles::table)
                .filter(users::id.eq(id.value()))
                .select((UserRow::as_select(), Option::<RoleRow>::as_select()))
                .first::<(UserRow, Option<RoleRow>)>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?;
            row.map(|(user, role)| row_to_user(user, role)).transpose()
        })
        .await
    }

    async fn find_by_email(&self, email: &EmailAddress) -> UserRepositoryResult<Option<User>> {
        let lookup_email = email.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = users::table
                .left_join(roles::table)
                .filter(users::email.eq(lookup_email))
                .select((UserRow::as_select(), Option::<RoleRow>::as_select()))
                .first::<(UserRow, Option<RoleRow>)>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?;
            row.map(|(user, role)| row_to_user(user, role)).transpose()
        })
        .await
    }

    async fn create(&self, user: &NewUser) -> UserRepositoryResult<User> {
        let email = user.email().clone();
        let role_id = user.role_id();
        let new_row = NewUserRow {
            name: user.name().as_str().to_owned(),
            email: email.as_str().to_owned(),
            password_hash: user.password_hash().as_str().to_owned(),
            role_id: role_id.map(RoleId::value),
            created_at: user.created_at(),
            updated_at: user.created_at(),
        };

        self.run_blocking(move |connection| {
            let row = diesel::insert_into(users::table)
                .values(&new_row)
                .returning(UserRow::as_returning())
                .get_result::<UserRow>(connection)
                .map_err(|err| match (err, role_id) {
                    (DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _), _) => {
                        UserRepositoryError::DuplicateEmail(email.clone())
                    }
                    (
                        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _),
                        Some(missing_role),
                    ) => UserRepositoryError::UnknownRole(missing_role),
                    (other, _) => UserRepositoryError::persistence(other),
                })?;

            let role = match row.role_id {
                Some(stored_role_id) => roles::table
                    .find(stored_role_id)
                    .select(RoleRow::as_select())
                    .first::<RoleRow>(connection)
                    .optional()
                    .map_err(UserRepositoryError::persistence)?,
                None => None,
            };
            row_to_user(row, role)
        })
        .await
    }
}

#[async_trait]
impl RoleRepository for PostgresUserRepository {
    async fn find_role_by_slug(&self, slug: &RoleSlug) -> UserRepositoryResult<Option<Role>> {
        let lookup_slug = slug.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = roles::table
                .filter(roles::slug.eq(lookup_slug))
                .select(RoleRow::as_select())
                .first::<RoleRow>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?;
            row.map(row_to_role).transpose()
        })
        .await
    }

    async fn create_role(&self, role: &NewRole) -> UserRepositoryResult<Role> {
        let slug = role.slug().clone();
        let new_row = NewRoleRow {
            label: role.label().to_owned(),
            slug: slug.as_str().to_owned(),
            created_at: role.created_at(),
            updated_at: role.created_at(),
        };

        self.run_blocking(move |connection| {
            let row = diesel::insert_into(roles::table)
                .values(&new_row)
                .returning(RoleRow::as_returning())
                .get_result::<RoleRow>(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        UserRepositoryError::DuplicateRole(slug.clone())
                    }
                    other => UserRepositoryError::persistence(other),
                })?;
            row_to_role(row)
        })
        .await
    }
}

fn row_to_role(row: RoleRow) -> UserRepositoryResult<Role> {
    let slug = RoleSlug::new(row.slug).map_err(UserRepositoryError::persistence)?;
    Ok(Role {
        id: RoleId::new(row.id),
        label: row.label,
        slug,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn row_to_user(row: UserRow, role: Option<RoleRow>) -> UserRepositoryResult<User> {
    let UserRow {
        id,
        name,
        email,
        password_hash,
        role_id,
        created_at,
        updated_at,
    } = row;

    let data = PersistedUserData {
        id: UserId::new(id),
        name: DisplayName::new(name).map_err(UserRepositoryError::persistence)?,
        email: EmailAddress::new(email).map_err(UserRepositoryError::persistence)?,
        password_hash: PasswordHash::new(password_hash),
        role_id: role_id.map(RoleId::new),
        role: role.map(row_to_role).transpose()?,
        created_at,
        updated_at,
    };
    Ok(User::from_persisted(data))
}
