//! `PostgreSQL` repository implementation for task storage.

use super::{
    models::{NewTaskRow, TaskChangeset, TaskRow},
    schema::tasks,
};
use crate::confidentiality::Envelope;
use crate::task::{
    domain::{NewTask, PersistedTaskData, Task, TaskId, TaskTitle},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use crate::user::domain::UserId;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .find(id.value())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn find_all(&self) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            tasks::table
                .order(tasks::id.asc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?
                .into_iter()
                .map(row_to_task)
                .collect()
        })
        .await
    }

    async fn find_by_owner(&self, owner: UserId) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            tasks::table
                .filter(tasks::owner_id.eq(owner.value()))
                .order(tasks::id.asc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?
                .into_iter()
                .map(row_to_task)
                .collect()
        })
        .await
    }

    async fn create(&self, task: &NewTask) -> TaskRepositoryResult<Task> {
        let owner = task.owner();
        let new_row = NewTaskRow {
            title: task.title().as_str().to_owned(),
            summary: task.summary().as_str().to_owned(),
            performed_at: task.performed_at(),
            owner_id: owner.value(),
            created_at: task.created_at(),
            updated_at: task.created_at(),
        };

        self.run_blocking(move |connection| {
            let row = diesel::insert_into(tasks::table)
                .values(&new_row)
                .returning(TaskRow::as_returning())
                .get_result::<TaskRow>(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                        TaskRepositoryError::UnknownOwner(owner)
                    }
                    other => TaskRepositoryError::persistence(other),
                })?;
            row_to_task(row)
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let changes = TaskChangeset {
            title: task.title().as_str().to_owned(),
            summary: task.summary().as_str().to_owned(),
            performed_at: task.performed_at(),
            updated_at: task.updated_at(),
        };

        self.run_blocking(move |connection| {
            let updated = diesel::update(tasks::table.find(task_id.value()))
                .set(&changes)
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if updated == 0 {
                return Err(TaskRepositoryError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(tasks::table.find(id.value()))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if deleted == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        title,
        summary,
        performed_at,
        owner_id,
        created_at,
        updated_at,
    } = row;

    let data = PersistedTaskData {
        id: TaskId::new(id),
        title: TaskTitle::new(title).map_err(TaskRepositoryError::persistence)?,
        summary: Envelope::from_stored(summary),
        performed_at,
        owner: UserId::new(owner_id),
        created_at,
        updated_at,
    };
    Ok(Task::from_persisted(data))
}
