//! In-memory task repository for tests and local flows.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::task::{
    domain::{NewTask, Task, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use crate::user::domain::UserId;

/// Thread-safe in-memory task repository.
///
/// Owner references are not checked.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: BTreeMap<TaskId, Task>,
    last_id: i64,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read_state(&self) -> TaskRepositoryResult<RwLockReadGuard<'_, InMemoryTaskState>> {
        self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write_state(&self) -> TaskRepositoryResult<RwLockWriteGuard<'_, InMemoryTaskState>> {
        self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.read_state()?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn find_all(&self) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read_state()?;
        Ok(state.tasks.values().cloned().collect())
    }

    async fn find_by_owner(&self, owner: UserId) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read_state()?;
        Ok(state
            .tasks
            .values()
            .filter(|task| task.owner() == owner)
            .cloned()
            .collect())
    }

    async fn create(&self, task: &NewTask) -> TaskRepositoryResult<Task> {
        let mut state = self.write_state()?;
        state.last_id += 1;
        let id = TaskId::new(state.last_id);
        let stored = Task::from_new(id, task.clone());
        state.tasks.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.write_state()?;
        let slot = state
            .tasks
            .get_mut(&task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?;
        *slot = task.clone();
        Ok(())
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let mut state = self.write_state()?;
        state
            .tasks
            .remove(&id)
            .map(|_| ())
            .ok_or(TaskRepositoryError::NotFound(id))
    }
}
