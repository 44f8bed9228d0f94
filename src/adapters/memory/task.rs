//! Thread-safe in-memory task repository.
//!
//! Reference implementation of the repository contract, used by the test
//! suites and as a stand-in store during development. Identifier assignment
//! mirrors the relational adapter: a monotonic sequence starting at 1 that
//! never hands out the same value twice, deletions included.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::domain::{ProjectId, Task, TaskDraft, TaskId};
use crate::ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};

/// Thread-safe in-memory task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug)]
struct InMemoryTaskState {
    tasks: BTreeMap<TaskId, Task>,
    next_id: i64,
}

impl Default for InMemoryTaskState {
    fn default() -> Self {
        Self {
            tasks: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_poisoned<T>(err: std::sync::PoisonError<T>) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn insert(&self, draft: &TaskDraft) -> TaskRepositoryResult<Task> {
        let mut state = self.state.write().map_err(lock_poisoned)?;

        let id = TaskId::new(state.next_id).map_err(TaskRepositoryError::persistence)?;
        state.next_id += 1;

        let task = Task::from_draft(id, draft.clone());
        state.tasks.insert(id, task.clone());
        Ok(task)
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;

        if !state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::NotFound(task.id()));
        }

        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;

        // The id sequence is not rewound; deleted ids are never reissued.
        state
            .tasks
            .remove(&id)
            .map(|_| ())
            .ok_or(TaskRepositoryError::NotFound(id))
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn list_all(&self) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state.tasks.values().cloned().collect())
    }

    async fn list_by_project(&self, project_id: ProjectId) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state
            .tasks
            .values()
            .filter(|task| task.project_id() == project_id)
            .cloned()
            .collect())
    }

    async fn list_roots(&self) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state
            .tasks
            .values()
            .filter(|task| task.is_root())
            .cloned()
            .collect())
    }

    async fn has_children(&self, id: TaskId) -> TaskRepositoryResult<bool> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state
            .tasks
            .values()
            .any(|task| task.parent_id() == Some(id)))
    }
}
