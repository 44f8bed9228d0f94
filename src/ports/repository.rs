//! Repository port for task persistence, lookup, and hierarchy queries.

use crate::domain::{ProjectId, Task, TaskDraft, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// Implementations are dumb stores: every hierarchy rule beyond the
/// direct-children query lives in the service layer. Each call is atomic on
/// its own; sequences of calls (check-then-delete) are not.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Persists a draft, assigning the next identifier from the store's
    /// monotonic sequence, and returns the materialised task.
    ///
    /// Identifiers are never reused, even after deletion.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the store fails.
    async fn insert(&self, draft: &TaskDraft) -> TaskRepositoryResult<Task>;

    /// Replaces every mutable field of an existing task. The identifier is
    /// immutable and selects the row.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when no task has the given
    /// identifier; the store is left unchanged.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Removes a task from the store.
    ///
    /// The no-children precondition is the caller's responsibility; see
    /// [`TaskRepository::has_children`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when no task has the given
    /// identifier.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns every task, in store-defined order.
    async fn list_all(&self) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns all tasks belonging to the given project; empty when none.
    async fn list_by_project(&self, project_id: ProjectId) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns all tasks without a parent, the roots of the forest.
    async fn list_roots(&self) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns true when at least one task references the given identifier
    /// as its parent.
    ///
    /// Only direct children are considered; existence of one is enough and
    /// the subtree is never materialised. True means deletion of the task
    /// must be blocked.
    async fn has_children(&self, id: TaskId) -> TaskRepositoryResult<bool>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a data-quality error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
