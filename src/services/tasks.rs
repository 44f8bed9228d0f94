//! Service layer for task CRUD and hierarchy enforcement.
//!
//! [`TaskService`] is the single place business rules live: name
//! normalisation and date truncation on the way in, parent existence and
//! cycle guards on writes, and the no-children rule on deletion. The
//! repository underneath is a dumb store.

use crate::domain::{ProjectId, Task, TaskDomainError, TaskDraft, TaskId, TaskName, UserId};
use crate::ports::{TaskRepository, TaskRepositoryError};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a task.
///
/// Carries raw wire-level values; validation into domain types happens in
/// [`TaskService::create`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    name: String,
    project_id: i64,
    user_id: i64,
    parent_id: Option<i64>,
    is_parent: bool,
    start_date: Option<DateTime<Utc>>,
    end_date: Option<DateTime<Utc>>,
    priority: Option<i16>,
    status: Option<i16>,
}

impl CreateTaskRequest {
    /// Creates a request with required task fields.
    #[must_use]
    pub fn new(name: impl Into<String>, project_id: i64, user_id: i64) -> Self {
        Self {
            name: name.into(),
            project_id,
            user_id,
            parent_id: None,
            is_parent: false,
            start_date: None,
            end_date: None,
            priority: None,
            status: None,
        }
    }

    /// Sets the parent task reference.
    #[must_use]
    pub const fn with_parent(mut self, parent_id: i64) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Sets the caller-declared parent-task intent flag.
    #[must_use]
    pub const fn with_parent_flag(mut self, is_parent: bool) -> Self {
        self.is_parent = is_parent;
        self
    }

    /// Sets the scheduled start timestamp. Only the date survives storage.
    #[must_use]
    pub const fn with_start_date(mut self, start_date: DateTime<Utc>) -> Self {
        self.start_date = Some(start_date);
        self
    }

    /// Sets the scheduled end timestamp. Only the date survives storage.
    #[must_use]
    pub const fn with_end_date(mut self, end_date: DateTime<Utc>) -> Self {
        self.end_date = Some(end_date);
        self
    }

    /// Sets the priority code.
    #[must_use]
    pub const fn with_priority(mut self, priority: i16) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the status code.
    #[must_use]
    pub const fn with_status(mut self, status: i16) -> Self {
        self.status = Some(status);
        self
    }
}

/// Request payload for fully replacing an existing task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaceTaskRequest {
    id: i64,
    body: CreateTaskRequest,
}

impl ReplaceTaskRequest {
    /// Wraps a create-shaped body with the identifier of the task to
    /// replace.
    #[must_use]
    pub const fn new(id: i64, body: CreateTaskRequest) -> Self {
        Self { id, body }
    }
}

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// Domain validation failed (empty name, zero id).
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),

    /// The supplied parent id does not reference an existing task.
    #[error("unknown parent task: {0}")]
    UnknownParent(TaskId),

    /// The supplied parent assignment would make the task its own ancestor.
    #[error("parent assignment would create a cycle through task {0}")]
    HierarchyCycle(TaskId),

    /// Deletion was attempted on a task that still has children.
    #[error("task '{name}' has child tasks")]
    HasChildren {
        /// Identifier of the blocking task.
        id: TaskId,
        /// Name of the blocking task, for the user-facing conflict message.
        name: TaskName,
    },
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Task CRUD and hierarchy orchestration service.
#[derive(Clone)]
pub struct TaskService<R>
where
    R: TaskRepository,
{
    repository: Arc<R>,
}

impl<R> TaskService<R>
where
    R: TaskRepository,
{
    /// Creates a new task service.
    #[must_use]
    pub const fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Creates a new task, assigning a fresh identifier.
    ///
    /// The name is uppercased and timestamps are truncated to their date
    /// component before persistence. A supplied parent must already exist;
    /// a brand-new task cannot close a cycle, so no further hierarchy check
    /// is needed here.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Domain`] for a missing or oversized name,
    /// [`TaskServiceError::UnknownParent`] for a dangling parent reference,
    /// or [`TaskServiceError::Repository`] when persistence fails.
    pub async fn create(&self, request: CreateTaskRequest) -> TaskServiceResult<Task> {
        let (draft, parent_id) = validate_body(request)?;
        if let Some(parent) = parent_id {
            self.require_exists(parent).await?;
        }
        Ok(self.repository.insert(&draft).await?)
    }

    /// Replaces every mutable field of an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Domain`] when the id is zero/negative or
    /// the body fails validation, [`TaskServiceError::UnknownParent`] or
    /// [`TaskServiceError::HierarchyCycle`] when the parent assignment is
    /// invalid, and [`TaskServiceError::Repository`] with
    /// [`TaskRepositoryError::NotFound`] when no task has the given id. The
    /// store is unchanged on any failure.
    pub async fn replace(&self, request: ReplaceTaskRequest) -> TaskServiceResult<()> {
        let ReplaceTaskRequest { id, body } = request;
        let task_id = TaskId::new(id)?;
        let (draft, parent_id) = validate_body(body)?;

        if let Some(parent) = parent_id {
            self.require_acyclic(task_id, parent).await?;
        }

        let task = Task::from_draft(task_id, draft);
        Ok(self.repository.update(&task).await?)
    }

    /// Deletes a task that has no children.
    ///
    /// The children check and the removal are two separate store calls, so
    /// the sequence is not atomic under concurrent writers; closing that
    /// window needs a transaction at the adapter boundary.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] with
    /// [`TaskRepositoryError::NotFound`] when the task does not exist, or
    /// [`TaskServiceError::HasChildren`] naming the blocking task when
    /// children are present.
    pub async fn delete(&self, id: TaskId) -> TaskServiceResult<()> {
        let task = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(TaskRepositoryError::NotFound(id))?;

        if self.repository.has_children(id).await? {
            return Err(TaskServiceError::HasChildren {
                id,
                name: task.name().clone(),
            });
        }

        Ok(self.repository.delete(id).await?)
    }

    /// Returns true when the task currently has at least one direct child,
    /// meaning deletion must be blocked.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the store query fails.
    pub async fn has_children(&self, id: TaskId) -> TaskServiceResult<bool> {
        Ok(self.repository.has_children(id).await?)
    }

    /// Retrieves a task by identifier.
    ///
    /// Returns `Ok(None)` when no task has the given id.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the store query fails.
    pub async fn find_by_id(&self, id: TaskId) -> TaskServiceResult<Option<Task>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Returns every task, in store-defined order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the store query fails.
    pub async fn list_all(&self) -> TaskServiceResult<Vec<Task>> {
        Ok(self.repository.list_all().await?)
    }

    /// Returns all tasks belonging to the given project.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the store query fails.
    pub async fn list_by_project(&self, project_id: ProjectId) -> TaskServiceResult<Vec<Task>> {
        Ok(self.repository.list_by_project(project_id).await?)
    }

    /// Returns all root tasks (tasks without a parent).
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the store query fails.
    pub async fn list_roots(&self) -> TaskServiceResult<Vec<Task>> {
        Ok(self.repository.list_roots().await?)
    }

    /// Rejects parent references to tasks that do not exist.
    async fn require_exists(&self, parent: TaskId) -> TaskServiceResult<()> {
        if self.repository.find_by_id(parent).await?.is_none() {
            return Err(TaskServiceError::UnknownParent(parent));
        }
        Ok(())
    }

    /// Rejects a parent assignment that would make `task_id` its own
    /// ancestor.
    ///
    /// Walks the ancestor chain starting at the proposed parent. The walk
    /// terminates because the stored forest is acyclic: every existing chain
    /// ends at a root.
    async fn require_acyclic(&self, task_id: TaskId, parent: TaskId) -> TaskServiceResult<()> {
        self.require_exists(parent).await?;

        let mut cursor = Some(parent);
        while let Some(ancestor) = cursor {
            if ancestor == task_id {
                return Err(TaskServiceError::HierarchyCycle(task_id));
            }
            cursor = self
                .repository
                .find_by_id(ancestor)
                .await?
                .and_then(|task| task.parent_id());
        }
        Ok(())
    }
}

/// Validates a wire-level body into a draft plus the parsed parent id.
///
/// Name normalisation (uppercasing) and timestamp truncation to date-only
/// granularity both happen here, on every write path.
fn validate_body(request: CreateTaskRequest) -> TaskServiceResult<(TaskDraft, Option<TaskId>)> {
    let CreateTaskRequest {
        name,
        project_id,
        user_id,
        parent_id,
        is_parent,
        start_date,
        end_date,
        priority,
        status,
    } = request;

    let task_name = TaskName::new(name)?;
    let parsed_parent = parent_id.map(TaskId::new).transpose()?;

    let mut draft = TaskDraft::new(task_name, ProjectId::new(project_id), UserId::new(user_id))
        .with_parent_flag(is_parent)
        .with_schedule(
            start_date.map(|timestamp| timestamp.date_naive()),
            end_date.map(|timestamp| timestamp.date_naive()),
        );
    if let Some(parent) = parsed_parent {
        draft = draft.with_parent(parent);
    }
    if let Some(code) = priority {
        draft = draft.with_priority(code);
    }
    if let Some(code) = status {
        draft = draft.with_status(code);
    }

    Ok((draft, parsed_parent))
}
