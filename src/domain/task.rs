//! Task aggregate root and its unsaved draft form.

use super::{ProjectId, TaskId, TaskName, UserId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A validated task that has not yet been persisted.
///
/// Drafts carry every field except the identifier, which the backing store
/// assigns on insertion. Dates are already date-only here: truncation of
/// caller-supplied timestamps happens at the service boundary, so the type
/// cannot smuggle a time component into storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDraft {
    name: TaskName,
    parent_id: Option<TaskId>,
    is_parent: bool,
    project_id: ProjectId,
    user_id: UserId,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    priority: Option<i16>,
    status: Option<i16>,
}

impl TaskDraft {
    /// Creates a root-level draft with required fields.
    #[must_use]
    pub const fn new(name: TaskName, project_id: ProjectId, user_id: UserId) -> Self {
        Self {
            name,
            parent_id: None,
            is_parent: false,
            project_id,
            user_id,
            start_date: None,
            end_date: None,
            priority: None,
            status: None,
        }
    }

    /// Sets the parent task reference.
    #[must_use]
    pub const fn with_parent(mut self, parent_id: TaskId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Sets the caller-declared parent-task intent flag.
    ///
    /// The flag is not derived from the existence of children; it records
    /// what the caller declared on creation.
    #[must_use]
    pub const fn with_parent_flag(mut self, is_parent: bool) -> Self {
        self.is_parent = is_parent;
        self
    }

    /// Sets the scheduled start and end dates.
    #[must_use]
    pub const fn with_schedule(
        mut self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Self {
        self.start_date = start_date;
        self.end_date = end_date;
        self
    }

    /// Sets the priority code. The value is opaque to this crate.
    #[must_use]
    pub const fn with_priority(mut self, priority: i16) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the status code. The value is opaque to this crate.
    #[must_use]
    pub const fn with_status(mut self, status: i16) -> Self {
        self.status = Some(status);
        self
    }

    /// Returns the task name.
    #[must_use]
    pub const fn name(&self) -> &TaskName {
        &self.name
    }

    /// Returns the parent task reference, if any.
    #[must_use]
    pub const fn parent_id(&self) -> Option<TaskId> {
        self.parent_id
    }

    /// Returns the caller-declared parent-task flag.
    #[must_use]
    pub const fn is_parent(&self) -> bool {
        self.is_parent
    }

    /// Returns the owning project reference.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the assignee reference.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the scheduled start date, if any.
    #[must_use]
    pub const fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    /// Returns the scheduled end date, if any.
    #[must_use]
    pub const fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    /// Returns the priority code, if any.
    #[must_use]
    pub const fn priority(&self) -> Option<i16> {
        self.priority
    }

    /// Returns the status code, if any.
    #[must_use]
    pub const fn status(&self) -> Option<i16> {
        self.status
    }
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted task name.
    pub name: TaskName,
    /// Persisted parent task reference, if any.
    pub parent_id: Option<TaskId>,
    /// Persisted parent-task intent flag.
    pub is_parent: bool,
    /// Persisted project reference.
    pub project_id: ProjectId,
    /// Persisted assignee reference.
    pub user_id: UserId,
    /// Persisted start date, if any.
    pub start_date: Option<NaiveDate>,
    /// Persisted end date, if any.
    pub end_date: Option<NaiveDate>,
    /// Persisted priority code, if any.
    pub priority: Option<i16>,
    /// Persisted status code, if any.
    pub status: Option<i16>,
}

/// Task aggregate root.
///
/// A task always carries a store-assigned identifier; construction goes
/// through [`Task::from_draft`] (adapter assigning a fresh id) or
/// [`Task::from_persisted`] (reconstruction from storage).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    #[serde(flatten)]
    draft: TaskDraft,
}

impl Task {
    /// Materialises a draft with its store-assigned identifier.
    #[must_use]
    pub const fn from_draft(id: TaskId, draft: TaskDraft) -> Self {
        Self { id, draft }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            draft: TaskDraft {
                name: data.name,
                parent_id: data.parent_id,
                is_parent: data.is_parent,
                project_id: data.project_id,
                user_id: data.user_id,
                start_date: data.start_date,
                end_date: data.end_date,
                priority: data.priority,
                status: data.status,
            },
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task name.
    #[must_use]
    pub const fn name(&self) -> &TaskName {
        self.draft.name()
    }

    /// Returns the parent task reference, if any.
    #[must_use]
    pub const fn parent_id(&self) -> Option<TaskId> {
        self.draft.parent_id()
    }

    /// Returns true when the task has no parent.
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.draft.parent_id().is_none()
    }

    /// Returns the caller-declared parent-task flag.
    #[must_use]
    pub const fn is_parent(&self) -> bool {
        self.draft.is_parent()
    }

    /// Returns the owning project reference.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.draft.project_id()
    }

    /// Returns the assignee reference.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.draft.user_id()
    }

    /// Returns the scheduled start date, if any.
    #[must_use]
    pub const fn start_date(&self) -> Option<NaiveDate> {
        self.draft.start_date()
    }

    /// Returns the scheduled end date, if any.
    #[must_use]
    pub const fn end_date(&self) -> Option<NaiveDate> {
        self.draft.end_date()
    }

    /// Returns the priority code, if any.
    #[must_use]
    pub const fn priority(&self) -> Option<i16> {
        self.draft.priority()
    }

    /// Returns the status code, if any.
    #[must_use]
    pub const fn status(&self) -> Option<i16> {
        self.draft.status()
    }
}
