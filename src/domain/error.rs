//! Error types for task domain validation.

use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task name is empty after trimming.
    #[error("task name must not be empty")]
    EmptyTaskName,

    /// The task name exceeds the 100-character column limit.
    #[error("task name '{0}' exceeds 100 characters")]
    TaskNameTooLong(String),

    /// The task identifier is zero or negative.
    #[error("invalid task id {0}, expected a positive integer")]
    InvalidTaskId(i64),
}
