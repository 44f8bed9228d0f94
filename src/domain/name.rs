//! Validated task name type.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for a task name, matching the `VARCHAR(100)` column.
const MAX_NAME_LENGTH: usize = 100;

/// Validated, uppercase task name.
///
/// Task names are stored uppercase regardless of input casing; construction
/// is the single place the normalisation happens, so a lowercase name cannot
/// exist past the domain boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskName(String);

impl TaskName {
    /// Creates a validated task name.
    ///
    /// The input is trimmed and uppercased.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTaskName`] when the value is empty
    /// after trimming, or [`TaskDomainError::TaskNameTooLong`] when it
    /// exceeds 100 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let normalized = raw.trim().to_uppercase();

        if normalized.is_empty() {
            return Err(TaskDomainError::EmptyTaskName);
        }

        if normalized.chars().count() > MAX_NAME_LENGTH {
            return Err(TaskDomainError::TaskNameTooLong(raw));
        }

        Ok(Self(normalized))
    }

    /// Returns the task name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
