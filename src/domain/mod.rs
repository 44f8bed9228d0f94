//! Domain model for hierarchical task management.
//!
//! The task domain models a forest of tasks: every task has at most one
//! parent and any number of children. Value types validate at construction
//! so that an invalid task name or identifier cannot exist past the domain
//! boundary. All infrastructure concerns are kept outside the domain.

mod error;
mod ids;
mod name;
mod task;

pub use error::TaskDomainError;
pub use ids::{ProjectId, TaskId, UserId};
pub use name::TaskName;
pub use task::{PersistedTaskData, Task, TaskDraft};
