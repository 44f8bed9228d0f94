//! Orchestration services consumed by the transport boundary.

mod tasks;

pub use tasks::{
    CreateTaskRequest, ReplaceTaskRequest, TaskService, TaskServiceError, TaskServiceResult,
};
