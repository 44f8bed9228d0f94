//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::NaiveDate;
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Store-assigned task identifier.
    pub id: i64,
    /// Task name, stored uppercase.
    pub task_name: String,
    /// Optional parent task reference.
    pub parent_task_id: Option<i64>,
    /// Caller-declared parent-task intent flag.
    pub is_parent_task: bool,
    /// External project reference.
    pub project_id: i64,
    /// External user/assignee reference.
    pub user_id: i64,
    /// Optional scheduled start date.
    pub start_date: Option<NaiveDate>,
    /// Optional scheduled end date.
    pub end_date: Option<NaiveDate>,
    /// Optional priority code.
    pub priority: Option<i16>,
    /// Optional status code.
    pub status: Option<i16>,
}

/// Insert model for task records.
///
/// The `id` column is absent: the database sequence assigns it and the
/// insert returns the materialised row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task name, stored uppercase.
    pub task_name: String,
    /// Optional parent task reference.
    pub parent_task_id: Option<i64>,
    /// Caller-declared parent-task intent flag.
    pub is_parent_task: bool,
    /// External project reference.
    pub project_id: i64,
    /// External user/assignee reference.
    pub user_id: i64,
    /// Optional scheduled start date.
    pub start_date: Option<NaiveDate>,
    /// Optional scheduled end date.
    pub end_date: Option<NaiveDate>,
    /// Optional priority code.
    pub priority: Option<i16>,
    /// Optional status code.
    pub status: Option<i16>,
}
