//! Diesel schema for task persistence.
//!
//! The `id` column is a `BIGSERIAL`; the sequence is owned by the database
//! and is never rewound, so deleted identifiers are not reused. The
//! `parent_task_id` column carries a self-referencing foreign key.

diesel::table! {
    /// Task records forming a parent/child forest.
    tasks (id) {
        /// Store-assigned task identifier.
        id -> BigInt,
        /// Task name, stored uppercase.
        #[max_length = 100]
        task_name -> Varchar,
        /// Optional reference to the parent task; NULL marks a root.
        parent_task_id -> Nullable<BigInt>,
        /// Caller-declared parent-task intent flag.
        is_parent_task -> Bool,
        /// External project reference.
        project_id -> BigInt,
        /// External user/assignee reference.
        user_id -> BigInt,
        /// Optional scheduled start date (date-only).
        start_date -> Nullable<Date>,
        /// Optional scheduled end date (date-only).
        end_date -> Nullable<Date>,
        /// Optional priority code, uninterpreted.
        priority -> Nullable<SmallInt>,
        /// Optional status code, uninterpreted.
        status -> Nullable<SmallInt>,
    }
}
