//! `PostgreSQL` repository implementation for task storage.

use super::{
    models::{NewTaskRow, TaskRow},
    schema::tasks,
};
use crate::domain::{PersistedTaskData, ProjectId, Task, TaskDraft, TaskId, TaskName, UserId};
use crate::ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn insert(&self, draft: &TaskDraft) -> TaskRepositoryResult<Task> {
        let new_row = to_new_row(draft);

        self.run_blocking(move |connection| {
            let row = diesel::insert_into(tasks::table)
                .values(&new_row)
                .returning(TaskRow::as_returning())
                .get_result::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            row_to_task(row)
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let changes = to_new_row_from_task(task);

        self.run_blocking(move |connection| {
            let updated_count =
                diesel::update(tasks::table.filter(tasks::id.eq(task_id.value())))
                    .set((
                        tasks::task_name.eq(&changes.task_name),
                        tasks::parent_task_id.eq(changes.parent_task_id),
                        tasks::is_parent_task.eq(changes.is_parent_task),
                        tasks::project_id.eq(changes.project_id),
                        tasks::user_id.eq(changes.user_id),
                        tasks::start_date.eq(changes.start_date),
                        tasks::end_date.eq(changes.end_date),
                        tasks::priority.eq(changes.priority),
                        tasks::status.eq(changes.status),
                    ))
                    .execute(connection)
                    .map_err(TaskRepositoryError::persistence)?;

            if updated_count == 0 {
                return Err(TaskRepositoryError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted_count =
                diesel::delete(tasks::table.filter(tasks::id.eq(id.value())))
                    .execute(connection)
                    .map_err(TaskRepositoryError::persistence)?;

            if deleted_count == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.value()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list_all(&self) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn list_by_project(&self, project_id: ProjectId) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::project_id.eq(project_id.value()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn list_roots(&self) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::parent_task_id.is_null())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn has_children(&self, id: TaskId) -> TaskRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            diesel::select(exists(
                tasks::table.filter(tasks::parent_task_id.eq(id.value())),
            ))
            .get_result::<bool>(connection)
            .map_err(TaskRepositoryError::persistence)
        })
        .await
    }
}

fn to_new_row(draft: &TaskDraft) -> NewTaskRow {
    NewTaskRow {
        task_name: draft.name().as_str().to_owned(),
        parent_task_id: draft.parent_id().map(TaskId::value),
        is_parent_task: draft.is_parent(),
        project_id: draft.project_id().value(),
        user_id: draft.user_id().value(),
        start_date: draft.start_date(),
        end_date: draft.end_date(),
        priority: draft.priority(),
        status: draft.status(),
    }
}

fn to_new_row_from_task(task: &Task) -> NewTaskRow {
    NewTaskRow {
        task_name: task.name().as_str().to_owned(),
        parent_task_id: task.parent_id().map(TaskId::value),
        is_parent_task: task.is_parent(),
        project_id: task.project_id().value(),
        user_id: task.user_id().value(),
        start_date: task.start_date(),
        end_date: task.end_date(),
        priority: task.priority(),
        status: task.status(),
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        task_name,
        parent_task_id,
        is_parent_task,
        project_id,
        user_id,
        start_date,
        end_date,
        priority,
        status,
    } = row;

    let parsed_id = TaskId::new(id).map_err(TaskRepositoryError::invalid_persisted_data)?;
    // Stored names are already uppercase, so re-validation is lossless.
    let parsed_name =
        TaskName::new(task_name).map_err(TaskRepositoryError::invalid_persisted_data)?;
    let parsed_parent = parent_task_id
        .map(TaskId::new)
        .transpose()
        .map_err(TaskRepositoryError::invalid_persisted_data)?;

    let data = PersistedTaskData {
        id: parsed_id,
        name: parsed_name,
        parent_id: parsed_parent,
        is_parent: is_parent_task,
        project_id: ProjectId::new(project_id),
        user_id: UserId::new(user_id),
        start_date,
        end_date,
        priority,
        status,
    };
    Ok(Task::from_persisted(data))
}
