//! `PostgreSQL` repository implementation for task storage.

use super::{
    models::{NewTaskAssignmentRow, NewTaskRow, TaskAssignmentRow, TaskRow},
    schema::{task_assignments, tasks},
};
use crate::client::domain::{ClientId, ProjectId};
use crate::identity::domain::UserId;
use crate::task::{
    domain::{PersistedTaskData, Task, TaskId, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use std::collections::{BTreeSet, HashMap};
use uuid::Uuid;

/// `PostgreSQL` connection pool type used by the task adapter.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task repository.
///
/// Assignments live in a separate `task_assignments` table; updates
/// reconcile the assignment set inside the same transaction as the task
/// row, leaving rows for retained workers untouched so `assigned_at`
/// survives unrelated edits.
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
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let new_row = task_to_new_row(task);
        let assignment_rows = task_to_assignment_rows(task);

        self.run_blocking(move |connection| {
            connection
                .transaction(|connection| {
                    diesel::insert_into(tasks::table)
                        .values(&new_row)
                        .execute(connection)?;
                    diesel::insert_into(task_assignments::table)
                        .values(&assignment_rows)
                        .execute(connection)?;
                    Ok(())
                })
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let row = task_to_new_row(task);
        let desired: BTreeSet<Uuid> = task
            .assignees()
            .iter()
            .map(|worker_id| worker_id.into_inner())
            .collect();
        let assigned_at = task.updated_at();

        self.run_blocking(move |connection| {
            let affected = connection
                .transaction(|connection| {
                    let affected =
                        diesel::update(tasks::table.filter(tasks::id.eq(task_id.into_inner())))
                            .set((
                                tasks::project_id.eq(row.project_id),
                                tasks::title.eq(&row.title),
                                tasks::description.eq(&row.description),
                                tasks::due_on.eq(row.due_on),
                                tasks::status.eq(&row.status),
                                tasks::updated_at.eq(row.updated_at),
                            ))
                            .execute(connection)?;
                    let existing: BTreeSet<Uuid> = task_assignments::table
                        .filter(task_assignments::task_id.eq(task_id.into_inner()))
                        .select(task_assignments::user_id)
                        .load::<Uuid>(connection)?
                        .into_iter()
                        .collect();
                    let (removed, added) =
                        assignment_changes(task_id, &desired, &existing, assigned_at);
                    if !removed.is_empty() {
                        diesel::delete(
                            task_assignments::table
                                .filter(task_assignments::task_id.eq(task_id.into_inner()))
                                .filter(task_assignments::user_id.eq_any(&removed)),
                        )
                        .execute(connection)?;
                    }
                    if !added.is_empty() {
                        diesel::insert_into(task_assignments::table)
                            .values(&added)
                            .execute(connection)?;
                    }
                    Ok::<usize, DieselError>(affected)
                })
                .map_err(TaskRepositoryError::persistence)?;
            if affected == 0 {
                return Err(TaskRepositoryError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            let Some(row) = row else {
                return Ok(None);
            };
            let assignments = task_assignments::table
                .filter(task_assignments::task_id.eq(id.into_inner()))
                .select(TaskAssignmentRow::as_select())
                .load::<TaskAssignmentRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            let assignees = assignments
                .into_iter()
                .map(|assignment| UserId::from_uuid(assignment.user_id))
                .collect();
            row_to_task(row, assignees).map(Some)
        })
        .await
    }

    async fn list_all(&self) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .order(tasks::created_at.asc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            hydrate_tasks(connection, rows)
        })
        .await
    }

    async fn list_for_client(&self, client_id: ClientId) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::client_id.eq(client_id.into_inner()))
                .order(tasks::created_at.asc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            hydrate_tasks(connection, rows)
        })
        .await
    }

    async fn list_for_worker(&self, worker_id: UserId) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .inner_join(task_assignments::table)
                .filter(task_assignments::user_id.eq(worker_id.into_inner()))
                .order(tasks::created_at.asc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            hydrate_tasks(connection, rows)
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let affected = connection
                .transaction(|connection| {
                    diesel::delete(
                        task_assignments::table
                            .filter(task_assignments::task_id.eq(id.into_inner())),
                    )
                    .execute(connection)?;
                    diesel::delete(tasks::table.filter(tasks::id.eq(id.into_inner())))
                        .execute(connection)
                })
                .map_err(TaskRepositoryError::persistence)?;
            if affected == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }
}

fn hydrate_tasks(
    connection: &mut PgConnection,
    rows: Vec<TaskRow>,
) -> TaskRepositoryResult<Vec<Task>> {
    let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
    let assignments = task_assignments::table
        .filter(task_assignments::task_id.eq_any(&ids))
        .select(TaskAssignmentRow::as_select())
        .load::<TaskAssignmentRow>(connection)
        .map_err(TaskRepositoryError::persistence)?;

    let mut by_task: HashMap<Uuid, BTreeSet<UserId>> = HashMap::new();
    for assignment in assignments {
        by_task
            .entry(assignment.task_id)
            .or_default()
            .insert(UserId::from_uuid(assignment.user_id));
    }

    rows.into_iter()
        .map(|row| {
            let assignees = by_task.remove(&row.id).unwrap_or_default();
            row_to_task(row, assignees)
        })
        .collect()
}

fn task_to_new_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().into_inner(),
        client_id: task.client_id().into_inner(),
        project_id: task.project_id().map(ProjectId::into_inner),
        title: task.title().to_owned(),
        description: task.description().map(str::to_owned),
        due_on: task.due_on(),
        status: task.status().as_str().to_owned(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

fn task_to_assignment_rows(task: &Task) -> Vec<NewTaskAssignmentRow> {
    task.assignees()
        .iter()
        .map(|worker_id| NewTaskAssignmentRow {
            task_id: task.id().into_inner(),
            user_id: worker_id.into_inner(),
            assigned_at: task.updated_at(),
        })
        .collect()
}

/// Splits the desired assignee set against the persisted one into rows to
/// delete and rows to insert; workers present in both sets are untouched.
pub(crate) fn assignment_changes(
    task_id: TaskId,
    desired: &BTreeSet<Uuid>,
    existing: &BTreeSet<Uuid>,
    assigned_at: DateTime<Utc>,
) -> (Vec<Uuid>, Vec<NewTaskAssignmentRow>) {
    let removed = existing.difference(desired).copied().collect();
    let added = desired
        .difference(existing)
        .map(|user_id| NewTaskAssignmentRow {
            task_id: task_id.into_inner(),
            user_id: *user_id,
            assigned_at,
        })
        .collect();
    (removed, added)
}

fn row_to_task(row: TaskRow, assignees: BTreeSet<UserId>) -> TaskRepositoryResult<Task> {
    let status =
        TaskStatus::try_from(row.status.as_str()).map_err(TaskRepositoryError::persistence)?;
    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(row.id),
        client_id: ClientId::from_uuid(row.client_id),
        project_id: row.project_id.map(ProjectId::from_uuid),
        title: row.title,
        description: row.description,
        due_on: row.due_on,
        status,
        assignees,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}
