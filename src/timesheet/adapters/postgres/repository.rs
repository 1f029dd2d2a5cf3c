//! `PostgreSQL` repository implementation for timesheet storage.

use super::{
    models::{NewTimesheetEntryRow, TimesheetEntryRow},
    schema::timesheet_entries,
};
use crate::identity::domain::UserId;
use crate::task::domain::TaskId;
use crate::timesheet::{
    domain::{PersistedTimesheetEntryData, TimesheetEntry, TimesheetEntryId},
    ports::{
        TimesheetFilter, TimesheetRepository, TimesheetRepositoryError, TimesheetRepositoryResult,
    },
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by the timesheet adapter.
pub type TimesheetPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed timesheet repository.
#[derive(Debug, Clone)]
pub struct PostgresTimesheetRepository {
    pool: TimesheetPgPool,
}

impl PostgresTimesheetRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TimesheetPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TimesheetRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TimesheetRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TimesheetRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TimesheetRepositoryError::persistence)?
    }
}

#[async_trait]
impl TimesheetRepository for PostgresTimesheetRepository {
    async fn store(&self, entry: &TimesheetEntry) -> TimesheetRepositoryResult<()> {
        let entry_id = entry.id();
        let new_row = entry_to_new_row(entry)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(timesheet_entries::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TimesheetRepositoryError::DuplicateEntry(entry_id)
                    }
                    _ => TimesheetRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(
        &self,
        id: TimesheetEntryId,
    ) -> TimesheetRepositoryResult<Option<TimesheetEntry>> {
        self.run_blocking(move |connection| {
            let row = timesheet_entries::table
                .filter(timesheet_entries::id.eq(id.into_inner()))
                .select(TimesheetEntryRow::as_select())
                .first::<TimesheetEntryRow>(connection)
                .optional()
                .map_err(TimesheetRepositoryError::persistence)?;
            row.map(row_to_entry).transpose()
        })
        .await
    }

    async fn list(
        &self,
        filter: TimesheetFilter,
    ) -> TimesheetRepositoryResult<Vec<TimesheetEntry>> {
        self.run_blocking(move |connection| {
            let mut query = timesheet_entries::table.into_boxed();
            if let Some(worker_id) = filter.worker_id {
                query = query.filter(timesheet_entries::worker_id.eq(worker_id.into_inner()));
            }
            if let Some(task_id) = filter.task_id {
                query = query.filter(timesheet_entries::task_id.eq(task_id.into_inner()));
            }
            let rows = query
                .order((
                    timesheet_entries::work_date.asc(),
                    timesheet_entries::id.asc(),
                ))
                .select(TimesheetEntryRow::as_select())
                .load::<TimesheetEntryRow>(connection)
                .map_err(TimesheetRepositoryError::persistence)?;
            rows.into_iter().map(row_to_entry).collect()
        })
        .await
    }

    async fn delete(&self, id: TimesheetEntryId) -> TimesheetRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let affected = diesel::delete(
                timesheet_entries::table.filter(timesheet_entries::id.eq(id.into_inner())),
            )
            .execute(connection)
            .map_err(TimesheetRepositoryError::persistence)?;
            if affected == 0 {
                return Err(TimesheetRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }
}

/// Converts an entry into its insert model, rejecting minute counts the
/// `INTEGER` column cannot hold instead of clamping them.
pub(crate) fn entry_to_new_row(
    entry: &TimesheetEntry,
) -> TimesheetRepositoryResult<NewTimesheetEntryRow> {
    let minutes =
        i32::try_from(entry.minutes()).map_err(TimesheetRepositoryError::persistence)?;
    Ok(NewTimesheetEntryRow {
        id: entry.id().into_inner(),
        worker_id: entry.worker_id().into_inner(),
        task_id: entry.task_id().into_inner(),
        work_date: entry.work_date(),
        minutes,
        note: entry.note().map(str::to_owned),
        created_at: entry.created_at(),
    })
}

fn row_to_entry(row: TimesheetEntryRow) -> TimesheetRepositoryResult<TimesheetEntry> {
    let minutes =
        u32::try_from(row.minutes).map_err(TimesheetRepositoryError::persistence)?;
    Ok(TimesheetEntry::from_persisted(PersistedTimesheetEntryData {
        id: TimesheetEntryId::from_uuid(row.id),
        worker_id: UserId::from_uuid(row.worker_id),
        task_id: TaskId::from_uuid(row.task_id),
        work_date: row.work_date,
        minutes,
        note: row.note,
        created_at: row.created_at,
    }))
}
