//! Diesel row models for timesheet persistence.

use super::schema::timesheet_entries;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

/// Query result row for timesheet entries.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = timesheet_entries)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TimesheetEntryRow {
    /// Internal entry identifier.
    pub id: uuid::Uuid,
    /// Logging worker.
    pub worker_id: uuid::Uuid,
    /// Target task.
    pub task_id: uuid::Uuid,
    /// Date the work was performed.
    pub work_date: NaiveDate,
    /// Logged minutes.
    pub minutes: i32,
    /// Free-form note.
    pub note: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for timesheet entries.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = timesheet_entries)]
pub struct NewTimesheetEntryRow {
    /// Internal entry identifier.
    pub id: uuid::Uuid,
    /// Logging worker.
    pub worker_id: uuid::Uuid,
    /// Target task.
    pub task_id: uuid::Uuid,
    /// Date the work was performed.
    pub work_date: NaiveDate,
    /// Logged minutes.
    pub minutes: i32,
    /// Free-form note.
    pub note: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
