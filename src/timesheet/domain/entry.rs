//! Timesheet entry aggregate.

use super::error::TimesheetDomainError;
use super::ids::TimesheetEntryId;
use crate::identity::domain::UserId;
use crate::task::domain::TaskId;
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Upper bound on minutes per entry: one full day.
pub const MAX_MINUTES_PER_ENTRY: u32 = 1440;

/// One worker's logged minutes against a task on a given day.
///
/// Entries are immutable after creation; corrections delete and re-log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimesheetEntry {
    id: TimesheetEntryId,
    worker_id: UserId,
    task_id: TaskId,
    work_date: NaiveDate,
    minutes: u32,
    note: Option<String>,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted timesheet entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTimesheetEntryData {
    /// Persisted entry identifier.
    pub id: TimesheetEntryId,
    /// Persisted logging worker.
    pub worker_id: UserId,
    /// Persisted target task.
    pub task_id: TaskId,
    /// Persisted work date.
    pub work_date: NaiveDate,
    /// Persisted minutes.
    pub minutes: u32,
    /// Persisted note.
    pub note: Option<String>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl TimesheetEntry {
    /// Creates a new entry.
    ///
    /// # Errors
    ///
    /// Returns [`TimesheetDomainError::InvalidMinutes`] outside the range
    /// `1..=`[`MAX_MINUTES_PER_ENTRY`].
    pub fn new(
        worker_id: UserId,
        task_id: TaskId,
        work_date: NaiveDate,
        minutes: u32,
        note: Option<String>,
        clock: &impl Clock,
    ) -> Result<Self, TimesheetDomainError> {
        if minutes == 0 || minutes > MAX_MINUTES_PER_ENTRY {
            return Err(TimesheetDomainError::InvalidMinutes(minutes));
        }
        Ok(Self {
            id: TimesheetEntryId::new(),
            worker_id,
            task_id,
            work_date,
            minutes,
            note,
            created_at: clock.utc(),
        })
    }

    /// Reconstructs an entry from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTimesheetEntryData) -> Self {
        Self {
            id: data.id,
            worker_id: data.worker_id,
            task_id: data.task_id,
            work_date: data.work_date,
            minutes: data.minutes,
            note: data.note,
            created_at: data.created_at,
        }
    }

    /// Returns the entry identifier.
    #[must_use]
    pub const fn id(&self) -> TimesheetEntryId {
        self.id
    }

    /// Returns the logging worker.
    #[must_use]
    pub const fn worker_id(&self) -> UserId {
        self.worker_id
    }

    /// Returns the target task.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the work date.
    #[must_use]
    pub const fn work_date(&self) -> NaiveDate {
        self.work_date
    }

    /// Returns the logged minutes.
    #[must_use]
    pub const fn minutes(&self) -> u32 {
        self.minutes
    }

    /// Returns the note, if set.
    #[must_use]
    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
