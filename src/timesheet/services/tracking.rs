//! Service layer for worker time tracking.

use crate::identity::domain::Actor;
use crate::task::domain::TaskId;
use crate::task::ports::TaskRepository;
use crate::timesheet::{
    domain::{TimesheetDomainError, TimesheetEntry, TimesheetEntryId},
    ports::{TimesheetFilter, TimesheetRepository, TimesheetRepositoryError},
};
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for logging time against a task.
#[derive(Debug, Clone)]
pub struct LogTimeRequest {
    task_id: TaskId,
    work_date: NaiveDate,
    minutes: u32,
    note: Option<String>,
}

impl LogTimeRequest {
    /// Creates a request with required fields.
    #[must_use]
    pub const fn new(task_id: TaskId, work_date: NaiveDate, minutes: u32) -> Self {
        Self {
            task_id,
            work_date,
            minutes,
            note: None,
        }
    }

    /// Attaches a free-form note.
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Service-level errors for timesheet operations.
#[derive(Debug, Error)]
pub enum TimesheetServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TimesheetDomainError),
    /// Timesheet repository operation failed.
    #[error(transparent)]
    Entries(#[from] TimesheetRepositoryError),
    /// Task repository operation failed.
    #[error(transparent)]
    Tasks(#[from] crate::task::ports::TaskRepositoryError),
    /// The acting user lacks permission for this operation.
    #[error("operation not permitted for this actor")]
    Forbidden,
    /// The entry was not found or is not visible to the actor.
    #[error("timesheet entry not found: {0}")]
    EntryMissing(TimesheetEntryId),
    /// The target task was not found or is not assigned to the actor.
    #[error("task not found: {0}")]
    TaskMissing(TaskId),
}

/// Result type for timesheet operations.
pub type TimesheetServiceResult<T> = Result<T, TimesheetServiceError>;

/// Time logging against assigned tasks.
///
/// Workers log minutes against tasks they are assigned to and manage their
/// own entries; admins read and delete everything; clients have no access.
#[derive(Clone)]
pub struct TimesheetService<R, T, C>
where
    R: TimesheetRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    entries: Arc<R>,
    tasks: Arc<T>,
    clock: Arc<C>,
}

impl<R, T, C> TimesheetService<R, T, C>
where
    R: TimesheetRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new timesheet service.
    #[must_use]
    pub const fn new(entries: Arc<R>, tasks: Arc<T>, clock: Arc<C>) -> Self {
        Self {
            entries,
            tasks,
            clock,
        }
    }

    /// Logs time for the acting worker against an assigned task.
    ///
    /// # Errors
    ///
    /// Returns [`TimesheetServiceError::Forbidden`] for non-worker actors,
    /// [`TimesheetServiceError::TaskMissing`] when the task is absent or not
    /// assigned to the actor, and a wrapped
    /// [`TimesheetDomainError::InvalidMinutes`] for out-of-range minutes.
    pub async fn log_time(
        &self,
        actor: &Actor,
        request: LogTimeRequest,
    ) -> TimesheetServiceResult<TimesheetEntry> {
        if !actor.is_worker() {
            return Err(TimesheetServiceError::Forbidden);
        }
        let task = self
            .tasks
            .find_by_id(request.task_id)
            .await?
            .ok_or(TimesheetServiceError::TaskMissing(request.task_id))?;
        if !task.is_assigned(actor.user_id()) {
            return Err(TimesheetServiceError::TaskMissing(request.task_id));
        }
        let entry = TimesheetEntry::new(
            actor.user_id(),
            request.task_id,
            request.work_date,
            request.minutes,
            request.note.clone(),
            &*self.clock,
        )?;
        self.entries.store(&entry).await?;
        Ok(entry)
    }

    /// Deletes an entry. Admins may delete any entry; workers only their own.
    ///
    /// # Errors
    ///
    /// Returns [`TimesheetServiceError::EntryMissing`] when absent or hidden.
    pub async fn delete_entry(
        &self,
        actor: &Actor,
        entry_id: TimesheetEntryId,
    ) -> TimesheetServiceResult<()> {
        let entry = self.require_visible(actor, entry_id).await?;
        self.entries.delete(entry.id()).await?;
        Ok(())
    }

    /// Returns an entry visible to the actor.
    ///
    /// # Errors
    ///
    /// Returns [`TimesheetServiceError::EntryMissing`] when absent or hidden
    /// and [`TimesheetServiceError::Forbidden`] for client actors.
    pub async fn get_entry(
        &self,
        actor: &Actor,
        entry_id: TimesheetEntryId,
    ) -> TimesheetServiceResult<TimesheetEntry> {
        self.require_visible(actor, entry_id).await
    }

    /// Lists entries matching the filter, scoped to the actor.
    ///
    /// Admins may filter freely; workers are always constrained to their own
    /// entries regardless of the requested worker filter.
    ///
    /// # Errors
    ///
    /// Returns [`TimesheetServiceError::Forbidden`] for client actors.
    pub async fn list_entries(
        &self,
        actor: &Actor,
        filter: TimesheetFilter,
    ) -> TimesheetServiceResult<Vec<TimesheetEntry>> {
        let scoped = Self::scope_filter(actor, filter)?;
        Ok(self.entries.list(scoped).await?)
    }

    async fn require_visible(
        &self,
        actor: &Actor,
        entry_id: TimesheetEntryId,
    ) -> TimesheetServiceResult<TimesheetEntry> {
        if actor.is_client() {
            return Err(TimesheetServiceError::Forbidden);
        }
        let entry = self
            .entries
            .find_by_id(entry_id)
            .await?
            .ok_or(TimesheetServiceError::EntryMissing(entry_id))?;
        if actor.is_admin() || entry.worker_id() == actor.user_id() {
            Ok(entry)
        } else {
            Err(TimesheetServiceError::EntryMissing(entry_id))
        }
    }

    fn scope_filter(
        actor: &Actor,
        filter: TimesheetFilter,
    ) -> TimesheetServiceResult<TimesheetFilter> {
        if actor.is_admin() {
            return Ok(filter);
        }
        if actor.is_worker() {
            return Ok(filter.with_worker(actor.user_id()));
        }
        Err(TimesheetServiceError::Forbidden)
    }
}

/// Sums the minutes across a slice of entries, saturating at `u64::MAX`.
#[must_use]
pub fn total_minutes(entries: &[TimesheetEntry]) -> u64 {
    entries
        .iter()
        .fold(0_u64, |acc, entry| acc.saturating_add(entry.minutes().into()))
}
