//! Repository port for timesheet persistence.

use crate::identity::domain::UserId;
use crate::task::domain::TaskId;
use crate::timesheet::domain::{TimesheetEntry, TimesheetEntryId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for timesheet repository operations.
pub type TimesheetRepositoryResult<T> = Result<T, TimesheetRepositoryError>;

/// Optional worker and task constraints for listing entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimesheetFilter {
    /// Restrict to one worker's entries.
    pub worker_id: Option<UserId>,
    /// Restrict to entries against one task.
    pub task_id: Option<TaskId>,
}

impl TimesheetFilter {
    /// Matches every entry.
    #[must_use]
    pub const fn any() -> Self {
        Self {
            worker_id: None,
            task_id: None,
        }
    }

    /// Restricts to one worker.
    #[must_use]
    pub const fn with_worker(mut self, worker_id: UserId) -> Self {
        self.worker_id = Some(worker_id);
        self
    }

    /// Restricts to one task.
    #[must_use]
    pub const fn with_task(mut self, task_id: TaskId) -> Self {
        self.task_id = Some(task_id);
        self
    }

    /// Returns `true` when the entry satisfies every set constraint.
    #[must_use]
    pub fn matches(&self, entry: &TimesheetEntry) -> bool {
        self.worker_id.is_none_or(|id| entry.worker_id() == id)
            && self.task_id.is_none_or(|id| entry.task_id() == id)
    }
}

/// Timesheet persistence contract.
#[async_trait]
pub trait TimesheetRepository: Send + Sync {
    /// Stores a new entry.
    ///
    /// # Errors
    ///
    /// Returns [`TimesheetRepositoryError::DuplicateEntry`] when the
    /// identifier already exists.
    async fn store(&self, entry: &TimesheetEntry) -> TimesheetRepositoryResult<()>;

    /// Finds an entry by identifier. Returns `None` when absent.
    async fn find_by_id(
        &self,
        id: TimesheetEntryId,
    ) -> TimesheetRepositoryResult<Option<TimesheetEntry>>;

    /// Returns the entries matching the filter, ordered by work date.
    async fn list(&self, filter: TimesheetFilter)
    -> TimesheetRepositoryResult<Vec<TimesheetEntry>>;

    /// Deletes an entry.
    ///
    /// # Errors
    ///
    /// Returns [`TimesheetRepositoryError::NotFound`] when absent.
    async fn delete(&self, id: TimesheetEntryId) -> TimesheetRepositoryResult<()>;
}

/// Errors returned by timesheet repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TimesheetRepositoryError {
    /// An entry with the same identifier already exists.
    #[error("duplicate timesheet entry identifier: {0}")]
    DuplicateEntry(TimesheetEntryId),

    /// The entry was not found.
    #[error("timesheet entry not found: {0}")]
    NotFound(TimesheetEntryId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TimesheetRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
