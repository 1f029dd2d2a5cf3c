//! In-memory timesheet repository for tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::timesheet::domain::{TimesheetEntry, TimesheetEntryId};
use crate::timesheet::ports::{
    TimesheetFilter, TimesheetRepository, TimesheetRepositoryError, TimesheetRepositoryResult,
};

/// Thread-safe in-memory timesheet repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTimesheetRepository {
    state: Arc<RwLock<HashMap<TimesheetEntryId, TimesheetEntry>>>,
}

impl InMemoryTimesheetRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TimesheetRepository for InMemoryTimesheetRepository {
    async fn store(&self, entry: &TimesheetEntry) -> TimesheetRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            TimesheetRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.contains_key(&entry.id()) {
            return Err(TimesheetRepositoryError::DuplicateEntry(entry.id()));
        }
        state.insert(entry.id(), entry.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: TimesheetEntryId,
    ) -> TimesheetRepositoryResult<Option<TimesheetEntry>> {
        let state = self.state.read().map_err(|err| {
            TimesheetRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.get(&id).cloned())
    }

    async fn list(
        &self,
        filter: TimesheetFilter,
    ) -> TimesheetRepositoryResult<Vec<TimesheetEntry>> {
        let state = self.state.read().map_err(|err| {
            TimesheetRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut entries: Vec<TimesheetEntry> = state
            .values()
            .filter(|entry| filter.matches(entry))
            .cloned()
            .collect();
        entries.sort_by_key(|entry| (entry.work_date(), entry.id()));
        Ok(entries)
    }

    async fn delete(&self, id: TimesheetEntryId) -> TimesheetRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            TimesheetRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.remove(&id).is_none() {
            return Err(TimesheetRepositoryError::NotFound(id));
        }
        Ok(())
    }
}
