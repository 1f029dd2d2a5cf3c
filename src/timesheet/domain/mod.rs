//! Domain types for timesheet entries.

mod entry;
mod error;
mod ids;

pub use entry::{MAX_MINUTES_PER_ENTRY, PersistedTimesheetEntryData, TimesheetEntry};
pub use error::TimesheetDomainError;
pub use ids::TimesheetEntryId;
