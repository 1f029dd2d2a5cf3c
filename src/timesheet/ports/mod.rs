//! Port contracts for timesheet persistence.

mod repository;

pub use repository::{
    TimesheetFilter, TimesheetRepository, TimesheetRepositoryError, TimesheetRepositoryResult,
};
