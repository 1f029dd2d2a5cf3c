//! Timesheet application services.

mod tracking;

pub use tracking::{
    LogTimeRequest, TimesheetService, TimesheetServiceError, TimesheetServiceResult,
    total_minutes,
};
