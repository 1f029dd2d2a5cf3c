//! Error types for timesheet domain validation.

use super::entry::MAX_MINUTES_PER_ENTRY;
use thiserror::Error;

/// Errors returned while constructing timesheet domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TimesheetDomainError {
    /// Minutes must lie between one and a full day.
    #[error("minutes must be between 1 and {MAX_MINUTES_PER_ENTRY}, got {0}")]
    InvalidMinutes(u32),
}
