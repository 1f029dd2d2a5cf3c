//! Adapter implementations for timesheet persistence.

pub mod memory;
pub mod postgres;
