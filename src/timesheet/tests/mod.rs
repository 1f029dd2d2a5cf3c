//! Unit tests for the timesheet context.

mod domain_tests;
mod row_conversion_tests;
