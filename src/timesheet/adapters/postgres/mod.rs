//! `PostgreSQL` adapter for timesheet persistence.

pub mod models;
pub mod repository;
pub mod schema;

pub use repository::PostgresTimesheetRepository;
