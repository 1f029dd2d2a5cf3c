//! `PostgreSQL` adapter for task persistence.

pub mod models;
pub mod repository;
pub mod schema;

pub use repository::PostgresTaskRepository;
