//! `PostgreSQL` adapter for hosting persistence.

pub mod models;
pub mod repository;
pub mod schema;

pub use repository::PostgresDomainRecordRepository;
