//! `PostgreSQL` adapters for client and project persistence.

mod models;
mod repository;
mod schema;

pub use repository::{ClientPgPool, PostgresClientRepository, PostgresProjectRepository};
