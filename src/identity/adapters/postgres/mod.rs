//! `PostgreSQL` adapters for identity persistence.

mod models;
mod repository;
mod schema;

pub use repository::{IdentityPgPool, PostgresInviteRepository, PostgresUserRepository};
