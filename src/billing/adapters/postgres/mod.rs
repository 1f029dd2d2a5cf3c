//! `PostgreSQL` adapter for billing persistence.

pub mod models;
pub mod repository;
pub mod schema;

pub use repository::{PostgresInvoiceRepository, PostgresOfferRepository};
