//! Client company records and their projects.
//!
//! Clients are the agency's customers: every task, invoice, offer, and
//! hosting record is owned by a client. Projects group tasks under a client.
//! The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
