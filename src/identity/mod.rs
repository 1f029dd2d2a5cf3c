//! Identity and access management.
//!
//! Covers the portal's user accounts (admins, workers, and client contacts),
//! their credentials, single-use invite tokens for client onboarding, and the
//! access tokens presented on every API request. The module follows
//! hexagonal architecture:
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
