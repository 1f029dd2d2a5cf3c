//! Domain, hosting, and SSL registrar records.
//!
//! Each record tracks up to three expiry dates per client-owned domain and
//! feeds the 30-day expiry alert report. The module follows hexagonal
//! architecture:
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
