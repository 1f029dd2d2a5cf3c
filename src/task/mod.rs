//! Task lifecycle management.
//!
//! Tasks are units of work owned by a client, optionally grouped under a
//! project, and assigned to workers. Completion follows a dual-approval
//! workflow: an assigned worker requests completion, and an admin approves
//! or rejects it. The module follows hexagonal architecture:
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
