//! Invoicing and offers.
//!
//! Invoices cover both directions of the agency's cash flow: receivables
//! billed to clients and payables owed to workers. Offers are per-client
//! quotes that can be rendered as an HTML document. Amounts are integer
//! cents throughout; totals are computed, never stored. The module follows
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
