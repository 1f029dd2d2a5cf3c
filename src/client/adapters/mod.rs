//! Adapter implementations for client ports.

pub mod dependents;
pub mod memory;
pub mod postgres;
