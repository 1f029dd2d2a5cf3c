//! Adapter implementations for billing persistence.

pub mod memory;
pub mod postgres;
