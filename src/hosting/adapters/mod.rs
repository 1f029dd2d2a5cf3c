//! Adapter implementations for hosting persistence.

pub mod memory;
pub mod postgres;
