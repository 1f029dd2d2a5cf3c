//! Unit tests for the billing module.
//!
//! Tests are organised by concept: monetary arithmetic, aggregate
//! invariants, the two status state machines, and service orchestration for
//! invoices and offers.

mod domain_tests;
mod offer_service_tests;
mod status_transition_tests;
