//! Unit tests for the task module.
//!
//! Tests are organised by concept: the status state machine, aggregate
//! invariants, and service orchestration of the dual-approval workflow.

mod assignment_reconciliation_tests;
mod status_transition_tests;
mod workflow_service_tests;
