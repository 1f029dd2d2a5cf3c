//! In-memory integration tests.
//!
//! Tests are organized into modules by workflow:
//! - `onboarding_flow_tests`: client records, contact invites, login
//! - `delivery_flow_tests`: task assignment, dual approval, time tracking
//! - `billing_flow_tests`: invoice lifecycle and offer documents
//! - `hosting_alert_tests`: expiry alert reporting across roles

mod in_memory {
    pub mod helpers;

    mod billing_flow_tests;
    mod delivery_flow_tests;
    mod hosting_alert_tests;
    mod onboarding_flow_tests;
}
