//! Unit tests for the client module.

mod directory_service_tests;
mod domain_tests;
