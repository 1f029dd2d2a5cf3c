//! Unit tests for the hosting module.

mod domain_tests;
