//! Unit tests for the identity module.
//!
//! Tests are organised by concept: role parsing, credential hashing, invite
//! lifecycle, user invariants, service orchestration, and token round-trips.

mod token_tests;
mod user_tests;
