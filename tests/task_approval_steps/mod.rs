//! Step definitions for task approval BDD scenarios.

mod given;
mod then;
mod when;
pub mod world;
