//! Inbound REST adapter.
//!
//! Exposes the context services over an axum router with bearer-token
//! authentication, JSON DTOs, and a uniform `{ "error": <message> }` failure
//! body.

pub mod auth;
pub mod error;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::router;
pub use state::AppState;
