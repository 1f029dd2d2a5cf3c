//! Route tables for the REST adapter.

pub mod auth;
pub mod clients;
pub mod domains;
pub mod invoices;
pub mod offers;
pub mod tasks;
pub mod timesheets;

use super::state::AppState;
use axum::Router;

/// Builds the full application router under the `/api` prefix.
#[must_use]
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .merge(auth::router())
        .merge(clients::router())
        .merge(tasks::router())
        .merge(invoices::router())
        .merge(offers::router())
        .merge(domains::router())
        .merge(timesheets::router());
    Router::new().nest("/api", api).with_state(state)
}
