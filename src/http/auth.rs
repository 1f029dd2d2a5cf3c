//! Bearer-token authentication extractor.

use super::error::ApiError;
use super::state::AppState;
use crate::identity::domain::Actor;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

const BEARER_PREFIX: &str = "Bearer ";

/// The authenticated caller, extracted from the `Authorization` header.
///
/// Handlers take this as an argument to require authentication; the wrapped
/// [`Actor`] is passed straight into the services.
#[derive(Debug, Clone, Copy)]
pub struct CurrentActor(pub Actor);

impl FromRequestParts<AppState> for CurrentActor {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(ApiError::unauthorized)?;
        let token = header
            .strip_prefix(BEARER_PREFIX)
            .ok_or_else(ApiError::unauthorized)?;
        let actor = state.tokens.verify(token)?;
        Ok(Self(actor))
    }
}
