//! Login and invite acceptance endpoints.

use crate::http::error::ApiError;
use crate::http::state::AppState;
use crate::identity::domain::{User, UserId};
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use mockable::DefaultClock;
use serde::{Deserialize, Serialize};

/// Wire representation of a portal user.
#[derive(Debug, Clone, Serialize)]
pub struct UserDto {
    /// User identifier.
    pub id: UserId,
    /// Account email address.
    pub email: String,
    /// Display name.
    pub display_name: String,
    /// Access role.
    pub role: String,
    /// Linked client record for client-role users.
    pub client_id: Option<crate::client::domain::ClientId>,
    /// Whether the account holds credentials.
    pub active: bool,
}

impl UserDto {
    pub(crate) fn from_user(user: &User) -> Self {
        Self {
            id: user.id(),
            email: user.email().as_str().to_owned(),
            display_name: user.display_name().to_owned(),
            role: user.role().as_str().to_owned(),
            client_id: user.client_id(),
            active: user.is_active(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct LoginBody {
    email: String,
    password: String,
}

#[derive(Debug, Serialize)]
struct LoginResponse {
    token: String,
    user: UserDto,
}

#[derive(Debug, Deserialize)]
struct AcceptInviteBody {
    token: String,
    password: String,
}

pub(super) fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/invites/accept", post(accept_invite))
}

async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginBody>,
) -> Result<Json<LoginResponse>, ApiError> {
    let user = state.auth.login(&body.email, &body.password).await?;
    let token = state.tokens.issue(&user, &DefaultClock)?;
    Ok(Json(LoginResponse {
        token,
        user: UserDto::from_user(&user),
    }))
}

async fn accept_invite(
    State(state): State<AppState>,
    Json(body): Json<AcceptInviteBody>,
) -> Result<Json<UserDto>, ApiError> {
    let user = state.auth.accept_invite(&body.token, &body.password).await?;
    Ok(Json(UserDto::from_user(&user)))
}
