//! Signed access tokens for API authentication.

use crate::client::domain::ClientId;
use crate::identity::domain::{Actor, Role, User, UserId};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, errors::ErrorKind};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Seconds per minute, used to convert the configured TTL.
const SECONDS_PER_MINUTE: i64 = 60;

/// Claims carried in a signed access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    /// Subject: the authenticated user identifier.
    pub sub: Uuid,
    /// Access role at issue time.
    pub role: String,
    /// Client linkage for client-role users.
    pub client_id: Option<Uuid>,
    /// Issue timestamp (Unix seconds).
    pub iat: i64,
    /// Expiry timestamp (Unix seconds).
    pub exp: i64,
}

/// Errors returned while issuing or verifying access tokens.
#[derive(Debug, Error)]
pub enum TokenError {
    /// The token signature or structure is invalid.
    #[error("invalid access token")]
    Invalid,
    /// The token expired.
    #[error("access token expired")]
    Expired,
    /// Token signing failed.
    #[error("failed to sign access token: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
}

/// HMAC-SHA256 access token codec.
pub struct JwtCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_minutes: i64,
}

impl JwtCodec {
    /// Creates a codec from a shared secret and token lifetime in minutes.
    #[must_use]
    pub fn new(secret: &str, ttl_minutes: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_minutes,
        }
    }

    /// Issues a signed token for an authenticated user.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Signing`] when encoding fails.
    pub fn issue(&self, user: &User, clock: &impl Clock) -> Result<String, TokenError> {
        let now = clock.utc().timestamp();
        let claims = AccessTokenClaims {
            sub: user.id().into_inner(),
            role: user.role().as_str().to_owned(),
            client_id: user.client_id().map(ClientId::into_inner),
            iat: now,
            exp: now + self.ttl_minutes * SECONDS_PER_MINUTE,
        };
        Ok(jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.encoding,
        )?)
    }

    /// Verifies a presented token and reconstructs the acting identity.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Expired`] for stale tokens and
    /// [`TokenError::Invalid`] for anything else that fails validation.
    pub fn verify(&self, token: &str) -> Result<Actor, TokenError> {
        let data = jsonwebtoken::decode::<AccessTokenClaims>(
            token,
            &self.decoding,
            &Validation::new(Algorithm::HS256),
        )
        .map_err(|err| match err.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Invalid,
        })?;

        let role = Role::try_from(data.claims.role.as_str()).map_err(|_| TokenError::Invalid)?;
        Ok(Actor::new(
            UserId::from_uuid(data.claims.sub),
            role,
            data.claims.client_id.map(ClientId::from_uuid),
        ))
    }
}
