//! Orchestration services for identity and access management.

mod auth;
mod token;

pub use auth::{AuthError, AuthResult, AuthService, IssuedInvite, RegisterUserRequest};
pub use token::{AccessTokenClaims, JwtCodec, TokenError};
