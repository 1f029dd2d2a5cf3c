//! Error types for identity domain validation and parsing.

use super::ids::{InviteId, UserId};
use thiserror::Error;

/// Errors returned while constructing or mutating identity domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityDomainError {
    /// The email address failed format validation.
    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    /// The display name is empty after trimming.
    #[error("display name must not be empty")]
    EmptyDisplayName,

    /// A client-role user was created without a client linkage.
    #[error("client-role user {0} requires a client record")]
    MissingClientLink(UserId),

    /// A non-client user carried a client linkage.
    #[error("user {0} must not reference a client record")]
    UnexpectedClientLink(UserId),

    /// The password does not meet the minimum length requirement.
    #[error("password must be at least {minimum} characters")]
    WeakPassword {
        /// Minimum accepted password length.
        minimum: usize,
    },

    /// The user already holds credentials.
    #[error("user {0} is already activated")]
    AlreadyActivated(UserId),

    /// The invite was already consumed.
    #[error("invite {0} has already been used")]
    InviteConsumed(InviteId),

    /// The invite expired before use.
    #[error("invite {0} has expired")]
    InviteExpired(InviteId),
}

/// Error returned while parsing roles from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);
