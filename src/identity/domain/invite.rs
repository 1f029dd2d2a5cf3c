//! Single-use, time-boxed invite tokens for client onboarding.
//!
//! The plaintext token is returned exactly once at issue time; only its
//! SHA-256 digest is persisted, so a leaked invite table cannot be replayed.

use super::error::IdentityDomainError;
use super::ids::{InviteId, UserId};
use chrono::{DateTime, Duration, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use uuid::Uuid;

/// Plaintext invite token handed to the invited user out of band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InviteToken(String);

impl InviteToken {
    /// Mints a fresh random token.
    #[must_use]
    pub fn mint() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Wraps a token presented by a caller.
    #[must_use]
    pub fn from_presented(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the SHA-256 hex digest used for storage and lookup.
    #[must_use]
    pub fn digest(&self) -> String {
        let digest = Sha256::digest(self.0.as_bytes());
        digest.iter().map(|byte| format!("{byte:02x}")).collect()
    }

    /// Returns the plaintext token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InviteToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Invite aggregate: a pending credential claim for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invite {
    id: InviteId,
    user_id: UserId,
    token_digest: String,
    expires_at: DateTime<Utc>,
    consumed_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted invite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedInviteData {
    /// Persisted invite identifier.
    pub id: InviteId,
    /// Invited user.
    pub user_id: UserId,
    /// SHA-256 digest of the plaintext token.
    pub token_digest: String,
    /// Expiry timestamp.
    pub expires_at: DateTime<Utc>,
    /// Consumption timestamp, if already used.
    pub consumed_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Invite {
    /// Issues a new invite for a user, returning the aggregate together with
    /// the plaintext token. The plaintext is never stored.
    #[must_use]
    pub fn issue(user_id: UserId, ttl: Duration, clock: &impl Clock) -> (Self, InviteToken) {
        let token = InviteToken::mint();
        let now = clock.utc();
        let invite = Self {
            id: InviteId::new(),
            user_id,
            token_digest: token.digest(),
            expires_at: now + ttl,
            consumed_at: None,
            created_at: now,
        };
        (invite, token)
    }

    /// Reconstructs an invite from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedInviteData) -> Self {
        Self {
            id: data.id,
            user_id: data.user_id,
            token_digest: data.token_digest,
            expires_at: data.expires_at,
            consumed_at: data.consumed_at,
            created_at: data.created_at,
        }
    }

    /// Returns the invite identifier.
    #[must_use]
    pub const fn id(&self) -> InviteId {
        self.id
    }

    /// Returns the invited user.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the stored token digest.
    #[must_use]
    pub fn token_digest(&self) -> &str {
        &self.token_digest
    }

    /// Returns the expiry timestamp.
    #[must_use]
    pub const fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Returns the consumption timestamp, if the invite was used.
    #[must_use]
    pub const fn consumed_at(&self) -> Option<DateTime<Utc>> {
        self.consumed_at
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns `true` when the invite expired at or before `now`.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    /// Marks the invite as used.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::InviteConsumed`] when already used and
    /// [`IdentityDomainError::InviteExpired`] when past its expiry.
    pub fn consume(&mut self, clock: &impl Clock) -> Result<(), IdentityDomainError> {
        if self.consumed_at.is_some() {
            return Err(IdentityDomainError::InviteConsumed(self.id));
        }
        let now = clock.utc();
        if self.is_expired(now) {
            return Err(IdentityDomainError::InviteExpired(self.id));
        }
        self.consumed_at = Some(now);
        Ok(())
    }
}
