//! User aggregate root.

use super::credentials::PasswordHash;
use super::email::EmailAddress;
use super::error::IdentityDomainError;
use super::ids::UserId;
use super::role::Role;
use crate::client::domain::ClientId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Portal user: an admin, a worker, or a client contact.
///
/// Client contacts are created without credentials and activate their account
/// through an invite token; admins and workers are created with a password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    email: EmailAddress,
    display_name: String,
    role: Role,
    client_id: Option<ClientId>,
    password_hash: Option<PasswordHash>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted user aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedUserData {
    /// Persisted user identifier.
    pub id: UserId,
    /// Persisted email address.
    pub email: EmailAddress,
    /// Persisted display name.
    pub display_name: String,
    /// Persisted role.
    pub role: Role,
    /// Persisted client linkage for client-role users.
    pub client_id: Option<ClientId>,
    /// Persisted credentials, absent until activation.
    pub password_hash: Option<PasswordHash>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user record.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::EmptyDisplayName`] for a blank display
    /// name, [`IdentityDomainError::MissingClientLink`] when a client-role
    /// user lacks a client record, and
    /// [`IdentityDomainError::UnexpectedClientLink`] when a non-client user
    /// carries one.
    pub fn new(
        email: EmailAddress,
        display_name: impl Into<String>,
        role: Role,
        client_id: Option<ClientId>,
        password_hash: Option<PasswordHash>,
        clock: &impl Clock,
    ) -> Result<Self, IdentityDomainError> {
        let name = display_name.into().trim().to_owned();
        if name.is_empty() {
            return Err(IdentityDomainError::EmptyDisplayName);
        }

        let id = UserId::new();
        match (role, client_id) {
            (Role::Client, None) => return Err(IdentityDomainError::MissingClientLink(id)),
            (Role::Admin | Role::Worker, Some(_)) => {
                return Err(IdentityDomainError::UnexpectedClientLink(id));
            }
            _ => {}
        }

        let timestamp = clock.utc();
        Ok(Self {
            id,
            email,
            display_name: name,
            role,
            client_id,
            password_hash,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a user from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedUserData) -> Self {
        Self {
            id: data.id,
            email: data.email,
            display_name: data.display_name,
            role: data.role,
            client_id: data.client_id,
            password_hash: data.password_hash,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the email address.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns the display name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Returns the role. Roles are immutable after creation.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns the linked client record for client-role users.
    #[must_use]
    pub const fn client_id(&self) -> Option<ClientId> {
        self.client_id
    }

    /// Returns the stored credentials, absent until activation.
    #[must_use]
    pub const fn password_hash(&self) -> Option<&PasswordHash> {
        self.password_hash.as_ref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns `true` once the user holds credentials and may log in.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.password_hash.is_some()
    }

    /// Sets credentials on a not-yet-activated account.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::AlreadyActivated`] when credentials are
    /// already present.
    pub fn activate(
        &mut self,
        password_hash: PasswordHash,
        clock: &impl Clock,
    ) -> Result<(), IdentityDomainError> {
        if self.password_hash.is_some() {
            return Err(IdentityDomainError::AlreadyActivated(self.id));
        }
        self.password_hash = Some(password_hash);
        self.touch(clock);
        Ok(())
    }

    /// Returns `true` when the plaintext password matches the stored
    /// credentials. Inactive accounts never match.
    #[must_use]
    pub fn verify_password(&self, password: &str) -> bool {
        self.password_hash
            .as_ref()
            .is_some_and(|hash| hash.verify(password))
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
