//! Salted password digests for credential storage.

use super::error::IdentityDomainError;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Minimum accepted password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Salted SHA-256 password digest in `salt$hex` storage format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Derives a digest from a plaintext password with a fresh random salt.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::WeakPassword`] when the password is
    /// shorter than the minimum length.
    pub fn derive(password: &str) -> Result<Self, IdentityDomainError> {
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(IdentityDomainError::WeakPassword {
                minimum: MIN_PASSWORD_LENGTH,
            });
        }
        let salt = Uuid::new_v4().simple().to_string();
        Ok(Self(encode(&salt, password)))
    }

    /// Reconstructs a digest from its persisted storage form.
    #[must_use]
    pub const fn from_stored(stored: String) -> Self {
        Self(stored)
    }

    /// Returns `true` when the plaintext password matches this digest.
    #[must_use]
    pub fn verify(&self, password: &str) -> bool {
        self.0
            .split_once('$')
            .is_some_and(|(salt, _)| encode(salt, password) == self.0)
    }

    /// Returns the storage representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn encode(salt: &str, password: &str) -> String {
    let digest = Sha256::new()
        .chain_update(salt.as_bytes())
        .chain_update(b"$")
        .chain_update(password.as_bytes())
        .finalize();
    let hex: String = digest.iter().map(|byte| format!("{byte:02x}")).collect();
    format!("{salt}${hex}")
}
