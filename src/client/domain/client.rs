//! Client aggregate root.

use super::error::ClientDomainError;
use super::ids::ClientId;
use crate::identity::domain::EmailAddress;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Validated, updatable contact details for a client record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientProfile {
    company_name: String,
    contact_email: EmailAddress,
    phone: Option<String>,
    address: Option<String>,
}

impl ClientProfile {
    /// Creates a validated profile.
    ///
    /// # Errors
    ///
    /// Returns [`ClientDomainError::EmptyCompanyName`] for a blank company
    /// name and [`ClientDomainError::InvalidContactEmail`] for a malformed
    /// contact address.
    pub fn new(
        company_name: impl Into<String>,
        contact_email: impl Into<String>,
    ) -> Result<Self, ClientDomainError> {
        let name = company_name.into().trim().to_owned();
        if name.is_empty() {
            return Err(ClientDomainError::EmptyCompanyName);
        }
        let raw_email = contact_email.into();
        let email = EmailAddress::new(raw_email.clone())
            .map_err(|_| ClientDomainError::InvalidContactEmail(raw_email))?;

        Ok(Self {
            company_name: name,
            contact_email: email,
            phone: None,
            address: None,
        })
    }

    /// Sets a contact phone number.
    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Sets a postal address.
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Returns the company name.
    #[must_use]
    pub fn company_name(&self) -> &str {
        &self.company_name
    }

    /// Returns the contact email.
    #[must_use]
    pub const fn contact_email(&self) -> &EmailAddress {
        &self.contact_email
    }

    /// Returns the contact phone, if set.
    #[must_use]
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    /// Returns the postal address, if set.
    #[must_use]
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }
}

/// Client aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    id: ClientId,
    profile: ClientProfile,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted client aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedClientData {
    /// Persisted client identifier.
    pub id: ClientId,
    /// Persisted profile fields.
    pub profile: ClientProfile,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Client {
    /// Creates a new client record.
    #[must_use]
    pub fn new(profile: ClientProfile, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: ClientId::new(),
            profile,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a client from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedClientData) -> Self {
        Self {
            id: data.id,
            profile: data.profile,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the client identifier.
    #[must_use]
    pub const fn id(&self) -> ClientId {
        self.id
    }

    /// Returns the profile fields.
    #[must_use]
    pub const fn profile(&self) -> &ClientProfile {
        &self.profile
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

    /// Replaces the profile fields.
    pub fn update_profile(&mut self, profile: ClientProfile, clock: &impl Clock) {
        self.profile = profile;
        self.updated_at = clock.utc();
    }
}
