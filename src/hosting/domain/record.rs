//! Domain record aggregate and validated domain names.

use super::error::HostingDomainError;
use super::ids::DomainRecordId;
use crate::client::domain::ClientId;
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

const MAX_LABEL_LENGTH: usize = 63;

/// Validated, lowercased domain name in label format.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DomainName(String);

impl DomainName {
    /// Creates a validated domain name.
    ///
    /// Requires at least two dot-separated labels of alphanumerics and
    /// interior hyphens, each at most 63 characters.
    ///
    /// # Errors
    ///
    /// Returns [`HostingDomainError::InvalidDomainName`] otherwise.
    pub fn new(value: impl Into<String>) -> Result<Self, HostingDomainError> {
        let raw = value.into();
        let normalized = raw.trim().to_ascii_lowercase();
        let labels: Vec<&str> = normalized.split('.').collect();
        if labels.len() < 2 || !labels.iter().all(|label| Self::is_valid_label(label)) {
            return Err(HostingDomainError::InvalidDomainName(raw));
        }
        Ok(Self(normalized))
    }

    fn is_valid_label(label: &str) -> bool {
        !label.is_empty()
            && label.len() <= MAX_LABEL_LENGTH
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-')
    }

    /// Returns the normalized string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The up-to-three tracked expiry dates of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpiryDates {
    /// Registration expiry of the domain itself.
    pub domain: NaiveDate,
    /// Expiry of the hosting contract, if tracked.
    pub hosting: Option<NaiveDate>,
    /// Expiry of the SSL certificate, if tracked.
    pub ssl: Option<NaiveDate>,
}

/// Registrar metadata for one client-owned domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainRecord {
    id: DomainRecordId,
    client_id: ClientId,
    name: DomainName,
    registrar: Option<String>,
    expiries: ExpiryDates,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted domain record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedDomainRecordData {
    /// Persisted record identifier.
    pub id: DomainRecordId,
    /// Persisted owning client.
    pub client_id: ClientId,
    /// Persisted domain name.
    pub name: DomainName,
    /// Persisted registrar label.
    pub registrar: Option<String>,
    /// Persisted expiry dates.
    pub expiries: ExpiryDates,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl DomainRecord {
    /// Creates a new domain record.
    #[must_use]
    pub fn new(
        client_id: ClientId,
        name: DomainName,
        registrar: Option<String>,
        expiries: ExpiryDates,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id: DomainRecordId::new(),
            client_id,
            name,
            registrar,
            expiries,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a record from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedDomainRecordData) -> Self {
        Self {
            id: data.id,
            client_id: data.client_id,
            name: data.name,
            registrar: data.registrar,
            expiries: data.expiries,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the record identifier.
    #[must_use]
    pub const fn id(&self) -> DomainRecordId {
        self.id
    }

    /// Returns the owning client.
    #[must_use]
    pub const fn client_id(&self) -> ClientId {
        self.client_id
    }

    /// Returns the domain name.
    #[must_use]
    pub const fn name(&self) -> &DomainName {
        &self.name
    }

    /// Returns the registrar label, if set.
    #[must_use]
    pub fn registrar(&self) -> Option<&str> {
        self.registrar.as_deref()
    }

    /// Returns the tracked expiry dates.
    #[must_use]
    pub const fn expiries(&self) -> ExpiryDates {
        self.expiries
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

    /// Replaces registrar and expiry fields.
    pub fn update_details(
        &mut self,
        registrar: Option<String>,
        expiries: ExpiryDates,
        clock: &impl Clock,
    ) {
        self.registrar = registrar;
        self.expiries = expiries;
        self.updated_at = clock.utc();
    }
}
