//! Offer aggregate root and status state machine.

use super::error::{BillingDomainError, ParseOfferStatusError};
use super::ids::OfferId;
use super::line_item::{LineItem, sum_totals};
use super::money::Money;
use crate::client::domain::ClientId;
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Lifecycle status of an offer.
///
/// Expiry is reported from the validity date rather than stored as a
/// status: a sent offer past `valid_until` can no longer be accepted or
/// declined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfferStatus {
    /// Editable; not yet delivered to the client.
    Draft,
    /// Delivered and awaiting a decision.
    Sent,
    /// Accepted by the client.
    Accepted,
    /// Declined by the client.
    Declined,
}

impl OfferStatus {
    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Sent => "sent",
            Self::Accepted => "accepted",
            Self::Declined => "declined",
        }
    }

    /// Returns `true` when no further transitions are possible.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Accepted | Self::Declined)
    }

    /// Returns `true` when the state machine permits moving to `target`.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Draft, Self::Sent) | (Self::Sent, Self::Accepted | Self::Declined)
        )
    }
}

impl TryFrom<&str> for OfferStatus {
    type Error = ParseOfferStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "draft" => Ok(Self::Draft),
            "sent" => Ok(Self::Sent),
            "accepted" => Ok(Self::Accepted),
            "declined" => Ok(Self::Declined),
            other => Err(ParseOfferStatusError(other.to_owned())),
        }
    }
}

/// Offer aggregate root: a per-client quote with a validity window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    id: OfferId,
    client_id: ClientId,
    title: String,
    line_items: Vec<LineItem>,
    valid_until: NaiveDate,
    status: OfferStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted offer aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedOfferData {
    /// Persisted offer identifier.
    pub id: OfferId,
    /// Persisted owning client.
    pub client_id: ClientId,
    /// Persisted title.
    pub title: String,
    /// Persisted line items.
    pub line_items: Vec<LineItem>,
    /// Persisted last day of validity.
    pub valid_until: NaiveDate,
    /// Persisted status.
    pub status: OfferStatus,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Offer {
    /// Creates a new draft offer.
    ///
    /// # Errors
    ///
    /// Returns [`BillingDomainError::EmptyDescription`] for a blank title and
    /// [`BillingDomainError::EmptyLineItems`] without line items.
    pub fn new(
        client_id: ClientId,
        title: impl Into<String>,
        line_items: Vec<LineItem>,
        valid_until: NaiveDate,
        clock: &impl Clock,
    ) -> Result<Self, BillingDomainError> {
        let title = title.into().trim().to_owned();
        if title.is_empty() {
            return Err(BillingDomainError::EmptyDescription);
        }
        if line_items.is_empty() {
            return Err(BillingDomainError::EmptyLineItems);
        }
        let timestamp = clock.utc();
        Ok(Self {
            id: OfferId::new(),
            client_id,
            title,
            line_items,
            valid_until,
            status: OfferStatus::Draft,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs an offer from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedOfferData) -> Self {
        Self {
            id: data.id,
            client_id: data.client_id,
            title: data.title,
            line_items: data.line_items,
            valid_until: data.valid_until,
            status: data.status,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the offer identifier.
    #[must_use]
    pub const fn id(&self) -> OfferId {
        self.id
    }

    /// Returns the owning client.
    #[must_use]
    pub const fn client_id(&self) -> ClientId {
        self.client_id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the line items.
    #[must_use]
    pub fn line_items(&self) -> &[LineItem] {
        &self.line_items
    }

    /// Returns the last day of validity.
    #[must_use]
    pub const fn valid_until(&self) -> NaiveDate {
        self.valid_until
    }

    /// Returns the current status.
    #[must_use]
    pub const fn status(&self) -> OfferStatus {
        self.status
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

    /// Returns the computed grand total.
    ///
    /// # Errors
    ///
    /// Returns [`BillingDomainError::AmountOverflow`] when the sum exceeds
    /// the representable range.
    pub fn total(&self) -> Result<Money, BillingDomainError> {
        sum_totals(&self.line_items)
    }

    /// Returns `true` when the validity window has lapsed.
    #[must_use]
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.valid_until < today
    }

    /// Marks the offer as delivered to the client.
    ///
    /// # Errors
    ///
    /// Returns [`BillingDomainError::InvalidOfferTransition`] unless the
    /// offer is a draft.
    pub fn send(&mut self, clock: &impl Clock) -> Result<(), BillingDomainError> {
        self.transition_to(OfferStatus::Sent, clock)
    }

    /// Records the client's acceptance.
    ///
    /// # Errors
    ///
    /// Returns [`BillingDomainError::OfferExpired`] past the validity date
    /// and [`BillingDomainError::InvalidOfferTransition`] unless the offer
    /// was sent.
    pub fn accept(&mut self, today: NaiveDate, clock: &impl Clock) -> Result<(), BillingDomainError> {
        self.decide(OfferStatus::Accepted, today, clock)
    }

    /// Records the client's refusal.
    ///
    /// # Errors
    ///
    /// Returns [`BillingDomainError::OfferExpired`] past the validity date
    /// and [`BillingDomainError::InvalidOfferTransition`] unless the offer
    /// was sent.
    pub fn decline(
        &mut self,
        today: NaiveDate,
        clock: &impl Clock,
    ) -> Result<(), BillingDomainError> {
        self.decide(OfferStatus::Declined, today, clock)
    }

    fn decide(
        &mut self,
        target: OfferStatus,
        today: NaiveDate,
        clock: &impl Clock,
    ) -> Result<(), BillingDomainError> {
        if self.is_expired(today) {
            return Err(BillingDomainError::OfferExpired {
                offer_id: self.id,
                valid_until: self.valid_until,
            });
        }
        self.transition_to(target, clock)
    }

    fn transition_to(
        &mut self,
        target: OfferStatus,
        clock: &impl Clock,
    ) -> Result<(), BillingDomainError> {
        if !self.status.can_transition_to(target) {
            return Err(BillingDomainError::InvalidOfferTransition {
                offer_id: self.id,
                from: self.status,
                to: target,
            });
        }
        self.status = target;
        self.updated_at = clock.utc();
        Ok(())
    }
}
