//! Invoice aggregate root and status state machine.

use super::error::{BillingDomainError, ParseInvoiceStatusError};
use super::ids::InvoiceId;
use super::line_item::{LineItem, sum_totals};
use super::money::Money;
use crate::client::domain::ClientId;
use crate::identity::domain::UserId;
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Lifecycle status of an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    /// Editable; not yet delivered to the counterparty.
    Draft,
    /// Delivered and awaiting payment.
    Sent,
    /// Settled.
    Paid,
    /// Past due without payment.
    Overdue,
    /// Withdrawn before delivery.
    Cancelled,
}

impl InvoiceStatus {
    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Sent => "sent",
            Self::Paid => "paid",
            Self::Overdue => "overdue",
            Self::Cancelled => "cancelled",
        }
    }

    /// Returns `true` when no further transitions are possible.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Paid | Self::Cancelled)
    }

    /// Returns `true` when the state machine permits moving to `target`.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Draft, Self::Sent | Self::Cancelled)
                | (Self::Sent, Self::Paid | Self::Overdue)
                | (Self::Overdue, Self::Paid)
        )
    }
}

impl TryFrom<&str> for InvoiceStatus {
    type Error = ParseInvoiceStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "draft" => Ok(Self::Draft),
            "sent" => Ok(Self::Sent),
            "paid" => Ok(Self::Paid),
            "overdue" => Ok(Self::Overdue),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(ParseInvoiceStatusError(other.to_owned())),
        }
    }
}

/// Human-facing invoice number, unique across all invoices.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvoiceNumber(String);

impl InvoiceNumber {
    /// Creates a validated invoice number.
    ///
    /// # Errors
    ///
    /// Returns [`BillingDomainError::EmptyInvoiceNumber`] when blank.
    pub fn new(value: impl Into<String>) -> Result<Self, BillingDomainError> {
        let value = value.into().trim().to_owned();
        if value.is_empty() {
            return Err(BillingDomainError::EmptyInvoiceNumber);
        }
        Ok(Self(value))
    }

    /// Returns the string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for InvoiceNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Counterparty of an invoice.
///
/// Client invoices are receivables; worker invoices are payables for
/// contracted work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "id")]
pub enum InvoiceParty {
    /// Receivable billed to a client.
    Client(ClientId),
    /// Payable owed to a worker.
    Worker(UserId),
}

/// Invoice aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    id: InvoiceId,
    number: InvoiceNumber,
    party: InvoiceParty,
    line_items: Vec<LineItem>,
    issued_on: NaiveDate,
    due_on: NaiveDate,
    status: InvoiceStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted invoice aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedInvoiceData {
    /// Persisted invoice identifier.
    pub id: InvoiceId,
    /// Persisted invoice number.
    pub number: InvoiceNumber,
    /// Persisted counterparty.
    pub party: InvoiceParty,
    /// Persisted line items.
    pub line_items: Vec<LineItem>,
    /// Persisted issue date.
    pub issued_on: NaiveDate,
    /// Persisted due date.
    pub due_on: NaiveDate,
    /// Persisted status.
    pub status: InvoiceStatus,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Invoice {
    /// Creates a new draft invoice.
    ///
    /// # Errors
    ///
    /// Returns [`BillingDomainError::EmptyLineItems`] without line items and
    /// [`BillingDomainError::DueBeforeIssued`] when the due date precedes the
    /// issue date.
    pub fn new(
        number: InvoiceNumber,
        party: InvoiceParty,
        line_items: Vec<LineItem>,
        issued_on: NaiveDate,
        due_on: NaiveDate,
        clock: &impl Clock,
    ) -> Result<Self, BillingDomainError> {
        if line_items.is_empty() {
            return Err(BillingDomainError::EmptyLineItems);
        }
        if due_on < issued_on {
            return Err(BillingDomainError::DueBeforeIssued { issued_on, due_on });
        }
        let timestamp = clock.utc();
        Ok(Self {
            id: InvoiceId::new(),
            number,
            party,
            line_items,
            issued_on,
            due_on,
            status: InvoiceStatus::Draft,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs an invoice from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedInvoiceData) -> Self {
        Self {
            id: data.id,
            number: data.number,
            party: data.party,
            line_items: data.line_items,
            issued_on: data.issued_on,
            due_on: data.due_on,
            status: data.status,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the invoice identifier.
    #[must_use]
    pub const fn id(&self) -> InvoiceId {
        self.id
    }

    /// Returns the invoice number.
    #[must_use]
    pub const fn number(&self) -> &InvoiceNumber {
        &self.number
    }

    /// Returns the counterparty.
    #[must_use]
    pub const fn party(&self) -> InvoiceParty {
        self.party
    }

    /// Returns the line items.
    #[must_use]
    pub fn line_items(&self) -> &[LineItem] {
        &self.line_items
    }

    /// Returns the issue date.
    #[must_use]
    pub const fn issued_on(&self) -> NaiveDate {
        self.issued_on
    }

    /// Returns the due date.
    #[must_use]
    pub const fn due_on(&self) -> NaiveDate {
        self.due_on
    }

    /// Returns the current status.
    #[must_use]
    pub const fn status(&self) -> InvoiceStatus {
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

    /// Returns `true` when the invoice is unpaid past its due date.
    #[must_use]
    pub fn is_past_due(&self, today: NaiveDate) -> bool {
        matches!(self.status, InvoiceStatus::Sent) && self.due_on < today
    }

    /// Moves the invoice to a new status.
    ///
    /// # Errors
    ///
    /// Returns [`BillingDomainError::InvalidInvoiceTransition`] when the
    /// state machine forbids the move.
    pub fn transition_to(
        &mut self,
        target: InvoiceStatus,
        clock: &impl Clock,
    ) -> Result<(), BillingDomainError> {
        if !self.status.can_transition_to(target) {
            return Err(BillingDomainError::InvalidInvoiceTransition {
                invoice_id: self.id,
                from: self.status,
                to: target,
            });
        }
        self.status = target;
        self.updated_at = clock.utc();
        Ok(())
    }
}
