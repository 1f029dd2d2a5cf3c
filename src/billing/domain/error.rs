//! Error types for billing domain validation and parsing.

use super::ids::{InvoiceId, OfferId};
use super::invoice::InvoiceStatus;
use super::offer::OfferStatus;
use chrono::NaiveDate;
use thiserror::Error;

/// Errors returned while constructing or mutating billing domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BillingDomainError {
    /// A line item description is empty after trimming.
    #[error("line item description must not be empty")]
    EmptyDescription,

    /// A line item quantity of zero is meaningless.
    #[error("line item quantity must be positive")]
    ZeroQuantity,

    /// A monetary computation exceeded the representable range.
    #[error("monetary amount overflow")]
    AmountOverflow,

    /// Invoices and offers require at least one line item.
    #[error("at least one line item is required")]
    EmptyLineItems,

    /// The invoice number is empty after trimming.
    #[error("invoice number must not be empty")]
    EmptyInvoiceNumber,

    /// The due date precedes the issue date.
    #[error("due date {due_on} precedes issue date {issued_on}")]
    DueBeforeIssued {
        /// Requested issue date.
        issued_on: NaiveDate,
        /// Requested due date.
        due_on: NaiveDate,
    },

    /// The requested invoice status change is not permitted.
    #[error("invalid status transition for invoice {invoice_id}: {from:?} -> {to:?}")]
    InvalidInvoiceTransition {
        /// Invoice being mutated.
        invoice_id: InvoiceId,
        /// Current status.
        from: InvoiceStatus,
        /// Requested status.
        to: InvoiceStatus,
    },

    /// The requested offer status change is not permitted.
    #[error("invalid status transition for offer {offer_id}: {from:?} -> {to:?}")]
    InvalidOfferTransition {
        /// Offer being mutated.
        offer_id: OfferId,
        /// Current status.
        from: OfferStatus,
        /// Requested status.
        to: OfferStatus,
    },

    /// The offer's validity window has lapsed.
    #[error("offer {offer_id} expired on {valid_until}")]
    OfferExpired {
        /// Offer being mutated.
        offer_id: OfferId,
        /// Last day the offer was valid.
        valid_until: NaiveDate,
    },
}

/// Error returned while parsing invoice statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown invoice status: {0}")]
pub struct ParseInvoiceStatusError(pub String);

/// Error returned while parsing offer statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown offer status: {0}")]
pub struct ParseOfferStatusError(pub String);
