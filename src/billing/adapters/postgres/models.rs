//! Diesel row models for billing persistence.

use super::schema::{invoices, offers};
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

/// Query result row for invoice records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = invoices)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct InvoiceRow {
    /// Internal invoice identifier.
    pub id: uuid::Uuid,
    /// Human-facing invoice number.
    pub number: String,
    /// Counterparty kind: `client` or `worker`.
    pub party_kind: String,
    /// Counterparty identifier.
    pub party_id: uuid::Uuid,
    /// Line items as a JSON array.
    pub line_items: serde_json::Value,
    /// Issue date.
    pub issued_on: NaiveDate,
    /// Due date.
    pub due_on: NaiveDate,
    /// Lifecycle status.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for invoice records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = invoices)]
pub struct NewInvoiceRow {
    /// Internal invoice identifier.
    pub id: uuid::Uuid,
    /// Human-facing invoice number.
    pub number: String,
    /// Counterparty kind: `client` or `worker`.
    pub party_kind: String,
    /// Counterparty identifier.
    pub party_id: uuid::Uuid,
    /// Line items as a JSON array.
    pub line_items: serde_json::Value,
    /// Issue date.
    pub issued_on: NaiveDate,
    /// Due date.
    pub due_on: NaiveDate,
    /// Lifecycle status.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query result row for offer records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = offers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OfferRow {
    /// Internal offer identifier.
    pub id: uuid::Uuid,
    /// Addressed client.
    pub client_id: uuid::Uuid,
    /// Offer title.
    pub title: String,
    /// Line items as a JSON array.
    pub line_items: serde_json::Value,
    /// Last day of validity.
    pub valid_until: NaiveDate,
    /// Lifecycle status.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for offer records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = offers)]
pub struct NewOfferRow {
    /// Internal offer identifier.
    pub id: uuid::Uuid,
    /// Addressed client.
    pub client_id: uuid::Uuid,
    /// Offer title.
    pub title: String,
    /// Line items as a JSON array.
    pub line_items: serde_json::Value,
    /// Last day of validity.
    pub valid_until: NaiveDate,
    /// Lifecycle status.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
