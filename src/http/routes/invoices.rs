//! Invoice endpoints.

use crate::billing::domain::{Invoice, InvoiceId, InvoiceParty, LineItem, Money};
use crate::billing::services::{CreateInvoiceRequest, InvoiceServiceError};
use crate::http::auth::CurrentActor;
use crate::http::error::ApiError;
use crate::http::state::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Wire representation of an invoice line item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItemDto {
    /// Billed description.
    pub description: String,
    /// Billed quantity.
    pub quantity: u32,
    /// Unit price in cents.
    pub unit_price_cents: i64,
}

impl LineItemDto {
    pub(super) fn from_item(item: &LineItem) -> Self {
        Self {
            description: item.description().to_owned(),
            quantity: item.quantity(),
            unit_price_cents: item.unit_price().cents(),
        }
    }

    pub(super) fn into_item(self) -> Result<LineItem, crate::billing::domain::BillingDomainError> {
        LineItem::new(
            self.description,
            self.quantity,
            Money::from_cents(self.unit_price_cents),
        )
    }
}

/// Wire representation of an invoice.
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceDto {
    /// Invoice identifier.
    pub id: InvoiceId,
    /// Human-facing invoice number.
    pub number: String,
    /// Counterparty.
    pub party: InvoiceParty,
    /// Billed line items.
    pub line_items: Vec<LineItemDto>,
    /// Issue date.
    pub issued_on: NaiveDate,
    /// Due date.
    pub due_on: NaiveDate,
    /// Lifecycle status.
    pub status: String,
    /// Grand total in cents.
    pub total_cents: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl InvoiceDto {
    fn from_invoice(invoice: &Invoice) -> Result<Self, ApiError> {
        let total = invoice.total().map_err(InvoiceServiceError::from)?;
        Ok(Self {
            id: invoice.id(),
            number: invoice.number().as_str().to_owned(),
            party: invoice.party(),
            line_items: invoice.line_items().iter().map(LineItemDto::from_item).collect(),
            issued_on: invoice.issued_on(),
            due_on: invoice.due_on(),
            status: invoice.status().as_str().to_owned(),
            total_cents: total.cents(),
            created_at: invoice.created_at(),
            updated_at: invoice.updated_at(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct InvoiceBody {
    number: String,
    party: InvoiceParty,
    line_items: Vec<LineItemDto>,
    issued_on: NaiveDate,
    due_on: NaiveDate,
}

pub(super) fn router() -> Router<AppState> {
    Router::new()
        .route("/invoices", get(list_invoices).post(create_invoice))
        .route("/invoices/{id}", get(get_invoice).delete(delete_invoice))
        .route("/invoices/{id}/send", post(send_invoice))
        .route("/invoices/{id}/pay", post(mark_paid))
}

async fn list_invoices(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
) -> Result<Json<Vec<InvoiceDto>>, ApiError> {
    let invoices = state.invoices.list_invoices(&actor).await?;
    let dtos = invoices
        .iter()
        .map(InvoiceDto::from_invoice)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(dtos))
}

async fn create_invoice(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Json(body): Json<InvoiceBody>,
) -> Result<(StatusCode, Json<InvoiceDto>), ApiError> {
    let line_items = body
        .line_items
        .into_iter()
        .map(LineItemDto::into_item)
        .collect::<Result<Vec<_>, _>>()
        .map_err(InvoiceServiceError::from)?;
    let request = CreateInvoiceRequest::new(
        body.number,
        body.party,
        line_items,
        body.issued_on,
        body.due_on,
    );
    let invoice = state.invoices.create_invoice(&actor, request).await?;
    Ok((StatusCode::CREATED, Json(InvoiceDto::from_invoice(&invoice)?)))
}

async fn get_invoice(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<InvoiceId>,
) -> Result<Json<InvoiceDto>, ApiError> {
    let invoice = state.invoices.get_invoice(&actor, id).await?;
    Ok(Json(InvoiceDto::from_invoice(&invoice)?))
}

async fn delete_invoice(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<InvoiceId>,
) -> Result<StatusCode, ApiError> {
    state.invoices.delete_invoice(&actor, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn send_invoice(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<InvoiceId>,
) -> Result<Json<InvoiceDto>, ApiError> {
    let invoice = state.invoices.send_invoice(&actor, id).await?;
    Ok(Json(InvoiceDto::from_invoice(&invoice)?))
}

async fn mark_paid(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<InvoiceId>,
) -> Result<Json<InvoiceDto>, ApiError> {
    let invoice = state.invoices.mark_paid(&actor, id).await?;
    Ok(Json(InvoiceDto::from_invoice(&invoice)?))
}
