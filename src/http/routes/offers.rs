//! Offer endpoints, including the rendered document.

use super::invoices::LineItemDto;
use crate::billing::domain::{Offer, OfferId};
use crate::billing::services::{CreateOfferRequest, OfferServiceError};
use crate::client::domain::ClientId;
use crate::http::auth::CurrentActor;
use crate::http::error::ApiError;
use crate::http::state::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Wire representation of an offer.
#[derive(Debug, Clone, Serialize)]
pub struct OfferDto {
    /// Offer identifier.
    pub id: OfferId,
    /// Addressed client.
    pub client_id: ClientId,
    /// Offer title.
    pub title: String,
    /// Quoted line items.
    pub line_items: Vec<LineItemDto>,
    /// Last day the offer may be accepted.
    pub valid_until: NaiveDate,
    /// Lifecycle status.
    pub status: String,
    /// Grand total in cents.
    pub total_cents: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl OfferDto {
    fn from_offer(offer: &Offer) -> Result<Self, ApiError> {
        let total = offer.total().map_err(OfferServiceError::from)?;
        Ok(Self {
            id: offer.id(),
            client_id: offer.client_id(),
            title: offer.title().to_owned(),
            line_items: offer.line_items().iter().map(LineItemDto::from_item).collect(),
            valid_until: offer.valid_until(),
            status: offer.status().as_str().to_owned(),
            total_cents: total.cents(),
            created_at: offer.created_at(),
            updated_at: offer.updated_at(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct OfferBody {
    client_id: ClientId,
    title: String,
    line_items: Vec<LineItemDto>,
    valid_until: NaiveDate,
}

pub(super) fn router() -> Router<AppState> {
    Router::new()
        .route("/offers", get(list_offers).post(create_offer))
        .route("/offers/{id}", get(get_offer))
        .route("/offers/{id}/document", get(render_document))
        .route("/offers/{id}/send", post(send_offer))
        .route("/offers/{id}/accept", post(accept_offer))
        .route("/offers/{id}/decline", post(decline_offer))
}

async fn list_offers(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
) -> Result<Json<Vec<OfferDto>>, ApiError> {
    let offers = state.offers.list_offers(&actor).await?;
    let dtos = offers
        .iter()
        .map(OfferDto::from_offer)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(dtos))
}

async fn create_offer(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Json(body): Json<OfferBody>,
) -> Result<(StatusCode, Json<OfferDto>), ApiError> {
    let line_items = body
        .line_items
        .into_iter()
        .map(LineItemDto::into_item)
        .collect::<Result<Vec<_>, _>>()
        .map_err(OfferServiceError::from)?;
    let request =
        CreateOfferRequest::new(body.client_id, body.title, line_items, body.valid_until);
    let offer = state.offers.create_offer(&actor, request).await?;
    Ok((StatusCode::CREATED, Json(OfferDto::from_offer(&offer)?)))
}

async fn get_offer(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<OfferId>,
) -> Result<Json<OfferDto>, ApiError> {
    let offer = state.offers.get_offer(&actor, id).await?;
    Ok(Json(OfferDto::from_offer(&offer)?))
}

async fn render_document(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<OfferId>,
) -> Result<Html<String>, ApiError> {
    let document = state.offers.render_document(&actor, id).await?;
    Ok(Html(document))
}

async fn send_offer(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<OfferId>,
) -> Result<Json<OfferDto>, ApiError> {
    let offer = state.offers.send_offer(&actor, id).await?;
    Ok(Json(OfferDto::from_offer(&offer)?))
}

async fn accept_offer(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<OfferId>,
) -> Result<Json<OfferDto>, ApiError> {
    let offer = state.offers.accept_offer(&actor, id).await?;
    Ok(Json(OfferDto::from_offer(&offer)?))
}

async fn decline_offer(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<OfferId>,
) -> Result<Json<OfferDto>, ApiError> {
    let offer = state.offers.decline_offer(&actor, id).await?;
    Ok(Json(OfferDto::from_offer(&offer)?))
}
