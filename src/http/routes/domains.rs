//! Domain record and expiry alert endpoints.

use crate::client::domain::ClientId;
use crate::hosting::domain::{DomainRecord, DomainRecordId, ExpiryAlert};
use crate::hosting::services::CreateDomainRecordRequest;
use crate::http::auth::CurrentActor;
use crate::http::error::ApiError;
use crate::http::state::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Wire representation of a domain record.
#[derive(Debug, Clone, Serialize)]
pub struct DomainRecordDto {
    /// Record identifier.
    pub id: DomainRecordId,
    /// Owning client.
    pub client_id: ClientId,
    /// Domain name.
    pub name: String,
    /// Registrar label.
    pub registrar: Option<String>,
    /// Registration expiry of the domain itself.
    pub domain_expires_on: NaiveDate,
    /// Hosting contract expiry.
    pub hosting_expires_on: Option<NaiveDate>,
    /// SSL certificate expiry.
    pub ssl_expires_on: Option<NaiveDate>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl DomainRecordDto {
    fn from_record(record: &DomainRecord) -> Self {
        let expiries = record.expiries();
        Self {
            id: record.id(),
            client_id: record.client_id(),
            name: record.name().as_str().to_owned(),
            registrar: record.registrar().map(str::to_owned),
            domain_expires_on: expiries.domain,
            hosting_expires_on: expiries.hosting,
            ssl_expires_on: expiries.ssl,
            created_at: record.created_at(),
            updated_at: record.updated_at(),
        }
    }
}

/// Wire representation of an expiry alert.
#[derive(Debug, Clone, Serialize)]
pub struct ExpiryAlertDto {
    /// Record the alert belongs to.
    pub record_id: DomainRecordId,
    /// Owning client.
    pub client_id: ClientId,
    /// Domain name.
    pub domain: String,
    /// Which expiry is lapsing.
    pub kind: String,
    /// The lapsing date.
    pub expires_on: NaiveDate,
    /// Whether the date has already passed.
    pub past_due: bool,
}

impl ExpiryAlertDto {
    fn from_alert(alert: &ExpiryAlert) -> Self {
        Self {
            record_id: alert.record_id,
            client_id: alert.client_id,
            domain: alert.domain.as_str().to_owned(),
            kind: alert.kind.as_str().to_owned(),
            expires_on: alert.expires_on,
            past_due: alert.past_due,
        }
    }
}

#[derive(Debug, Deserialize)]
struct DomainRecordBody {
    client_id: ClientId,
    name: String,
    registrar: Option<String>,
    domain_expires_on: NaiveDate,
    hosting_expires_on: Option<NaiveDate>,
    ssl_expires_on: Option<NaiveDate>,
}

impl DomainRecordBody {
    fn into_request(self) -> CreateDomainRecordRequest {
        let mut request =
            CreateDomainRecordRequest::new(self.client_id, self.name, self.domain_expires_on);
        if let Some(registrar) = self.registrar {
            request = request.with_registrar(registrar);
        }
        if let Some(date) = self.hosting_expires_on {
            request = request.with_hosting_expiry(date);
        }
        if let Some(date) = self.ssl_expires_on {
            request = request.with_ssl_expiry(date);
        }
        request
    }
}

pub(super) fn router() -> Router<AppState> {
    Router::new()
        .route("/domains", get(list_records).post(create_record))
        .route("/domains/alerts", get(expiring_alerts))
        .route("/domains/{id}", put(update_record).delete(delete_record))
}

async fn list_records(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
) -> Result<Json<Vec<DomainRecordDto>>, ApiError> {
    let records = state.hosting.list_records(&actor).await?;
    Ok(Json(records.iter().map(DomainRecordDto::from_record).collect()))
}

async fn create_record(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Json(body): Json<DomainRecordBody>,
) -> Result<(StatusCode, Json<DomainRecordDto>), ApiError> {
    let record = state.hosting.create_record(&actor, body.into_request()).await?;
    Ok((
        StatusCode::CREATED,
        Json(DomainRecordDto::from_record(&record)),
    ))
}

async fn update_record(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<DomainRecordId>,
    Json(body): Json<DomainRecordBody>,
) -> Result<Json<DomainRecordDto>, ApiError> {
    let record = state
        .hosting
        .update_record(&actor, id, body.into_request())
        .await?;
    Ok(Json(DomainRecordDto::from_record(&record)))
}

async fn delete_record(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<DomainRecordId>,
) -> Result<StatusCode, ApiError> {
    state.hosting.delete_record(&actor, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn expiring_alerts(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
) -> Result<Json<Vec<ExpiryAlertDto>>, ApiError> {
    let alerts = state.hosting.expiring_alerts(&actor).await?;
    Ok(Json(alerts.iter().map(ExpiryAlertDto::from_alert).collect()))
}
