//! Service layer for domain records and expiry alerts.

use crate::client::domain::ClientId;
use crate::hosting::{
    domain::{
        DomainName, DomainRecord, DomainRecordId, ExpiryAlert, ExpiryDates, HostingDomainError,
    },
    ports::{DomainRecordRepository, DomainRecordRepositoryError},
};
use crate::identity::domain::Actor;
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating or updating a domain record.
#[derive(Debug, Clone)]
pub struct CreateDomainRecordRequest {
    client_id: ClientId,
    name: String,
    registrar: Option<String>,
    domain_expires_on: NaiveDate,
    hosting_expires_on: Option<NaiveDate>,
    ssl_expires_on: Option<NaiveDate>,
}

impl CreateDomainRecordRequest {
    /// Creates a request with required fields.
    #[must_use]
    pub fn new(
        client_id: ClientId,
        name: impl Into<String>,
        domain_expires_on: NaiveDate,
    ) -> Self {
        Self {
            client_id,
            name: name.into(),
            registrar: None,
            domain_expires_on,
            hosting_expires_on: None,
            ssl_expires_on: None,
        }
    }

    /// Sets the registrar label.
    #[must_use]
    pub fn with_registrar(mut self, registrar: impl Into<String>) -> Self {
        self.registrar = Some(registrar.into());
        self
    }

    /// Tracks a hosting contract expiry.
    #[must_use]
    pub const fn with_hosting_expiry(mut self, date: NaiveDate) -> Self {
        self.hosting_expires_on = Some(date);
        self
    }

    /// Tracks an SSL certificate expiry.
    #[must_use]
    pub const fn with_ssl_expiry(mut self, date: NaiveDate) -> Self {
        self.ssl_expires_on = Some(date);
        self
    }

    const fn expiries(&self) -> ExpiryDates {
        ExpiryDates {
            domain: self.domain_expires_on,
            hosting: self.hosting_expires_on,
            ssl: self.ssl_expires_on,
        }
    }
}

/// Service-level errors for hosting operations.
#[derive(Debug, Error)]
pub enum HostingServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] HostingDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Records(#[from] DomainRecordRepositoryError),
    /// The acting user lacks permission for this operation.
    #[error("operation not permitted for this actor")]
    Forbidden,
    /// The record was not found or is not visible to the actor.
    #[error("domain record not found: {0}")]
    RecordMissing(DomainRecordId),
}

/// Result type for hosting operations.
pub type HostingServiceResult<T> = Result<T, HostingServiceError>;

/// Domain record administration and expiry alerting.
///
/// Admins hold full CRUD; clients read records owned by their own client
/// record; workers have no access.
#[derive(Clone)]
pub struct HostingService<R, C>
where
    R: DomainRecordRepository,
    C: Clock + Send + Sync,
{
    records: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> HostingService<R, C>
where
    R: DomainRecordRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new hosting service.
    #[must_use]
    pub const fn new(records: Arc<R>, clock: Arc<C>) -> Self {
        Self { records, clock }
    }

    /// Creates a domain record (admin only).
    ///
    /// # Errors
    ///
    /// Returns [`HostingDomainError::InvalidDomainName`] (wrapped) for
    /// malformed names.
    pub async fn create_record(
        &self,
        actor: &Actor,
        request: CreateDomainRecordRequest,
    ) -> HostingServiceResult<DomainRecord> {
        if !actor.is_admin() {
            return Err(HostingServiceError::Forbidden);
        }
        let name = DomainName::new(request.name.clone())?;
        let record = DomainRecord::new(
            request.client_id,
            name,
            request.registrar.clone(),
            request.expiries(),
            &*self.clock,
        );
        self.records.store(&record).await?;
        Ok(record)
    }

    /// Replaces a record's registrar and expiry fields (admin only).
    ///
    /// The owning client and domain name are immutable.
    ///
    /// # Errors
    ///
    /// Returns [`HostingServiceError::RecordMissing`] when absent.
    pub async fn update_record(
        &self,
        actor: &Actor,
        record_id: DomainRecordId,
        request: CreateDomainRecordRequest,
    ) -> HostingServiceResult<DomainRecord> {
        if !actor.is_admin() {
            return Err(HostingServiceError::Forbidden);
        }
        let mut record = self.require_record(record_id).await?;
        record.update_details(request.registrar.clone(), request.expiries(), &*self.clock);
        self.records.update(&record).await?;
        Ok(record)
    }

    /// Deletes a record (admin only).
    ///
    /// # Errors
    ///
    /// Returns [`HostingServiceError::RecordMissing`] when absent.
    pub async fn delete_record(
        &self,
        actor: &Actor,
        record_id: DomainRecordId,
    ) -> HostingServiceResult<()> {
        if !actor.is_admin() {
            return Err(HostingServiceError::Forbidden);
        }
        self.records.delete(record_id).await.map_err(|err| {
            if matches!(err, DomainRecordRepositoryError::NotFound(_)) {
                HostingServiceError::RecordMissing(record_id)
            } else {
                HostingServiceError::Records(err)
            }
        })
    }

    /// Returns a record visible to the actor.
    ///
    /// # Errors
    ///
    /// Returns [`HostingServiceError::RecordMissing`] when absent or hidden
    /// and [`HostingServiceError::Forbidden`] for worker actors.
    pub async fn get_record(
        &self,
        actor: &Actor,
        record_id: DomainRecordId,
    ) -> HostingServiceResult<DomainRecord> {
        Self::check_read_access(actor)?;
        let record = self.require_record(record_id).await?;
        if actor.is_admin() || actor.client_id() == Some(record.client_id()) {
            Ok(record)
        } else {
            Err(HostingServiceError::RecordMissing(record_id))
        }
    }

    /// Lists the records visible to the actor.
    ///
    /// # Errors
    ///
    /// Returns [`HostingServiceError::Forbidden`] for worker actors.
    pub async fn list_records(&self, actor: &Actor) -> HostingServiceResult<Vec<DomainRecord>> {
        Self::check_read_access(actor)?;
        if actor.is_admin() {
            return Ok(self.records.list_all().await?);
        }
        let client_id = actor.client_id().ok_or(HostingServiceError::Forbidden)?;
        Ok(self.records.list_for_client(client_id).await?)
    }

    /// Reports every expiry within the 30-day alert window or already past,
    /// across the records visible to the actor, sorted by expiry date.
    ///
    /// # Errors
    ///
    /// Returns [`HostingServiceError::Forbidden`] for worker actors.
    pub async fn expiring_alerts(&self, actor: &Actor) -> HostingServiceResult<Vec<ExpiryAlert>> {
        let records = self.list_records(actor).await?;
        let today = self.clock.utc().date_naive();
        let mut alerts: Vec<ExpiryAlert> = records
            .iter()
            .flat_map(|record| ExpiryAlert::collect(record, today))
            .collect();
        alerts.sort_by(|a, b| {
            (a.expires_on, &a.domain, a.kind).cmp(&(b.expires_on, &b.domain, b.kind))
        });
        Ok(alerts)
    }

    async fn require_record(&self, record_id: DomainRecordId) -> HostingServiceResult<DomainRecord> {
        self.records
            .find_by_id(record_id)
            .await?
            .ok_or(HostingServiceError::RecordMissing(record_id))
    }

    fn check_read_access(actor: &Actor) -> HostingServiceResult<()> {
        if actor.is_worker() {
            return Err(HostingServiceError::Forbidden);
        }
        Ok(())
    }
}
