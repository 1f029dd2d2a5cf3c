//! Diesel row models for hosting persistence.

use super::schema::domain_records;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

/// Query result row for domain records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = domain_records)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DomainRecordRow {
    /// Internal record identifier.
    pub id: uuid::Uuid,
    /// Owning client.
    pub client_id: uuid::Uuid,
    /// Domain name in label format.
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

/// Insert model for domain records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = domain_records)]
pub struct NewDomainRecordRow {
    /// Internal record identifier.
    pub id: uuid::Uuid,
    /// Owning client.
    pub client_id: uuid::Uuid,
    /// Domain name in label format.
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
