//! `PostgreSQL` repository implementation for domain record storage.

use super::{
    models::{DomainRecordRow, NewDomainRecordRow},
    schema::domain_records,
};
use crate::client::domain::ClientId;
use crate::hosting::{
    domain::{DomainName, DomainRecord, DomainRecordId, ExpiryDates, PersistedDomainRecordData},
    ports::{DomainRecordRepository, DomainRecordRepositoryError, DomainRecordRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by the hosting adapter.
pub type HostingPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed domain record repository.
#[derive(Debug, Clone)]
pub struct PostgresDomainRecordRepository {
    pool: HostingPgPool,
}

impl PostgresDomainRecordRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: HostingPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> DomainRecordRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> DomainRecordRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool
                .get()
                .map_err(DomainRecordRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(DomainRecordRepositoryError::persistence)?
    }
}

#[async_trait]
impl DomainRecordRepository for PostgresDomainRecordRepository {
    async fn store(&self, record: &DomainRecord) -> DomainRecordRepositoryResult<()> {
        let record_id = record.id();
        let new_row = record_to_new_row(record);

        self.run_blocking(move |connection| {
            diesel::insert_into(domain_records::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        DomainRecordRepositoryError::DuplicateRecord(record_id)
                    }
                    _ => DomainRecordRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, record: &DomainRecord) -> DomainRecordRepositoryResult<()> {
        let record_id = record.id();
        let row = record_to_new_row(record);

        self.run_blocking(move |connection| {
            let affected = diesel::update(
                domain_records::table.filter(domain_records::id.eq(record_id.into_inner())),
            )
            .set((
                domain_records::registrar.eq(&row.registrar),
                domain_records::domain_expires_on.eq(row.domain_expires_on),
                domain_records::hosting_expires_on.eq(row.hosting_expires_on),
                domain_records::ssl_expires_on.eq(row.ssl_expires_on),
                domain_records::updated_at.eq(row.updated_at),
            ))
            .execute(connection)
            .map_err(DomainRecordRepositoryError::persistence)?;
            if affected == 0 {
                return Err(DomainRecordRepositoryError::NotFound(record_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(
        &self,
        id: DomainRecordId,
    ) -> DomainRecordRepositoryResult<Option<DomainRecord>> {
        self.run_blocking(move |connection| {
            let row = domain_records::table
                .filter(domain_records::id.eq(id.into_inner()))
                .select(DomainRecordRow::as_select())
                .first::<DomainRecordRow>(connection)
                .optional()
                .map_err(DomainRecordRepositoryError::persistence)?;
            row.map(row_to_record).transpose()
        })
        .await
    }

    async fn list_all(&self) -> DomainRecordRepositoryResult<Vec<DomainRecord>> {
        self.run_blocking(move |connection| {
            let rows = domain_records::table
                .order(domain_records::name.asc())
                .select(DomainRecordRow::as_select())
                .load::<DomainRecordRow>(connection)
                .map_err(DomainRecordRepositoryError::persistence)?;
            rows.into_iter().map(row_to_record).collect()
        })
        .await
    }

    async fn list_for_client(
        &self,
        client_id: ClientId,
    ) -> DomainRecordRepositoryResult<Vec<DomainRecord>> {
        self.run_blocking(move |connection| {
            let rows = domain_records::table
                .filter(domain_records::client_id.eq(client_id.into_inner()))
                .order(domain_records::name.asc())
                .select(DomainRecordRow::as_select())
                .load::<DomainRecordRow>(connection)
                .map_err(DomainRecordRepositoryError::persistence)?;
            rows.into_iter().map(row_to_record).collect()
        })
        .await
    }

    async fn delete(&self, id: DomainRecordId) -> DomainRecordRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let affected = diesel::delete(
                domain_records::table.filter(domain_records::id.eq(id.into_inner())),
            )
            .execute(connection)
            .map_err(DomainRecordRepositoryError::persistence)?;
            if affected == 0 {
                return Err(DomainRecordRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }
}

fn record_to_new_row(record: &DomainRecord) -> NewDomainRecordRow {
    let expiries = record.expiries();
    NewDomainRecordRow {
        id: record.id().into_inner(),
        client_id: record.client_id().into_inner(),
        name: record.name().as_str().to_owned(),
        registrar: record.registrar().map(str::to_owned),
        domain_expires_on: expiries.domain,
        hosting_expires_on: expiries.hosting,
        ssl_expires_on: expiries.ssl,
        created_at: record.created_at(),
        updated_at: record.updated_at(),
    }
}

fn row_to_record(row: DomainRecordRow) -> DomainRecordRepositoryResult<DomainRecord> {
    let name = DomainName::new(row.name).map_err(DomainRecordRepositoryError::persistence)?;
    Ok(DomainRecord::from_persisted(PersistedDomainRecordData {
        id: DomainRecordId::from_uuid(row.id),
        client_id: ClientId::from_uuid(row.client_id),
        name,
        registrar: row.registrar,
        expiries: ExpiryDates {
            domain: row.domain_expires_on,
            hosting: row.hosting_expires_on,
            ssl: row.ssl_expires_on,
        },
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}
