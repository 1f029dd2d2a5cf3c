//! `PostgreSQL` repository implementations for invoice and offer storage.

use super::{
    models::{InvoiceRow, NewInvoiceRow, NewOfferRow, OfferRow},
    schema::{invoices, offers},
};
use crate::billing::{
    domain::{
        Invoice, InvoiceId, InvoiceNumber, InvoiceParty, InvoiceStatus, LineItem, Offer, OfferId,
        OfferStatus, PersistedInvoiceData, PersistedOfferData,
    },
    ports::{
        InvoiceRepository, InvoiceRepositoryError, InvoiceRepositoryResult, OfferRepository,
        OfferRepositoryError, OfferRepositoryResult,
    },
};
use crate::client::domain::ClientId;
use crate::identity::domain::UserId;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by billing adapters.
pub type BillingPgPool = Pool<ConnectionManager<PgConnection>>;

const PARTY_CLIENT: &str = "client";
const PARTY_WORKER: &str = "worker";
const NUMBER_UNIQUE_CONSTRAINT: &str = "idx_invoices_number_unique";

/// `PostgreSQL`-backed invoice repository.
///
/// Line items are stored as a JSONB array; totals are recomputed from them
/// on read.
#[derive(Debug, Clone)]
pub struct PostgresInvoiceRepository {
    pool: BillingPgPool,
}

impl PostgresInvoiceRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: BillingPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> InvoiceRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> InvoiceRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(InvoiceRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(InvoiceRepositoryError::persistence)?
    }
}

#[async_trait]
impl InvoiceRepository for PostgresInvoiceRepository {
    async fn store(&self, invoice: &Invoice) -> InvoiceRepositoryResult<()> {
        let invoice_id = invoice.id();
        let number = invoice.number().clone();
        let new_row = invoice_to_new_row(invoice)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(invoices::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match &err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                        if info.constraint_name() == Some(NUMBER_UNIQUE_CONSTRAINT) {
                            InvoiceRepositoryError::DuplicateNumber(number)
                        } else {
                            InvoiceRepositoryError::DuplicateInvoice(invoice_id)
                        }
                    }
                    _ => InvoiceRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, invoice: &Invoice) -> InvoiceRepositoryResult<()> {
        let invoice_id = invoice.id();
        let row = invoice_to_new_row(invoice)?;

        self.run_blocking(move |connection| {
            let affected =
                diesel::update(invoices::table.filter(invoices::id.eq(invoice_id.into_inner())))
                    .set((
                        invoices::line_items.eq(&row.line_items),
                        invoices::issued_on.eq(row.issued_on),
                        invoices::due_on.eq(row.due_on),
                        invoices::status.eq(&row.status),
                        invoices::updated_at.eq(row.updated_at),
                    ))
                    .execute(connection)
                    .map_err(InvoiceRepositoryError::persistence)?;
            if affected == 0 {
                return Err(InvoiceRepositoryError::NotFound(invoice_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: InvoiceId) -> InvoiceRepositoryResult<Option<Invoice>> {
        self.run_blocking(move |connection| {
            let row = invoices::table
                .filter(invoices::id.eq(id.into_inner()))
                .select(InvoiceRow::as_select())
                .first::<InvoiceRow>(connection)
                .optional()
                .map_err(InvoiceRepositoryError::persistence)?;
            row.map(row_to_invoice).transpose()
        })
        .await
    }

    async fn list_all(&self) -> InvoiceRepositoryResult<Vec<Invoice>> {
        self.run_blocking(move |connection| {
            let rows = invoices::table
                .order(invoices::number.asc())
                .select(InvoiceRow::as_select())
                .load::<InvoiceRow>(connection)
                .map_err(InvoiceRepositoryError::persistence)?;
            rows.into_iter().map(row_to_invoice).collect()
        })
        .await
    }

    async fn list_for_client(&self, client_id: ClientId) -> InvoiceRepositoryResult<Vec<Invoice>> {
        self.list_for_party(PARTY_CLIENT, client_id.into_inner()).await
    }

    async fn list_for_worker(&self, worker_id: UserId) -> InvoiceRepositoryResult<Vec<Invoice>> {
        self.list_for_party(PARTY_WORKER, worker_id.into_inner()).await
    }

    async fn delete(&self, id: InvoiceId) -> InvoiceRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let affected =
                diesel::delete(invoices::table.filter(invoices::id.eq(id.into_inner())))
                    .execute(connection)
                    .map_err(InvoiceRepositoryError::persistence)?;
            if affected == 0 {
                return Err(InvoiceRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }
}

impl PostgresInvoiceRepository {
    async fn list_for_party(
        &self,
        kind: &'static str,
        party_id: uuid::Uuid,
    ) -> InvoiceRepositoryResult<Vec<Invoice>> {
        self.run_blocking(move |connection| {
            let rows = invoices::table
                .filter(invoices::party_kind.eq(kind))
                .filter(invoices::party_id.eq(party_id))
                .order(invoices::number.asc())
                .select(InvoiceRow::as_select())
                .load::<InvoiceRow>(connection)
                .map_err(InvoiceRepositoryError::persistence)?;
            rows.into_iter().map(row_to_invoice).collect()
        })
        .await
    }
}

fn invoice_to_new_row(invoice: &Invoice) -> InvoiceRepositoryResult<NewInvoiceRow> {
    let (party_kind, party_id) = match invoice.party() {
        InvoiceParty::Client(client_id) => (PARTY_CLIENT, client_id.into_inner()),
        InvoiceParty::Worker(worker_id) => (PARTY_WORKER, worker_id.into_inner()),
    };
    let line_items = serde_json::to_value(invoice.line_items())
        .map_err(InvoiceRepositoryError::persistence)?;
    Ok(NewInvoiceRow {
        id: invoice.id().into_inner(),
        number: invoice.number().as_str().to_owned(),
        party_kind: party_kind.to_owned(),
        party_id,
        line_items,
        issued_on: invoice.issued_on(),
        due_on: invoice.due_on(),
        status: invoice.status().as_str().to_owned(),
        created_at: invoice.created_at(),
        updated_at: invoice.updated_at(),
    })
}

fn row_to_invoice(row: InvoiceRow) -> InvoiceRepositoryResult<Invoice> {
    let party = match row.party_kind.as_str() {
        PARTY_CLIENT => InvoiceParty::Client(ClientId::from_uuid(row.party_id)),
        PARTY_WORKER => InvoiceParty::Worker(UserId::from_uuid(row.party_id)),
        other => {
            return Err(InvoiceRepositoryError::persistence(std::io::Error::other(
                format!("unknown invoice party kind: {other}"),
            )));
        }
    };
    let number = InvoiceNumber::new(row.number).map_err(InvoiceRepositoryError::persistence)?;
    let status = InvoiceStatus::try_from(row.status.as_str())
        .map_err(InvoiceRepositoryError::persistence)?;
    let line_items: Vec<LineItem> =
        serde_json::from_value(row.line_items).map_err(InvoiceRepositoryError::persistence)?;

    Ok(Invoice::from_persisted(PersistedInvoiceData {
        id: InvoiceId::from_uuid(row.id),
        number,
        party,
        line_items,
        issued_on: row.issued_on,
        due_on: row.due_on,
        status,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

/// `PostgreSQL`-backed offer repository.
#[derive(Debug, Clone)]
pub struct PostgresOfferRepository {
    pool: BillingPgPool,
}

impl PostgresOfferRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: BillingPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> OfferRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> OfferRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(OfferRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(OfferRepositoryError::persistence)?
    }
}

#[async_trait]
impl OfferRepository for PostgresOfferRepository {
    async fn store(&self, offer: &Offer) -> OfferRepositoryResult<()> {
        let offer_id = offer.id();
        let new_row = offer_to_new_row(offer)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(offers::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        OfferRepositoryError::DuplicateOffer(offer_id)
                    }
                    _ => OfferRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, offer: &Offer) -> OfferRepositoryResult<()> {
        let offer_id = offer.id();
        let row = offer_to_new_row(offer)?;

        self.run_blocking(move |connection| {
            let affected =
                diesel::update(offers::table.filter(offers::id.eq(offer_id.into_inner())))
                    .set((
                        offers::title.eq(&row.title),
                        offers::line_items.eq(&row.line_items),
                        offers::valid_until.eq(row.valid_until),
                        offers::status.eq(&row.status),
                        offers::updated_at.eq(row.updated_at),
                    ))
                    .execute(connection)
                    .map_err(OfferRepositoryError::persistence)?;
            if affected == 0 {
                return Err(OfferRepositoryError::NotFound(offer_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: OfferId) -> OfferRepositoryResult<Option<Offer>> {
        self.run_blocking(move |connection| {
            let row = offers::table
                .filter(offers::id.eq(id.into_inner()))
                .select(OfferRow::as_select())
                .first::<OfferRow>(connection)
                .optional()
                .map_err(OfferRepositoryError::persistence)?;
            row.map(row_to_offer).transpose()
        })
        .await
    }

    async fn list_all(&self) -> OfferRepositoryResult<Vec<Offer>> {
        self.run_blocking(move |connection| {
            let rows = offers::table
                .order(offers::created_at.asc())
                .select(OfferRow::as_select())
                .load::<OfferRow>(connection)
                .map_err(OfferRepositoryError::persistence)?;
            rows.into_iter().map(row_to_offer).collect()
        })
        .await
    }

    async fn list_for_client(&self, client_id: ClientId) -> OfferRepositoryResult<Vec<Offer>> {
        self.run_blocking(move |connection| {
            let rows = offers::table
                .filter(offers::client_id.eq(client_id.into_inner()))
                .order(offers::created_at.asc())
                .select(OfferRow::as_select())
                .load::<OfferRow>(connection)
                .map_err(OfferRepositoryError::persistence)?;
            rows.into_iter().map(row_to_offer).collect()
        })
        .await
    }
}

fn offer_to_new_row(offer: &Offer) -> OfferRepositoryResult<NewOfferRow> {
    let line_items =
        serde_json::to_value(offer.line_items()).map_err(OfferRepositoryError::persistence)?;
    Ok(NewOfferRow {
        id: offer.id().into_inner(),
        client_id: offer.client_id().into_inner(),
        title: offer.title().to_owned(),
        line_items,
        valid_until: offer.valid_until(),
        status: offer.status().as_str().to_owned(),
        created_at: offer.created_at(),
        updated_at: offer.updated_at(),
    })
}

fn row_to_offer(row: OfferRow) -> OfferRepositoryResult<Offer> {
    let status =
        OfferStatus::try_from(row.status.as_str()).map_err(OfferRepositoryError::persistence)?;
    let line_items: Vec<LineItem> =
        serde_json::from_value(row.line_items).map_err(OfferRepositoryError::persistence)?;

    Ok(Offer::from_persisted(PersistedOfferData {
        id: OfferId::from_uuid(row.id),
        client_id: ClientId::from_uuid(row.client_id),
        title: row.title,
        line_items,
        valid_until: row.valid_until,
        status,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}
