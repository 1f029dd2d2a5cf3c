//! Dependency check over the task, invoice, offer, and domain record ports.

use async_trait::async_trait;
use std::sync::Arc;

use crate::billing::ports::{InvoiceRepository, OfferRepository};
use crate::client::domain::ClientId;
use crate::client::ports::{ClientDependencyCheck, ClientRepositoryError, ClientRepositoryResult};
use crate::hosting::ports::DomainRecordRepository;
use crate::task::ports::TaskRepository;

/// [`ClientDependencyCheck`] backed by the repositories of the referencing
/// contexts.
///
/// Works over any backend; invoices are consulted here because their
/// polymorphic party column carries no foreign key in the `PostgreSQL`
/// schema.
pub struct RepositoryDependencyCheck<T, I, O, D>
where
    T: TaskRepository,
    I: InvoiceRepository,
    O: OfferRepository,
    D: DomainRecordRepository,
{
    tasks: Arc<T>,
    invoices: Arc<I>,
    offers: Arc<O>,
    records: Arc<D>,
}

impl<T, I, O, D> RepositoryDependencyCheck<T, I, O, D>
where
    T: TaskRepository,
    I: InvoiceRepository,
    O: OfferRepository,
    D: DomainRecordRepository,
{
    /// Creates a check consulting the given repositories.
    #[must_use]
    pub const fn new(tasks: Arc<T>, invoices: Arc<I>, offers: Arc<O>, records: Arc<D>) -> Self {
        Self {
            tasks,
            invoices,
            offers,
            records,
        }
    }
}

#[async_trait]
impl<T, I, O, D> ClientDependencyCheck for RepositoryDependencyCheck<T, I, O, D>
where
    T: TaskRepository,
    I: InvoiceRepository,
    O: OfferRepository,
    D: DomainRecordRepository,
{
    async fn has_dependents(&self, client_id: ClientId) -> ClientRepositoryResult<bool> {
        let tasks = self
            .tasks
            .list_for_client(client_id)
            .await
            .map_err(ClientRepositoryError::persistence)?;
        if !tasks.is_empty() {
            return Ok(true);
        }
        let invoices = self
            .invoices
            .list_for_client(client_id)
            .await
            .map_err(ClientRepositoryError::persistence)?;
        if !invoices.is_empty() {
            return Ok(true);
        }
        let offers = self
            .offers
            .list_for_client(client_id)
            .await
            .map_err(ClientRepositoryError::persistence)?;
        if !offers.is_empty() {
            return Ok(true);
        }
        let records = self
            .records
            .list_for_client(client_id)
            .await
            .map_err(ClientRepositoryError::persistence)?;
        Ok(!records.is_empty())
    }
}
