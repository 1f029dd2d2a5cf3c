//! Repository ports for invoice and offer persistence.

use crate::billing::domain::{Invoice, InvoiceId, InvoiceNumber, Offer, OfferId};
use crate::client::domain::ClientId;
use crate::identity::domain::UserId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for invoice repository operations.
pub type InvoiceRepositoryResult<T> = Result<T, InvoiceRepositoryError>;

/// Invoice persistence contract.
#[async_trait]
pub trait InvoiceRepository: Send + Sync {
    /// Stores a new invoice.
    ///
    /// # Errors
    ///
    /// Returns [`InvoiceRepositoryError::DuplicateNumber`] when the invoice
    /// number is already taken.
    async fn store(&self, invoice: &Invoice) -> InvoiceRepositoryResult<()>;

    /// Persists changes to an existing invoice.
    ///
    /// # Errors
    ///
    /// Returns [`InvoiceRepositoryError::NotFound`] when absent.
    async fn update(&self, invoice: &Invoice) -> InvoiceRepositoryResult<()>;

    /// Finds an invoice by identifier. Returns `None` when absent.
    async fn find_by_id(&self, id: InvoiceId) -> InvoiceRepositoryResult<Option<Invoice>>;

    /// Returns all invoices.
    async fn list_all(&self) -> InvoiceRepositoryResult<Vec<Invoice>>;

    /// Returns receivable invoices billed to one client.
    async fn list_for_client(&self, client_id: ClientId) -> InvoiceRepositoryResult<Vec<Invoice>>;

    /// Returns payable invoices owed to one worker.
    async fn list_for_worker(&self, worker_id: UserId) -> InvoiceRepositoryResult<Vec<Invoice>>;

    /// Deletes an invoice.
    ///
    /// # Errors
    ///
    /// Returns [`InvoiceRepositoryError::NotFound`] when absent.
    async fn delete(&self, id: InvoiceId) -> InvoiceRepositoryResult<()>;
}

/// Errors returned by invoice repository implementations.
#[derive(Debug, Clone, Error)]
pub enum InvoiceRepositoryError {
    /// An invoice with the same identifier already exists.
    #[error("duplicate invoice identifier: {0}")]
    DuplicateInvoice(InvoiceId),

    /// An invoice with the same number already exists.
    #[error("duplicate invoice number: {0}")]
    DuplicateNumber(InvoiceNumber),

    /// The invoice was not found.
    #[error("invoice not found: {0}")]
    NotFound(InvoiceId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl InvoiceRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

/// Result type for offer repository operations.
pub type OfferRepositoryResult<T> = Result<T, OfferRepositoryError>;

/// Offer persistence contract.
#[async_trait]
pub trait OfferRepository: Send + Sync {
    /// Stores a new offer.
    ///
    /// # Errors
    ///
    /// Returns [`OfferRepositoryError::DuplicateOffer`] when the identifier
    /// already exists.
    async fn store(&self, offer: &Offer) -> OfferRepositoryResult<()>;

    /// Persists changes to an existing offer.
    ///
    /// # Errors
    ///
    /// Returns [`OfferRepositoryError::NotFound`] when absent.
    async fn update(&self, offer: &Offer) -> OfferRepositoryResult<()>;

    /// Finds an offer by identifier. Returns `None` when absent.
    async fn find_by_id(&self, id: OfferId) -> OfferRepositoryResult<Option<Offer>>;

    /// Returns all offers.
    async fn list_all(&self) -> OfferRepositoryResult<Vec<Offer>>;

    /// Returns the offers addressed to one client.
    async fn list_for_client(&self, client_id: ClientId) -> OfferRepositoryResult<Vec<Offer>>;
}

/// Errors returned by offer repository implementations.
#[derive(Debug, Clone, Error)]
pub enum OfferRepositoryError {
    /// An offer with the same identifier already exists.
    #[error("duplicate offer identifier: {0}")]
    DuplicateOffer(OfferId),

    /// The offer was not found.
    #[error("offer not found: {0}")]
    NotFound(OfferId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl OfferRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
