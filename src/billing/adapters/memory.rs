//! In-memory repositories for billing tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::billing::domain::{Invoice, InvoiceId, InvoiceParty, Offer, OfferId};
use crate::billing::ports::{
    InvoiceRepository, InvoiceRepositoryError, InvoiceRepositoryResult, OfferRepository,
    OfferRepositoryError, OfferRepositoryResult,
};
use crate::client::domain::ClientId;
use crate::identity::domain::UserId;

/// Thread-safe in-memory invoice repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryInvoiceRepository {
    state: Arc<RwLock<HashMap<InvoiceId, Invoice>>>,
}

impl InMemoryInvoiceRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn sorted(mut invoices: Vec<Invoice>) -> Vec<Invoice> {
        invoices.sort_by(|a, b| a.number().as_str().cmp(b.number().as_str()));
        invoices
    }
}

#[async_trait]
impl InvoiceRepository for InMemoryInvoiceRepository {
    async fn store(&self, invoice: &Invoice) -> InvoiceRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            InvoiceRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.contains_key(&invoice.id()) {
            return Err(InvoiceRepositoryError::DuplicateInvoice(invoice.id()));
        }
        if state
            .values()
            .any(|existing| existing.number() == invoice.number())
        {
            return Err(InvoiceRepositoryError::DuplicateNumber(
                invoice.number().clone(),
            ));
        }
        state.insert(invoice.id(), invoice.clone());
        Ok(())
    }

    async fn update(&self, invoice: &Invoice) -> InvoiceRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            InvoiceRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if !state.contains_key(&invoice.id()) {
            return Err(InvoiceRepositoryError::NotFound(invoice.id()));
        }
        state.insert(invoice.id(), invoice.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: InvoiceId) -> InvoiceRepositoryResult<Option<Invoice>> {
        let state = self.state.read().map_err(|err| {
            InvoiceRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.get(&id).cloned())
    }

    async fn list_all(&self) -> InvoiceRepositoryResult<Vec<Invoice>> {
        let state = self.state.read().map_err(|err| {
            InvoiceRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(Self::sorted(state.values().cloned().collect()))
    }

    async fn list_for_client(&self, client_id: ClientId) -> InvoiceRepositoryResult<Vec<Invoice>> {
        let state = self.state.read().map_err(|err| {
            InvoiceRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(Self::sorted(
            state
                .values()
                .filter(|invoice| invoice.party() == InvoiceParty::Client(client_id))
                .cloned()
                .collect(),
        ))
    }

    async fn list_for_worker(&self, worker_id: UserId) -> InvoiceRepositoryResult<Vec<Invoice>> {
        let state = self.state.read().map_err(|err| {
            InvoiceRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(Self::sorted(
            state
                .values()
                .filter(|invoice| invoice.party() == InvoiceParty::Worker(worker_id))
                .cloned()
                .collect(),
        ))
    }

    async fn delete(&self, id: InvoiceId) -> InvoiceRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            InvoiceRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.remove(&id).is_none() {
            return Err(InvoiceRepositoryError::NotFound(id));
        }
        Ok(())
    }
}

/// Thread-safe in-memory offer repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOfferRepository {
    state: Arc<RwLock<HashMap<OfferId, Offer>>>,
}

impl InMemoryOfferRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn sorted(mut offers: Vec<Offer>) -> Vec<Offer> {
        offers.sort_by_key(Offer::id);
        offers
    }
}

#[async_trait]
impl OfferRepository for InMemoryOfferRepository {
    async fn store(&self, offer: &Offer) -> OfferRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            OfferRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.contains_key(&offer.id()) {
            return Err(OfferRepositoryError::DuplicateOffer(offer.id()));
        }
        state.insert(offer.id(), offer.clone());
        Ok(())
    }

    async fn update(&self, offer: &Offer) -> OfferRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            OfferRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if !state.contains_key(&offer.id()) {
            return Err(OfferRepositoryError::NotFound(offer.id()));
        }
        state.insert(offer.id(), offer.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: OfferId) -> OfferRepositoryResult<Option<Offer>> {
        let state = self.state.read().map_err(|err| {
            OfferRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.get(&id).cloned())
    }

    async fn list_all(&self) -> OfferRepositoryResult<Vec<Offer>> {
        let state = self.state.read().map_err(|err| {
            OfferRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(Self::sorted(state.values().cloned().collect()))
    }

    async fn list_for_client(&self, client_id: ClientId) -> OfferRepositoryResult<Vec<Offer>> {
        let state = self.state.read().map_err(|err| {
            OfferRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(Self::sorted(
            state
                .values()
                .filter(|offer| offer.client_id() == client_id)
                .cloned()
                .collect(),
        ))
    }
}
