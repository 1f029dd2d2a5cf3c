//! Service layer for offer administration and document rendering.

use super::document::{OfferDocumentError, OfferDocumentRenderer};
use crate::billing::{
    domain::{BillingDomainError, LineItem, Offer, OfferId},
    ports::{OfferRepository, OfferRepositoryError},
};
use crate::client::domain::ClientId;
use crate::client::ports::{ClientRepository, ClientRepositoryError};
use crate::identity::domain::{Actor, Role};
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating an offer.
#[derive(Debug, Clone)]
pub struct CreateOfferRequest {
    client_id: ClientId,
    title: String,
    line_items: Vec<LineItem>,
    valid_until: NaiveDate,
}

impl CreateOfferRequest {
    /// Creates a request with required fields.
    #[must_use]
    pub fn new(
        client_id: ClientId,
        title: impl Into<String>,
        line_items: Vec<LineItem>,
        valid_until: NaiveDate,
    ) -> Self {
        Self {
            client_id,
            title: title.into(),
            line_items,
            valid_until,
        }
    }
}

/// Service-level errors for offer operations.
#[derive(Debug, Error)]
pub enum OfferServiceError {
    /// Domain validation or state machine failure.
    #[error(transparent)]
    Domain(#[from] BillingDomainError),
    /// Offer repository operation failed.
    #[error(transparent)]
    Offers(#[from] OfferRepositoryError),
    /// Client repository operation failed.
    #[error(transparent)]
    Clients(#[from] ClientRepositoryError),
    /// Document rendering failed.
    #[error(transparent)]
    Document(#[from] OfferDocumentError),
    /// The acting user lacks permission for this operation.
    #[error("operation not permitted for this actor")]
    Forbidden,
    /// The offer was not found or is not visible to the actor.
    #[error("offer not found: {0}")]
    OfferMissing(OfferId),
    /// The addressed client does not exist.
    #[error("client not found: {0}")]
    ClientMissing(ClientId),
}

/// Result type for offer operations.
pub type OfferServiceResult<T> = Result<T, OfferServiceError>;

/// Offer administration service.
///
/// Admins draft and send offers; the addressed client (or an admin) accepts
/// or declines them while they remain valid.
#[derive(Clone)]
pub struct OfferService<R, K, C>
where
    R: OfferRepository,
    K: ClientRepository,
    C: Clock + Send + Sync,
{
    offers: Arc<R>,
    clients: Arc<K>,
    renderer: Arc<OfferDocumentRenderer>,
    clock: Arc<C>,
}

impl<R, K, C> OfferService<R, K, C>
where
    R: OfferRepository,
    K: ClientRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new offer service.
    #[must_use]
    pub const fn new(
        offers: Arc<R>,
        clients: Arc<K>,
        renderer: Arc<OfferDocumentRenderer>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            offers,
            clients,
            renderer,
            clock,
        }
    }

    /// Creates a draft offer for an existing client (admin only).
    ///
    /// # Errors
    ///
    /// Returns [`OfferServiceError::ClientMissing`] when the addressed
    /// client does not exist and domain errors for invalid fields.
    pub async fn create_offer(
        &self,
        actor: &Actor,
        request: CreateOfferRequest,
    ) -> OfferServiceResult<Offer> {
        if !actor.is_admin() {
            return Err(OfferServiceError::Forbidden);
        }
        if self.clients.find_by_id(request.client_id).await?.is_none() {
            return Err(OfferServiceError::ClientMissing(request.client_id));
        }
        let offer = Offer::new(
            request.client_id,
            request.title,
            request.line_items,
            request.valid_until,
            &*self.clock,
        )?;
        self.offers.store(&offer).await?;
        Ok(offer)
    }

    /// Marks an offer as sent (admin only).
    ///
    /// # Errors
    ///
    /// Returns an invalid-transition error unless the offer is a draft.
    pub async fn send_offer(&self, actor: &Actor, offer_id: OfferId) -> OfferServiceResult<Offer> {
        if !actor.is_admin() {
            return Err(OfferServiceError::Forbidden);
        }
        let mut offer = self.require_offer(offer_id).await?;
        offer.send(&*self.clock)?;
        self.offers.update(&offer).await?;
        Ok(offer)
    }

    /// Records acceptance by the addressed client or an admin.
    ///
    /// # Errors
    ///
    /// Returns [`BillingDomainError::OfferExpired`] (wrapped) past the
    /// validity date.
    pub async fn accept_offer(
        &self,
        actor: &Actor,
        offer_id: OfferId,
    ) -> OfferServiceResult<Offer> {
        self.decide(actor, offer_id, |offer, today, clock| {
            offer.accept(today, clock)
        })
        .await
    }

    /// Records refusal by the addressed client or an admin.
    ///
    /// # Errors
    ///
    /// Returns [`BillingDomainError::OfferExpired`] (wrapped) past the
    /// validity date.
    pub async fn decline_offer(
        &self,
        actor: &Actor,
        offer_id: OfferId,
    ) -> OfferServiceResult<Offer> {
        self.decide(actor, offer_id, |offer, today, clock| {
            offer.decline(today, clock)
        })
        .await
    }

    /// Returns an offer visible to the actor.
    ///
    /// # Errors
    ///
    /// Returns [`OfferServiceError::OfferMissing`] when absent or hidden.
    pub async fn get_offer(&self, actor: &Actor, offer_id: OfferId) -> OfferServiceResult<Offer> {
        let offer = self.require_offer(offer_id).await?;
        if Self::is_visible(actor, &offer) {
            Ok(offer)
        } else {
            Err(OfferServiceError::OfferMissing(offer_id))
        }
    }

    /// Lists the offers visible to the actor.
    ///
    /// # Errors
    ///
    /// Returns [`OfferServiceError::Forbidden`] for worker actors.
    pub async fn list_offers(&self, actor: &Actor) -> OfferServiceResult<Vec<Offer>> {
        match actor.role() {
            Role::Admin => Ok(self.offers.list_all().await?),
            Role::Client => {
                let client_id = actor.client_id().ok_or(OfferServiceError::Forbidden)?;
                Ok(self.offers.list_for_client(client_id).await?)
            }
            Role::Worker => Err(OfferServiceError::Forbidden),
        }
    }

    /// Renders an offer as a standalone HTML document.
    ///
    /// Visible to admins and the addressed client.
    ///
    /// # Errors
    ///
    /// Returns [`OfferServiceError::OfferMissing`] when absent or hidden and
    /// rendering errors from the template engine.
    pub async fn render_document(
        &self,
        actor: &Actor,
        offer_id: OfferId,
    ) -> OfferServiceResult<String> {
        let offer = self.get_offer(actor, offer_id).await?;
        let client = self
            .clients
            .find_by_id(offer.client_id())
            .await?
            .ok_or(OfferServiceError::ClientMissing(offer.client_id()))?;
        Ok(self.renderer.render(&offer, &client)?)
    }

    async fn require_offer(&self, offer_id: OfferId) -> OfferServiceResult<Offer> {
        self.offers
            .find_by_id(offer_id)
            .await?
            .ok_or(OfferServiceError::OfferMissing(offer_id))
    }

    async fn decide<F>(
        &self,
        actor: &Actor,
        offer_id: OfferId,
        apply: F,
    ) -> OfferServiceResult<Offer>
    where
        F: FnOnce(&mut Offer, NaiveDate, &C) -> Result<(), BillingDomainError>,
    {
        let mut offer = self.require_offer(offer_id).await?;
        if !Self::may_decide(actor, &offer) {
            return Err(OfferServiceError::Forbidden);
        }
        let today = self.clock.utc().date_naive();
        apply(&mut offer, today, &*self.clock)?;
        self.offers.update(&offer).await?;
        Ok(offer)
    }

    fn may_decide(actor: &Actor, offer: &Offer) -> bool {
        actor.is_admin() || actor.client_id() == Some(offer.client_id())
    }

    fn is_visible(actor: &Actor, offer: &Offer) -> bool {
        match actor.role() {
            Role::Admin => true,
            Role::Client => actor.client_id() == Some(offer.client_id()),
            Role::Worker => false,
        }
    }
}
