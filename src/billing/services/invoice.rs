//! Service layer for invoice administration.

use crate::billing::{
    domain::{
        BillingDomainError, Invoice, InvoiceId, InvoiceNumber, InvoiceParty, InvoiceStatus,
        LineItem,
    },
    ports::{InvoiceRepository, InvoiceRepositoryError},
};
use crate::identity::domain::{Actor, Role};
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Request payload for creating an invoice.
#[derive(Debug, Clone)]
pub struct CreateInvoiceRequest {
    number: String,
    party: InvoiceParty,
    line_items: Vec<LineItem>,
    issued_on: NaiveDate,
    due_on: NaiveDate,
}

impl CreateInvoiceRequest {
    /// Creates a request with required fields.
    #[must_use]
    pub fn new(
        number: impl Into<String>,
        party: InvoiceParty,
        line_items: Vec<LineItem>,
        issued_on: NaiveDate,
        due_on: NaiveDate,
    ) -> Self {
        Self {
            number: number.into(),
            party,
            line_items,
            issued_on,
            due_on,
        }
    }
}

/// Service-level errors for invoice operations.
#[derive(Debug, Error)]
pub enum InvoiceServiceError {
    /// Domain validation or state machine failure.
    #[error(transparent)]
    Domain(#[from] BillingDomainError),
    /// Invoice repository operation failed.
    #[error(transparent)]
    Invoices(#[from] InvoiceRepositoryError),
    /// The acting user lacks permission for this operation.
    #[error("operation not permitted for this actor")]
    Forbidden,
    /// The invoice was not found or is not visible to the actor.
    #[error("invoice not found: {0}")]
    InvoiceMissing(InvoiceId),
    /// Only draft invoices may be deleted.
    #[error("invoice {0} is not a draft and cannot be deleted")]
    NotDraft(InvoiceId),
}

/// Result type for invoice operations.
pub type InvoiceServiceResult<T> = Result<T, InvoiceServiceError>;

/// Invoice administration service.
///
/// Mutation is admin-only. Clients read their own receivables; workers read
/// their own payables.
#[derive(Clone)]
pub struct InvoiceService<R, C>
where
    R: InvoiceRepository,
    C: Clock + Send + Sync,
{
    invoices: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> InvoiceService<R, C>
where
    R: InvoiceRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new invoice service.
    #[must_use]
    pub const fn new(invoices: Arc<R>, clock: Arc<C>) -> Self {
        Self { invoices, clock }
    }

    /// Creates a draft invoice (admin only).
    ///
    /// # Errors
    ///
    /// Returns [`InvoiceRepositoryError::DuplicateNumber`] (wrapped) when the
    /// number is taken and domain errors for invalid fields.
    pub async fn create_invoice(
        &self,
        actor: &Actor,
        request: CreateInvoiceRequest,
    ) -> InvoiceServiceResult<Invoice> {
        if !actor.is_admin() {
            return Err(InvoiceServiceError::Forbidden);
        }
        let number = InvoiceNumber::new(request.number)?;
        let invoice = Invoice::new(
            number,
            request.party,
            request.line_items,
            request.issued_on,
            request.due_on,
            &*self.clock,
        )?;
        self.invoices.store(&invoice).await?;
        Ok(invoice)
    }

    /// Marks an invoice as sent (admin only).
    ///
    /// # Errors
    ///
    /// Returns an invalid-transition error unless the invoice is a draft.
    pub async fn send_invoice(
        &self,
        actor: &Actor,
        invoice_id: InvoiceId,
    ) -> InvoiceServiceResult<Invoice> {
        self.admin_transition(actor, invoice_id, InvoiceStatus::Sent)
            .await
    }

    /// Records payment (admin only).
    ///
    /// # Errors
    ///
    /// Returns an invalid-transition error unless the invoice is sent or
    /// overdue.
    pub async fn mark_paid(
        &self,
        actor: &Actor,
        invoice_id: InvoiceId,
    ) -> InvoiceServiceResult<Invoice> {
        self.admin_transition(actor, invoice_id, InvoiceStatus::Paid)
            .await
    }

    /// Cancels a draft invoice (admin only).
    ///
    /// # Errors
    ///
    /// Returns an invalid-transition error unless the invoice is a draft.
    pub async fn cancel_invoice(
        &self,
        actor: &Actor,
        invoice_id: InvoiceId,
    ) -> InvoiceServiceResult<Invoice> {
        self.admin_transition(actor, invoice_id, InvoiceStatus::Cancelled)
            .await
    }

    /// Flags every sent invoice past its due date as overdue (admin only).
    ///
    /// Returns the invoices that were flagged.
    ///
    /// # Errors
    ///
    /// Returns [`InvoiceServiceError::Forbidden`] for non-admin actors.
    pub async fn flag_overdue(&self, actor: &Actor) -> InvoiceServiceResult<Vec<Invoice>> {
        if !actor.is_admin() {
            return Err(InvoiceServiceError::Forbidden);
        }
        let today = self.clock.utc().date_naive();
        let mut flagged = Vec::new();
        for mut invoice in self.invoices.list_all().await? {
            if invoice.is_past_due(today) {
                invoice.transition_to(InvoiceStatus::Overdue, &*self.clock)?;
                self.invoices.update(&invoice).await?;
                info!(invoice = %invoice.number(), due_on = %invoice.due_on(), "invoice flagged overdue");
                flagged.push(invoice);
            }
        }
        Ok(flagged)
    }

    /// Deletes a draft invoice (admin only).
    ///
    /// # Errors
    ///
    /// Returns [`InvoiceServiceError::NotDraft`] once the invoice has left
    /// the draft status.
    pub async fn delete_invoice(
        &self,
        actor: &Actor,
        invoice_id: InvoiceId,
    ) -> InvoiceServiceResult<()> {
        if !actor.is_admin() {
            return Err(InvoiceServiceError::Forbidden);
        }
        let invoice = self.require_invoice(invoice_id).await?;
        if invoice.status() != InvoiceStatus::Draft {
            return Err(InvoiceServiceError::NotDraft(invoice_id));
        }
        Ok(self.invoices.delete(invoice_id).await?)
    }

    /// Returns an invoice visible to the actor.
    ///
    /// Invisible invoices are reported as missing so their existence is not
    /// disclosed across scopes.
    ///
    /// # Errors
    ///
    /// Returns [`InvoiceServiceError::InvoiceMissing`] when absent or hidden.
    pub async fn get_invoice(
        &self,
        actor: &Actor,
        invoice_id: InvoiceId,
    ) -> InvoiceServiceResult<Invoice> {
        let invoice = self.require_invoice(invoice_id).await?;
        if Self::is_visible(actor, &invoice) {
            Ok(invoice)
        } else {
            Err(InvoiceServiceError::InvoiceMissing(invoice_id))
        }
    }

    /// Lists the invoices visible to the actor.
    ///
    /// Admins see everything, clients their receivables, workers their
    /// payables.
    ///
    /// # Errors
    ///
    /// Returns [`InvoiceServiceError::Forbidden`] for client actors without a
    /// linked client record.
    pub async fn list_invoices(&self, actor: &Actor) -> InvoiceServiceResult<Vec<Invoice>> {
        match actor.role() {
            Role::Admin => Ok(self.invoices.list_all().await?),
            Role::Worker => Ok(self.invoices.list_for_worker(actor.user_id()).await?),
            Role::Client => {
                let client_id = actor.client_id().ok_or(InvoiceServiceError::Forbidden)?;
                Ok(self.invoices.list_for_client(client_id).await?)
            }
        }
    }

    async fn require_invoice(&self, invoice_id: InvoiceId) -> InvoiceServiceResult<Invoice> {
        self.invoices
            .find_by_id(invoice_id)
            .await?
            .ok_or(InvoiceServiceError::InvoiceMissing(invoice_id))
    }

    async fn admin_transition(
        &self,
        actor: &Actor,
        invoice_id: InvoiceId,
        target: InvoiceStatus,
    ) -> InvoiceServiceResult<Invoice> {
        if !actor.is_admin() {
            return Err(InvoiceServiceError::Forbidden);
        }
        let mut invoice = self.require_invoice(invoice_id).await?;
        invoice.transition_to(target, &*self.clock)?;
        self.invoices.update(&invoice).await?;
        Ok(invoice)
    }

    fn is_visible(actor: &Actor, invoice: &Invoice) -> bool {
        match actor.role() {
            Role::Admin => true,
            Role::Worker => invoice.party() == InvoiceParty::Worker(actor.user_id()),
            Role::Client => actor
                .client_id()
                .is_some_and(|client_id| invoice.party() == InvoiceParty::Client(client_id)),
        }
    }
}
