//! Orchestration services for billing.

mod document;
mod invoice;
mod offer;

pub use document::{OfferDocumentError, OfferDocumentRenderer};
pub use invoice::{
    CreateInvoiceRequest, InvoiceService, InvoiceServiceError, InvoiceServiceResult,
};
pub use offer::{CreateOfferRequest, OfferService, OfferServiceError, OfferServiceResult};
