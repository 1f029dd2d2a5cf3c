//! Port contracts for billing persistence.

mod repository;

pub use repository::{
    InvoiceRepository, InvoiceRepositoryError, InvoiceRepositoryResult, OfferRepository,
    OfferRepositoryError, OfferRepositoryResult,
};
