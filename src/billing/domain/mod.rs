//! Domain types for invoicing and offers.

mod error;
mod ids;
mod invoice;
mod line_item;
mod money;
mod offer;

pub use error::{BillingDomainError, ParseInvoiceStatusError, ParseOfferStatusError};
pub use ids::{InvoiceId, OfferId};
pub use invoice::{
    Invoice, InvoiceNumber, InvoiceParty, InvoiceStatus, PersistedInvoiceData,
};
pub use line_item::LineItem;
pub use money::Money;
pub use offer::{Offer, OfferStatus, PersistedOfferData};
