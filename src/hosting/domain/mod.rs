//! Domain types for hosting records and expiry alerts.

mod alert;
mod error;
mod ids;
mod record;

pub use alert::{ALERT_WINDOW_DAYS, ExpiryAlert, ExpiryKind};
pub use error::HostingDomainError;
pub use ids::DomainRecordId;
pub use record::{DomainName, DomainRecord, ExpiryDates, PersistedDomainRecordData};
