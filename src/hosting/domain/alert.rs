//! Expiry alerts derived from domain records.

use super::ids::DomainRecordId;
use super::record::{DomainName, DomainRecord};
use crate::client::domain::ClientId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Days ahead (inclusive) within which an expiry raises an alert.
pub const ALERT_WINDOW_DAYS: i64 = 30;

/// Which tracked date of a record is expiring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryKind {
    /// The domain registration itself.
    Domain,
    /// The hosting contract.
    Hosting,
    /// The SSL certificate.
    Ssl,
}

impl ExpiryKind {
    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Domain => "domain",
            Self::Hosting => "hosting",
            Self::Ssl => "ssl",
        }
    }
}

/// One (record, expiry kind) pair due within the alert window or past due.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpiryAlert {
    /// Record raising the alert.
    pub record_id: DomainRecordId,
    /// Client owning the record.
    pub client_id: ClientId,
    /// Domain the alert concerns.
    pub domain: DomainName,
    /// Which tracked date is expiring.
    pub kind: ExpiryKind,
    /// The expiry date itself.
    pub expires_on: NaiveDate,
    /// `true` when the date has already passed.
    pub past_due: bool,
}

impl ExpiryAlert {
    /// Collects the alerts a record raises as of `today`.
    ///
    /// A date alerts when it lies within the next [`ALERT_WINDOW_DAYS`] days
    /// (inclusive) or is already past.
    #[must_use]
    pub fn collect(record: &DomainRecord, today: NaiveDate) -> Vec<Self> {
        let expiries = record.expiries();
        let dates = [
            (ExpiryKind::Domain, Some(expiries.domain)),
            (ExpiryKind::Hosting, expiries.hosting),
            (ExpiryKind::Ssl, expiries.ssl),
        ];
        dates
            .into_iter()
            .filter_map(|(kind, date)| {
                let expires_on = date?;
                let lead_days = (expires_on - today).num_days();
                (lead_days <= ALERT_WINDOW_DAYS).then(|| Self {
                    record_id: record.id(),
                    client_id: record.client_id(),
                    domain: record.name().clone(),
                    kind,
                    expires_on,
                    past_due: lead_days < 0,
                })
            })
            .collect()
    }
}
