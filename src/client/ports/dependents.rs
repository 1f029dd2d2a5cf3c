//! Port for cross-context client dependency queries.

use crate::client::domain::ClientId;
use crate::client::ports::ClientRepositoryResult;
use async_trait::async_trait;

/// Reports whether resources in other contexts still reference a client.
///
/// Client deletion is rejected while any dependent exists; projects are
/// excluded because they are owned by the client record and removed with it.
#[async_trait]
pub trait ClientDependencyCheck: Send + Sync {
    /// Returns `true` while tasks, invoices, offers, or domain records
    /// reference the client.
    ///
    /// # Errors
    ///
    /// Returns [`ClientRepositoryError::Persistence`] (wrapped) when any of
    /// the consulted stores fail.
    ///
    /// [`ClientRepositoryError::Persistence`]: super::ClientRepositoryError::Persistence
    async fn has_dependents(&self, client_id: ClientId) -> ClientRepositoryResult<bool>;
}
