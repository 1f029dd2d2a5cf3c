//! Repository port for domain record persistence.

use crate::client::domain::ClientId;
use crate::hosting::domain::{DomainRecord, DomainRecordId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for domain record repository operations.
pub type DomainRecordRepositoryResult<T> = Result<T, DomainRecordRepositoryError>;

/// Domain record persistence contract.
#[async_trait]
pub trait DomainRecordRepository: Send + Sync {
    /// Stores a new record.
    ///
    /// # Errors
    ///
    /// Returns [`DomainRecordRepositoryError::DuplicateRecord`] when the
    /// identifier already exists.
    async fn store(&self, record: &DomainRecord) -> DomainRecordRepositoryResult<()>;

    /// Persists changes to an existing record.
    ///
    /// # Errors
    ///
    /// Returns [`DomainRecordRepositoryError::NotFound`] when absent.
    async fn update(&self, record: &DomainRecord) -> DomainRecordRepositoryResult<()>;

    /// Finds a record by identifier. Returns `None` when absent.
    async fn find_by_id(
        &self,
        id: DomainRecordId,
    ) -> DomainRecordRepositoryResult<Option<DomainRecord>>;

    /// Returns all records.
    async fn list_all(&self) -> DomainRecordRepositoryResult<Vec<DomainRecord>>;

    /// Returns the records owned by one client.
    async fn list_for_client(
        &self,
        client_id: ClientId,
    ) -> DomainRecordRepositoryResult<Vec<DomainRecord>>;

    /// Deletes a record.
    ///
    /// # Errors
    ///
    /// Returns [`DomainRecordRepositoryError::NotFound`] when absent.
    async fn delete(&self, id: DomainRecordId) -> DomainRecordRepositoryResult<()>;
}

/// Errors returned by domain record repository implementations.
#[derive(Debug, Clone, Error)]
pub enum DomainRecordRepositoryError {
    /// A record with the same identifier already exists.
    #[error("duplicate domain record identifier: {0}")]
    DuplicateRecord(DomainRecordId),

    /// The record was not found.
    #[error("domain record not found: {0}")]
    NotFound(DomainRecordId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl DomainRecordRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
