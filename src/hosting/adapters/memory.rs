//! In-memory domain record repository for tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::client::domain::ClientId;
use crate::hosting::domain::{DomainRecord, DomainRecordId};
use crate::hosting::ports::{
    DomainRecordRepository, DomainRecordRepositoryError, DomainRecordRepositoryResult,
};

/// Thread-safe in-memory domain record repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDomainRecordRepository {
    state: Arc<RwLock<HashMap<DomainRecordId, DomainRecord>>>,
}

impl InMemoryDomainRecordRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn sorted(mut records: Vec<DomainRecord>) -> Vec<DomainRecord> {
        records.sort_by(|a, b| a.name().cmp(b.name()));
        records
    }
}

#[async_trait]
impl DomainRecordRepository for InMemoryDomainRecordRepository {
    async fn store(&self, record: &DomainRecord) -> DomainRecordRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            DomainRecordRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.contains_key(&record.id()) {
            return Err(DomainRecordRepositoryError::DuplicateRecord(record.id()));
        }
        state.insert(record.id(), record.clone());
        Ok(())
    }

    async fn update(&self, record: &DomainRecord) -> DomainRecordRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            DomainRecordRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if !state.contains_key(&record.id()) {
            return Err(DomainRecordRepositoryError::NotFound(record.id()));
        }
        state.insert(record.id(), record.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: DomainRecordId,
    ) -> DomainRecordRepositoryResult<Option<DomainRecord>> {
        let state = self.state.read().map_err(|err| {
            DomainRecordRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.get(&id).cloned())
    }

    async fn list_all(&self) -> DomainRecordRepositoryResult<Vec<DomainRecord>> {
        let state = self.state.read().map_err(|err| {
            DomainRecordRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(Self::sorted(state.values().cloned().collect()))
    }

    async fn list_for_client(
        &self,
        client_id: ClientId,
    ) -> DomainRecordRepositoryResult<Vec<DomainRecord>> {
        let state = self.state.read().map_err(|err| {
            DomainRecordRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(Self::sorted(
            state
                .values()
                .filter(|record| record.client_id() == client_id)
                .cloned()
                .collect(),
        ))
    }

    async fn delete(&self, id: DomainRecordId) -> DomainRecordRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            DomainRecordRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.remove(&id).is_none() {
            return Err(DomainRecordRepositoryError::NotFound(id));
        }
        Ok(())
    }
}
