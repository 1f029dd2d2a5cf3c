//! In-memory repositories for client and project tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::client::domain::{Client, ClientId, Project, ProjectId};
use crate::client::ports::{
    ClientRepository, ClientRepositoryError, ClientRepositoryResult, ProjectRepository,
    ProjectRepositoryError, ProjectRepositoryResult,
};

/// Thread-safe in-memory client repository.
///
/// The dependent-resource guard lives in the service layer behind
/// [`ClientDependencyCheck`](crate::client::ports::ClientDependencyCheck);
/// `delete` here only requires the record to exist.
#[derive(Debug, Clone, Default)]
pub struct InMemoryClientRepository {
    state: Arc<RwLock<HashMap<ClientId, Client>>>,
}

impl InMemoryClientRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ClientRepository for InMemoryClientRepository {
    async fn store(&self, client: &Client) -> ClientRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            ClientRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.contains_key(&client.id()) {
            return Err(ClientRepositoryError::DuplicateClient(client.id()));
        }
        state.insert(client.id(), client.clone());
        Ok(())
    }

    async fn update(&self, client: &Client) -> ClientRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            ClientRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if !state.contains_key(&client.id()) {
            return Err(ClientRepositoryError::NotFound(client.id()));
        }
        state.insert(client.id(), client.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: ClientId) -> ClientRepositoryResult<Option<Client>> {
        let state = self.state.read().map_err(|err| {
            ClientRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.get(&id).cloned())
    }

    async fn list_all(&self) -> ClientRepositoryResult<Vec<Client>> {
        let state = self.state.read().map_err(|err| {
            ClientRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut clients: Vec<Client> = state.values().cloned().collect();
        clients.sort_by_key(Client::id);
        Ok(clients)
    }

    async fn delete(&self, id: ClientId) -> ClientRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            ClientRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.remove(&id).is_none() {
            return Err(ClientRepositoryError::NotFound(id));
        }
        Ok(())
    }
}

/// Thread-safe in-memory project repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProjectRepository {
    state: Arc<RwLock<HashMap<ProjectId, Project>>>,
}

impl InMemoryProjectRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn store(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            ProjectRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.contains_key(&project.id()) {
            return Err(ProjectRepositoryError::DuplicateProject(project.id()));
        }
        state.insert(project.id(), project.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>> {
        let state = self.state.read().map_err(|err| {
            ProjectRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.get(&id).cloned())
    }

    async fn list_all(&self) -> ProjectRepositoryResult<Vec<Project>> {
        let state = self.state.read().map_err(|err| {
            ProjectRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut projects: Vec<Project> = state.values().cloned().collect();
        projects.sort_by_key(|project| project.created_at());
        Ok(projects)
    }

    async fn list_for_client(&self, client_id: ClientId) -> ProjectRepositoryResult<Vec<Project>> {
        let state = self.state.read().map_err(|err| {
            ProjectRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut projects: Vec<Project> = state
            .values()
            .filter(|project| project.client_id() == client_id)
            .cloned()
            .collect();
        projects.sort_by_key(|project| project.created_at());
        Ok(projects)
    }

    async fn delete(&self, id: ProjectId) -> ProjectRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            ProjectRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.remove(&id).is_none() {
            return Err(ProjectRepositoryError::NotFound(id));
        }
        Ok(())
    }
}
