//! Repository ports for client and project persistence.

use crate::client::domain::{Client, ClientId, Project, ProjectId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for client repository operations.
pub type ClientRepositoryResult<T> = Result<T, ClientRepositoryError>;

/// Client persistence contract.
#[async_trait]
pub trait ClientRepository: Send + Sync {
    /// Stores a new client record.
    ///
    /// # Errors
    ///
    /// Returns [`ClientRepositoryError::DuplicateClient`] when the identifier
    /// already exists.
    async fn store(&self, client: &Client) -> ClientRepositoryResult<()>;

    /// Persists changes to an existing client.
    ///
    /// # Errors
    ///
    /// Returns [`ClientRepositoryError::NotFound`] when absent.
    async fn update(&self, client: &Client) -> ClientRepositoryResult<()>;

    /// Finds a client by identifier. Returns `None` when absent.
    async fn find_by_id(&self, id: ClientId) -> ClientRepositoryResult<Option<Client>>;

    /// Returns all client records.
    async fn list_all(&self) -> ClientRepositoryResult<Vec<Client>>;

    /// Deletes a client record.
    ///
    /// # Errors
    ///
    /// Returns [`ClientRepositoryError::NotFound`] when absent and
    /// [`ClientRepositoryError::HasDependents`] when resources in other
    /// contexts still reference the client.
    async fn delete(&self, id: ClientId) -> ClientRepositoryResult<()>;
}

/// Errors returned by client repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ClientRepositoryError {
    /// A client with the same identifier already exists.
    #[error("duplicate client identifier: {0}")]
    DuplicateClient(ClientId),

    /// The client was not found.
    #[error("client not found: {0}")]
    NotFound(ClientId),

    /// Dependent resources still reference the client.
    #[error("client {0} still owns dependent resources")]
    HasDependents(ClientId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ClientRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

/// Result type for project repository operations.
pub type ProjectRepositoryResult<T> = Result<T, ProjectRepositoryError>;

/// Project persistence contract.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Stores a new project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::DuplicateProject`] when the
    /// identifier already exists.
    async fn store(&self, project: &Project) -> ProjectRepositoryResult<()>;

    /// Finds a project by identifier. Returns `None` when absent.
    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>>;

    /// Returns all projects.
    async fn list_all(&self) -> ProjectRepositoryResult<Vec<Project>>;

    /// Returns the projects owned by one client.
    async fn list_for_client(&self, client_id: ClientId) -> ProjectRepositoryResult<Vec<Project>>;

    /// Deletes a project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::NotFound`] when absent.
    async fn delete(&self, id: ProjectId) -> ProjectRepositoryResult<()>;
}

/// Errors returned by project repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ProjectRepositoryError {
    /// A project with the same identifier already exists.
    #[error("duplicate project identifier: {0}")]
    DuplicateProject(ProjectId),

    /// The project was not found.
    #[error("project not found: {0}")]
    NotFound(ProjectId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ProjectRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
