//! Service layer for client and project administration.

use crate::client::{
    domain::{Client, ClientDomainError, ClientId, ClientProfile, Project, ProjectId},
    ports::{
        ClientDependencyCheck, ClientRepository, ClientRepositoryError, ProjectRepository,
        ProjectRepositoryError,
    },
};
use crate::identity::domain::Actor;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating or updating a client record.
#[derive(Debug, Clone)]
pub struct CreateClientRequest {
    company_name: String,
    contact_email: String,
    phone: Option<String>,
    address: Option<String>,
}

impl CreateClientRequest {
    /// Creates a request with required fields.
    #[must_use]
    pub fn new(company_name: impl Into<String>, contact_email: impl Into<String>) -> Self {
        Self {
            company_name: company_name.into(),
            contact_email: contact_email.into(),
            phone: None,
            address: None,
        }
    }

    /// Sets a contact phone number.
    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Sets a postal address.
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    fn into_profile(self) -> Result<ClientProfile, ClientDomainError> {
        let mut profile = ClientProfile::new(self.company_name, self.contact_email)?;
        if let Some(phone) = self.phone {
            profile = profile.with_phone(phone);
        }
        if let Some(address) = self.address {
            profile = profile.with_address(address);
        }
        Ok(profile)
    }
}

/// Request payload for creating a project.
#[derive(Debug, Clone)]
pub struct CreateProjectRequest {
    client_id: ClientId,
    name: String,
    description: Option<String>,
}

impl CreateProjectRequest {
    /// Creates a request with required fields.
    #[must_use]
    pub fn new(client_id: ClientId, name: impl Into<String>) -> Self {
        Self {
            client_id,
            name: name.into(),
            description: None,
        }
    }

    /// Sets a project description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Service-level errors for client directory operations.
#[derive(Debug, Error)]
pub enum ClientDirectoryError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] ClientDomainError),
    /// Client repository operation failed.
    #[error(transparent)]
    Clients(#[from] ClientRepositoryError),
    /// Project repository operation failed.
    #[error(transparent)]
    Projects(#[from] ProjectRepositoryError),
    /// The acting user lacks permission for this operation.
    #[error("operation not permitted for this actor")]
    Forbidden,
    /// The client was not found or is not visible to the actor.
    #[error("client not found: {0}")]
    ClientMissing(ClientId),
    /// The project was not found or is not visible to the actor.
    #[error("project not found: {0}")]
    ProjectMissing(ProjectId),
}

/// Result type for client directory operations.
pub type ClientDirectoryResult<T> = Result<T, ClientDirectoryError>;

/// Client and project administration service.
#[derive(Clone)]
pub struct ClientDirectoryService<R, P, G, C>
where
    R: ClientRepository,
    P: ProjectRepository,
    G: ClientDependencyCheck,
    C: Clock + Send + Sync,
{
    clients: Arc<R>,
    projects: Arc<P>,
    dependents: Arc<G>,
    clock: Arc<C>,
}

impl<R, P, G, C> ClientDirectoryService<R, P, G, C>
where
    R: ClientRepository,
    P: ProjectRepository,
    G: ClientDependencyCheck,
    C: Clock + Send + Sync,
{
    /// Creates a new directory service.
    #[must_use]
    pub const fn new(
        clients: Arc<R>,
        projects: Arc<P>,
        dependents: Arc<G>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            clients,
            projects,
            dependents,
            clock,
        }
    }

    /// Creates a client record (admin only).
    ///
    /// # Errors
    ///
    /// Returns [`ClientDirectoryError::Forbidden`] for non-admin actors and
    /// domain errors for invalid fields.
    pub async fn create_client(
        &self,
        actor: &Actor,
        request: CreateClientRequest,
    ) -> ClientDirectoryResult<Client> {
        if !actor.is_admin() {
            return Err(ClientDirectoryError::Forbidden);
        }
        let client = Client::new(request.into_profile()?, &*self.clock);
        self.clients.store(&client).await?;
        Ok(client)
    }

    /// Replaces a client's profile fields (admin only).
    ///
    /// # Errors
    ///
    /// Returns [`ClientDirectoryError::ClientMissing`] when absent.
    pub async fn update_client(
        &self,
        actor: &Actor,
        client_id: ClientId,
        request: CreateClientRequest,
    ) -> ClientDirectoryResult<Client> {
        if !actor.is_admin() {
            return Err(ClientDirectoryError::Forbidden);
        }
        let mut client = self
            .clients
            .find_by_id(client_id)
            .await?
            .ok_or(ClientDirectoryError::ClientMissing(client_id))?;
        client.update_profile(request.into_profile()?, &*self.clock);
        self.clients.update(&client).await?;
        Ok(client)
    }

    /// Returns a client visible to the actor.
    ///
    /// Admins see every client; client-role actors see only their own
    /// record. Invisible records are reported as missing.
    ///
    /// # Errors
    ///
    /// Returns [`ClientDirectoryError::ClientMissing`] when absent or hidden
    /// and [`ClientDirectoryError::Forbidden`] for worker actors.
    pub async fn get_client(&self, actor: &Actor, client_id: ClientId) -> ClientDirectoryResult<Client> {
        self.check_client_visibility(actor, client_id)?;
        self.clients
            .find_by_id(client_id)
            .await?
            .ok_or(ClientDirectoryError::ClientMissing(client_id))
    }

    /// Lists clients visible to the actor.
    ///
    /// # Errors
    ///
    /// Returns [`ClientDirectoryError::Forbidden`] for worker actors.
    pub async fn list_clients(&self, actor: &Actor) -> ClientDirectoryResult<Vec<Client>> {
        if actor.is_admin() {
            return Ok(self.clients.list_all().await?);
        }
        let own_id = actor.client_id().ok_or(ClientDirectoryError::Forbidden)?;
        let own = self.clients.find_by_id(own_id).await?;
        Ok(own.into_iter().collect())
    }

    /// Deletes a client record (admin only).
    ///
    /// # Errors
    ///
    /// Returns [`ClientRepositoryError::HasDependents`] (wrapped) while
    /// tasks, invoices, offers, or domain records still reference the client.
    pub async fn delete_client(&self, actor: &Actor, client_id: ClientId) -> ClientDirectoryResult<()> {
        if !actor.is_admin() {
            return Err(ClientDirectoryError::Forbidden);
        }
        if self.dependents.has_dependents(client_id).await? {
            return Err(ClientDirectoryError::Clients(
                ClientRepositoryError::HasDependents(client_id),
            ));
        }
        Ok(self.clients.delete(client_id).await?)
    }

    /// Creates a project under a client (admin only).
    ///
    /// # Errors
    ///
    /// Returns [`ClientDirectoryError::ClientMissing`] when the owning client
    /// does not exist.
    pub async fn create_project(
        &self,
        actor: &Actor,
        request: CreateProjectRequest,
    ) -> ClientDirectoryResult<Project> {
        if !actor.is_admin() {
            return Err(ClientDirectoryError::Forbidden);
        }
        let owner = self.clients.find_by_id(request.client_id).await?;
        if owner.is_none() {
            return Err(ClientDirectoryError::ClientMissing(request.client_id));
        }
        let project = Project::new(
            request.client_id,
            request.name,
            request.description,
            &*self.clock,
        )?;
        self.projects.store(&project).await?;
        Ok(project)
    }

    /// Lists projects visible to the actor.
    ///
    /// # Errors
    ///
    /// Returns [`ClientDirectoryError::Forbidden`] for worker actors.
    pub async fn list_projects(&self, actor: &Actor) -> ClientDirectoryResult<Vec<Project>> {
        if actor.is_admin() {
            return Ok(self.projects.list_all().await?);
        }
        let own_id = actor.client_id().ok_or(ClientDirectoryError::Forbidden)?;
        Ok(self.projects.list_for_client(own_id).await?)
    }

    /// Deletes a project (admin only).
    ///
    /// # Errors
    ///
    /// Returns [`ClientDirectoryError::ProjectMissing`] when absent.
    pub async fn delete_project(&self, actor: &Actor, project_id: ProjectId) -> ClientDirectoryResult<()> {
        if !actor.is_admin() {
            return Err(ClientDirectoryError::Forbidden);
        }
        self.projects.delete(project_id).await.map_err(|err| {
            if matches!(err, ProjectRepositoryError::NotFound(_)) {
                ClientDirectoryError::ProjectMissing(project_id)
            } else {
                ClientDirectoryError::Projects(err)
            }
        })
    }

    fn check_client_visibility(&self, actor: &Actor, client_id: ClientId) -> ClientDirectoryResult<()> {
        if actor.is_admin() {
            return Ok(());
        }
        match actor.client_id() {
            Some(own_id) if own_id == client_id => Ok(()),
            Some(_) => Err(ClientDirectoryError::ClientMissing(client_id)),
            None => Err(ClientDirectoryError::Forbidden),
        }
    }
}
