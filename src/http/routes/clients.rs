//! Client, project, and client-invite endpoints.

use super::auth::UserDto;
use crate::client::domain::{Client, ClientId, Project, ProjectId};
use crate::client::services::{CreateClientRequest, CreateProjectRequest};
use crate::http::auth::CurrentActor;
use crate::http::error::ApiError;
use crate::http::state::AppState;
use crate::identity::domain::Role;
use crate::identity::services::RegisterUserRequest;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Wire representation of a client record.
#[derive(Debug, Clone, Serialize)]
pub struct ClientDto {
    /// Client identifier.
    pub id: ClientId,
    /// Company name.
    pub company_name: String,
    /// Contact email address.
    pub contact_email: String,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Postal address.
    pub address: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl ClientDto {
    fn from_client(client: &Client) -> Self {
        let profile = client.profile();
        Self {
            id: client.id(),
            company_name: profile.company_name().to_owned(),
            contact_email: profile.contact_email().as_str().to_owned(),
            phone: profile.phone().map(str::to_owned),
            address: profile.address().map(str::to_owned),
            created_at: client.created_at(),
            updated_at: client.updated_at(),
        }
    }
}

/// Wire representation of a project.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectDto {
    /// Project identifier.
    pub id: ProjectId,
    /// Owning client.
    pub client_id: ClientId,
    /// Project name.
    pub name: String,
    /// Project description.
    pub description: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl ProjectDto {
    fn from_project(project: &Project) -> Self {
        Self {
            id: project.id(),
            client_id: project.client_id(),
            name: project.name().to_owned(),
            description: project.description().map(str::to_owned),
            created_at: project.created_at(),
            updated_at: project.updated_at(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ClientBody {
    company_name: String,
    contact_email: String,
    phone: Option<String>,
    address: Option<String>,
}

impl ClientBody {
    fn into_request(self) -> CreateClientRequest {
        let mut request = CreateClientRequest::new(self.company_name, self.contact_email);
        if let Some(phone) = self.phone {
            request = request.with_phone(phone);
        }
        if let Some(address) = self.address {
            request = request.with_address(address);
        }
        request
    }
}

#[derive(Debug, Deserialize)]
struct ProjectBody {
    client_id: ClientId,
    name: String,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct InviteContactBody {
    email: String,
    display_name: String,
}

#[derive(Debug, Serialize)]
struct IssuedInviteResponse {
    user: UserDto,
    invite_token: String,
    expires_at: DateTime<Utc>,
}

pub(super) fn router() -> Router<AppState> {
    Router::new()
        .route("/clients", get(list_clients).post(create_client))
        .route(
            "/clients/{id}",
            get(get_client).put(update_client).delete(delete_client),
        )
        .route("/clients/{id}/invite", post(invite_contact))
        .route("/projects", get(list_projects).post(create_project))
}

async fn list_clients(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
) -> Result<Json<Vec<ClientDto>>, ApiError> {
    let clients = state.directory.list_clients(&actor).await?;
    Ok(Json(clients.iter().map(ClientDto::from_client).collect()))
}

async fn create_client(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Json(body): Json<ClientBody>,
) -> Result<(StatusCode, Json<ClientDto>), ApiError> {
    let client = state
        .directory
        .create_client(&actor, body.into_request())
        .await?;
    Ok((StatusCode::CREATED, Json(ClientDto::from_client(&client))))
}

async fn get_client(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<ClientId>,
) -> Result<Json<ClientDto>, ApiError> {
    let client = state.directory.get_client(&actor, id).await?;
    Ok(Json(ClientDto::from_client(&client)))
}

async fn update_client(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<ClientId>,
    Json(body): Json<ClientBody>,
) -> Result<Json<ClientDto>, ApiError> {
    let client = state
        .directory
        .update_client(&actor, id, body.into_request())
        .await?;
    Ok(Json(ClientDto::from_client(&client)))
}

async fn delete_client(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<ClientId>,
) -> Result<StatusCode, ApiError> {
    state.directory.delete_client(&actor, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Registers a credential-less client contact and mints their invite.
async fn invite_contact(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<ClientId>,
    Json(body): Json<InviteContactBody>,
) -> Result<(StatusCode, Json<IssuedInviteResponse>), ApiError> {
    // The client record must exist and be visible before an account is
    // linked to it.
    state.directory.get_client(&actor, id).await?;
    let request =
        RegisterUserRequest::new(body.email, body.display_name, Role::Client).with_client(id);
    let user = state.auth.register_user(&actor, request).await?;
    let issued = state.auth.issue_invite(&actor, user.id()).await?;
    Ok((
        StatusCode::CREATED,
        Json(IssuedInviteResponse {
            user: UserDto::from_user(&user),
            invite_token: issued.token.as_str().to_owned(),
            expires_at: issued.invite.expires_at(),
        }),
    ))
}

async fn list_projects(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
) -> Result<Json<Vec<ProjectDto>>, ApiError> {
    let projects = state.directory.list_projects(&actor).await?;
    Ok(Json(projects.iter().map(ProjectDto::from_project).collect()))
}

async fn create_project(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Json(body): Json<ProjectBody>,
) -> Result<(StatusCode, Json<ProjectDto>), ApiError> {
    let mut request = CreateProjectRequest::new(body.client_id, body.name);
    if let Some(description) = body.description {
        request = request.with_description(description);
    }
    let project = state.directory.create_project(&actor, request).await?;
    Ok((StatusCode::CREATED, Json(ProjectDto::from_project(&project))))
}
