//! Task lifecycle endpoints.

use crate::client::domain::{ClientId, ProjectId};
use crate::http::auth::CurrentActor;
use crate::http::error::ApiError;
use crate::http::state::AppState;
use crate::identity::domain::UserId;
use crate::task::domain::{Task, TaskId};
use crate::task::services::CreateTaskRequest;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Wire representation of a task.
#[derive(Debug, Clone, Serialize)]
pub struct TaskDto {
    /// Task identifier.
    pub id: TaskId,
    /// Owning client.
    pub client_id: ClientId,
    /// Optional project linkage.
    pub project_id: Option<ProjectId>,
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: Option<String>,
    /// Due date.
    pub due_on: Option<NaiveDate>,
    /// Lifecycle status.
    pub status: String,
    /// Assigned workers.
    pub assignees: Vec<UserId>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl TaskDto {
    fn from_task(task: &Task) -> Self {
        Self {
            id: task.id(),
            client_id: task.client_id(),
            project_id: task.project_id(),
            title: task.title().to_owned(),
            description: task.description().map(str::to_owned),
            due_on: task.due_on(),
            status: task.status().as_str().to_owned(),
            assignees: task.assignees().iter().copied().collect(),
            created_at: task.created_at(),
            updated_at: task.updated_at(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TaskBody {
    client_id: ClientId,
    project_id: Option<ProjectId>,
    title: String,
    description: Option<String>,
    due_on: Option<NaiveDate>,
}

impl TaskBody {
    fn into_request(self) -> CreateTaskRequest {
        let mut request = CreateTaskRequest::new(self.client_id, self.title);
        if let Some(project_id) = self.project_id {
            request = request.with_project(project_id);
        }
        if let Some(description) = self.description {
            request = request.with_description(description);
        }
        if let Some(due_on) = self.due_on {
            request = request.with_due_on(due_on);
        }
        request
    }
}

#[derive(Debug, Deserialize)]
struct AssignBody {
    worker_id: UserId,
}

pub(super) fn router() -> Router<AppState> {
    Router::new()
        .route("/tasks", get(list_tasks).post(create_task))
        .route("/tasks/{id}", get(get_task).delete(delete_task))
        .route("/tasks/{id}/assignees", post(assign_worker))
        .route("/tasks/{id}/assignees/{worker_id}", delete(unassign_worker))
        .route("/tasks/{id}/start", post(start_task))
        .route("/tasks/{id}/request-completion", post(request_completion))
        .route("/tasks/{id}/approve", post(approve_completion))
        .route("/tasks/{id}/reject", post(reject_completion))
        .route("/tasks/{id}/cancel", post(cancel_task))
}

async fn list_tasks(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
) -> Result<Json<Vec<TaskDto>>, ApiError> {
    let tasks = state.tasks.list_tasks(&actor).await?;
    Ok(Json(tasks.iter().map(TaskDto::from_task).collect()))
}

async fn create_task(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Json(body): Json<TaskBody>,
) -> Result<(StatusCode, Json<TaskDto>), ApiError> {
    let task = state.tasks.create_task(&actor, body.into_request()).await?;
    Ok((StatusCode::CREATED, Json(TaskDto::from_task(&task))))
}

async fn get_task(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<TaskId>,
) -> Result<Json<TaskDto>, ApiError> {
    let task = state.tasks.get_task(&actor, id).await?;
    Ok(Json(TaskDto::from_task(&task)))
}

async fn delete_task(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<TaskId>,
) -> Result<StatusCode, ApiError> {
    state.tasks.delete_task(&actor, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn assign_worker(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<TaskId>,
    Json(body): Json<AssignBody>,
) -> Result<Json<TaskDto>, ApiError> {
    let task = state.tasks.assign_worker(&actor, id, body.worker_id).await?;
    Ok(Json(TaskDto::from_task(&task)))
}

async fn unassign_worker(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path((id, worker_id)): Path<(TaskId, UserId)>,
) -> Result<Json<TaskDto>, ApiError> {
    let task = state.tasks.unassign_worker(&actor, id, worker_id).await?;
    Ok(Json(TaskDto::from_task(&task)))
}

async fn start_task(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<TaskId>,
) -> Result<Json<TaskDto>, ApiError> {
    let task = state.tasks.start_task(&actor, id).await?;
    Ok(Json(TaskDto::from_task(&task)))
}

async fn request_completion(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<TaskId>,
) -> Result<Json<TaskDto>, ApiError> {
    let task = state.tasks.request_completion(&actor, id).await?;
    Ok(Json(TaskDto::from_task(&task)))
}

async fn approve_completion(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<TaskId>,
) -> Result<Json<TaskDto>, ApiError> {
    let task = state.tasks.approve_completion(&actor, id).await?;
    Ok(Json(TaskDto::from_task(&task)))
}

async fn reject_completion(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<TaskId>,
) -> Result<Json<TaskDto>, ApiError> {
    let task = state.tasks.reject_completion(&actor, id).await?;
    Ok(Json(TaskDto::from_task(&task)))
}

async fn cancel_task(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<TaskId>,
) -> Result<Json<TaskDto>, ApiError> {
    let task = state.tasks.cancel_task(&actor, id).await?;
    Ok(Json(TaskDto::from_task(&task)))
}
