//! Timesheet endpoints.

use crate::http::auth::CurrentActor;
use crate::http::error::ApiError;
use crate::http::state::AppState;
use crate::identity::domain::UserId;
use crate::task::domain::TaskId;
use crate::timesheet::domain::{TimesheetEntry, TimesheetEntryId};
use crate::timesheet::ports::TimesheetFilter;
use crate::timesheet::services::LogTimeRequest;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{delete, get};
use axum::{Json, Router};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Wire representation of a timesheet entry.
#[derive(Debug, Clone, Serialize)]
pub struct TimesheetEntryDto {
    /// Entry identifier.
    pub id: TimesheetEntryId,
    /// Logging worker.
    pub worker_id: UserId,
    /// Target task.
    pub task_id: TaskId,
    /// Date the work was performed.
    pub work_date: NaiveDate,
    /// Logged minutes.
    pub minutes: u32,
    /// Free-form note.
    pub note: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl TimesheetEntryDto {
    fn from_entry(entry: &TimesheetEntry) -> Self {
        Self {
            id: entry.id(),
            worker_id: entry.worker_id(),
            task_id: entry.task_id(),
            work_date: entry.work_date(),
            minutes: entry.minutes(),
            note: entry.note().map(str::to_owned),
            created_at: entry.created_at(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct LogTimeBody {
    task_id: TaskId,
    work_date: NaiveDate,
    minutes: u32,
    note: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ListQuery {
    worker_id: Option<UserId>,
    task_id: Option<TaskId>,
}

impl ListQuery {
    const fn into_filter(self) -> TimesheetFilter {
        TimesheetFilter {
            worker_id: self.worker_id,
            task_id: self.task_id,
        }
    }
}

pub(super) fn router() -> Router<AppState> {
    Router::new()
        .route("/timesheets", get(list_entries).post(log_time))
        .route("/timesheets/{id}", delete(delete_entry))
}

async fn list_entries(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<TimesheetEntryDto>>, ApiError> {
    let entries = state
        .timesheets
        .list_entries(&actor, query.into_filter())
        .await?;
    Ok(Json(entries.iter().map(TimesheetEntryDto::from_entry).collect()))
}

async fn log_time(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Json(body): Json<LogTimeBody>,
) -> Result<(StatusCode, Json<TimesheetEntryDto>), ApiError> {
    let mut request = LogTimeRequest::new(body.task_id, body.work_date, body.minutes);
    if let Some(note) = body.note {
        request = request.with_note(note);
    }
    let entry = state.timesheets.log_time(&actor, request).await?;
    Ok((
        StatusCode::CREATED,
        Json(TimesheetEntryDto::from_entry(&entry)),
    ))
}

async fn delete_entry(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<TimesheetEntryId>,
) -> Result<StatusCode, ApiError> {
    state.timesheets.delete_entry(&actor, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
