//! Task aggregate root and status state machine.

use super::error::{ParseTaskStatusError, TaskDomainError};
use super::ids::TaskId;
use crate::client::domain::{ClientId, ProjectId};
use crate::identity::domain::UserId;
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Lifecycle status of a task.
///
/// Completion is dual-approval: an assigned worker moves the task to
/// [`TaskStatus::PendingApproval`], and an admin either approves it to
/// [`TaskStatus::Completed`] or rejects it back to
/// [`TaskStatus::InProgress`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Created but not yet started.
    Pending,
    /// Being worked on by at least one assignee.
    InProgress,
    /// Worker has requested completion; awaiting admin review.
    PendingApproval,
    /// Admin has approved the completed work.
    Completed,
    /// Abandoned at any pre-terminal point.
    Cancelled,
}

impl TaskStatus {
    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::PendingApproval => "pending_approval",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Returns `true` when no further transitions are possible.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Returns `true` when the state machine permits moving to `target`.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::InProgress | Self::Cancelled)
                | (Self::InProgress, Self::PendingApproval | Self::Cancelled)
                | (
                    Self::PendingApproval,
                    Self::Completed | Self::InProgress | Self::Cancelled
                )
        )
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "pending_approval" => Ok(Self::PendingApproval),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(ParseTaskStatusError(other.to_owned())),
        }
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    client_id: ClientId,
    project_id: Option<ProjectId>,
    title: String,
    description: Option<String>,
    due_on: Option<NaiveDate>,
    status: TaskStatus,
    assignees: BTreeSet<UserId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Owning client.
    pub client_id: ClientId,
    /// Optional owning project.
    pub project_id: Option<ProjectId>,
    /// Persisted title.
    pub title: String,
    /// Persisted description.
    pub description: Option<String>,
    /// Persisted due date.
    pub due_on: Option<NaiveDate>,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted assignee set.
    pub assignees: BTreeSet<UserId>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new pending task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the title is blank.
    pub fn new(
        client_id: ClientId,
        project_id: Option<ProjectId>,
        title: impl Into<String>,
        description: Option<String>,
        due_on: Option<NaiveDate>,
        clock: &impl Clock,
    ) -> Result<Self, TaskDomainError> {
        let title = title.into().trim().to_owned();
        if title.is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        let timestamp = clock.utc();
        Ok(Self {
            id: TaskId::new(),
            client_id,
            project_id,
            title,
            description,
            due_on,
            status: TaskStatus::Pending,
            assignees: BTreeSet::new(),
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            client_id: data.client_id,
            project_id: data.project_id,
            title: data.title,
            description: data.description,
            due_on: data.due_on,
            status: data.status,
            assignees: data.assignees,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning client.
    #[must_use]
    pub const fn client_id(&self) -> ClientId {
        self.client_id
    }

    /// Returns the owning project, if any.
    #[must_use]
    pub const fn project_id(&self) -> Option<ProjectId> {
        self.project_id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description, if set.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the due date, if set.
    #[must_use]
    pub const fn due_on(&self) -> Option<NaiveDate> {
        self.due_on
    }

    /// Returns the current status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the assigned workers.
    #[must_use]
    pub const fn assignees(&self) -> &BTreeSet<UserId> {
        &self.assignees
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns `true` when the worker is assigned to this task.
    #[must_use]
    pub fn is_assigned(&self, worker_id: UserId) -> bool {
        self.assignees.contains(&worker_id)
    }

    /// Replaces the editable detail fields.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the new title is blank.
    pub fn update_details(
        &mut self,
        title: impl Into<String>,
        description: Option<String>,
        due_on: Option<NaiveDate>,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        let title = title.into().trim().to_owned();
        if title.is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        self.title = title;
        self.description = description;
        self.due_on = due_on;
        self.touch(clock);
        Ok(())
    }

    /// Adds a worker to the assignee set.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::WorkerAlreadyAssigned`] when the worker is
    /// already on the task.
    pub fn assign(&mut self, worker_id: UserId, clock: &impl Clock) -> Result<(), TaskDomainError> {
        if !self.assignees.insert(worker_id) {
            return Err(TaskDomainError::WorkerAlreadyAssigned {
                task_id: self.id,
                worker_id,
            });
        }
        self.touch(clock);
        Ok(())
    }

    /// Removes a worker from the assignee set.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::WorkerNotAssigned`] when the worker is not
    /// on the task.
    pub fn unassign(
        &mut self,
        worker_id: UserId,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        if !self.assignees.remove(&worker_id) {
            return Err(TaskDomainError::WorkerNotAssigned {
                task_id: self.id,
                worker_id,
            });
        }
        self.touch(clock);
        Ok(())
    }

    /// Moves the task to a new status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStatusTransition`] when the state
    /// machine forbids the move.
    pub fn transition_to(
        &mut self,
        target: TaskStatus,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        if !self.status.can_transition_to(target) {
            return Err(TaskDomainError::InvalidStatusTransition {
                task_id: self.id,
                from: self.status,
                to: target,
            });
        }
        self.status = target;
        self.touch(clock);
        Ok(())
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
