//! Service layer for the dual-approval task workflow.

use crate::client::domain::{ClientId, ProjectId};
use crate::identity::domain::{Actor, Role, UserId};
use crate::identity::ports::{UserRepository, UserRepositoryError};
use crate::task::{
    domain::{Task, TaskDomainError, TaskId, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError},
};
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating or updating a task.
#[derive(Debug, Clone)]
pub struct CreateTaskRequest {
    client_id: ClientId,
    project_id: Option<ProjectId>,
    title: String,
    description: Option<String>,
    due_on: Option<NaiveDate>,
}

impl CreateTaskRequest {
    /// Creates a request with required fields.
    #[must_use]
    pub fn new(client_id: ClientId, title: impl Into<String>) -> Self {
        Self {
            client_id,
            project_id: None,
            title: title.into(),
            description: None,
            due_on: None,
        }
    }

    /// Groups the task under a project.
    #[must_use]
    pub const fn with_project(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(project_id);
        self
    }

    /// Sets a task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets a due date.
    #[must_use]
    pub const fn with_due_on(mut self, due_on: NaiveDate) -> Self {
        self.due_on = Some(due_on);
        self
    }
}

/// Service-level errors for task workflow operations.
#[derive(Debug, Error)]
pub enum TaskWorkflowError {
    /// Domain validation or state machine failure.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Task repository operation failed.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),
    /// User repository operation failed.
    #[error(transparent)]
    Users(#[from] UserRepositoryError),
    /// The acting user lacks permission for this operation.
    #[error("operation not permitted for this actor")]
    Forbidden,
    /// The task was not found or is not visible to the actor.
    #[error("task not found: {0}")]
    TaskMissing(TaskId),
    /// The assignment target is not an active worker account.
    #[error("user {0} is not an active worker")]
    NotAWorker(UserId),
}

/// Result type for task workflow operations.
pub type TaskWorkflowResult<T> = Result<T, TaskWorkflowError>;

/// Task workflow service.
///
/// Admins create, assign, approve, and cancel; assigned workers start work
/// and request completion; clients get a read-only view of their own tasks.
#[derive(Clone)]
pub struct TaskWorkflowService<R, U, C>
where
    R: TaskRepository,
    U: UserRepository,
    C: Clock + Send + Sync,
{
    tasks: Arc<R>,
    users: Arc<U>,
    clock: Arc<C>,
}

impl<R, U, C> TaskWorkflowService<R, U, C>
where
    R: TaskRepository,
    U: UserRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new workflow service.
    #[must_use]
    pub const fn new(tasks: Arc<R>, users: Arc<U>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            users,
            clock,
        }
    }

    /// Creates a pending task (admin only).
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::Forbidden`] for non-admin actors and
    /// domain errors for invalid fields.
    pub async fn create_task(
        &self,
        actor: &Actor,
        request: CreateTaskRequest,
    ) -> TaskWorkflowResult<Task> {
        if !actor.is_admin() {
            return Err(TaskWorkflowError::Forbidden);
        }
        let task = Task::new(
            request.client_id,
            request.project_id,
            request.title,
            request.description,
            request.due_on,
            &*self.clock,
        )?;
        self.tasks.store(&task).await?;
        Ok(task)
    }

    /// Replaces a task's detail fields (admin only).
    ///
    /// The owning client, status, and assignee set are unaffected.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::TaskMissing`] when absent.
    pub async fn update_task(
        &self,
        actor: &Actor,
        task_id: TaskId,
        request: CreateTaskRequest,
    ) -> TaskWorkflowResult<Task> {
        if !actor.is_admin() {
            return Err(TaskWorkflowError::Forbidden);
        }
        let mut task = self.require_task(task_id).await?;
        task.update_details(
            request.title,
            request.description,
            request.due_on,
            &*self.clock,
        )?;
        self.tasks.update(&task).await?;
        Ok(task)
    }

    /// Assigns a worker to a task (admin only).
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::NotAWorker`] when the target user does
    /// not exist or does not hold the worker role, and
    /// [`TaskDomainError::WorkerAlreadyAssigned`] (wrapped) on repeat
    /// assignment.
    pub async fn assign_worker(
        &self,
        actor: &Actor,
        task_id: TaskId,
        worker_id: UserId,
    ) -> TaskWorkflowResult<Task> {
        if !actor.is_admin() {
            return Err(TaskWorkflowError::Forbidden);
        }
        let worker = self.users.find_by_id(worker_id).await?;
        if !worker.is_some_and(|user| user.role() == Role::Worker) {
            return Err(TaskWorkflowError::NotAWorker(worker_id));
        }
        let mut task = self.require_task(task_id).await?;
        task.assign(worker_id, &*self.clock)?;
        self.tasks.update(&task).await?;
        Ok(task)
    }

    /// Removes a worker from a task (admin only).
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::WorkerNotAssigned`] (wrapped) when the
    /// worker is not on the task.
    pub async fn unassign_worker(
        &self,
        actor: &Actor,
        task_id: TaskId,
        worker_id: UserId,
    ) -> TaskWorkflowResult<Task> {
        if !actor.is_admin() {
            return Err(TaskWorkflowError::Forbidden);
        }
        let mut task = self.require_task(task_id).await?;
        task.unassign(worker_id, &*self.clock)?;
        self.tasks.update(&task).await?;
        Ok(task)
    }

    /// Starts work on a task (assigned worker only).
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::Forbidden`] unless the actor is a worker
    /// assigned to the task, and an invalid-transition error when the task is
    /// not pending.
    pub async fn start_task(&self, actor: &Actor, task_id: TaskId) -> TaskWorkflowResult<Task> {
        self.worker_transition(actor, task_id, TaskStatus::InProgress)
            .await
    }

    /// Requests completion review (assigned worker only).
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::Forbidden`] unless the actor is a worker
    /// assigned to the task, and an invalid-transition error when the task is
    /// not in progress.
    pub async fn request_completion(
        &self,
        actor: &Actor,
        task_id: TaskId,
    ) -> TaskWorkflowResult<Task> {
        self.worker_transition(actor, task_id, TaskStatus::PendingApproval)
            .await
    }

    /// Approves completed work (admin only).
    ///
    /// # Errors
    ///
    /// Returns an invalid-transition error unless the task awaits approval.
    pub async fn approve_completion(
        &self,
        actor: &Actor,
        task_id: TaskId,
    ) -> TaskWorkflowResult<Task> {
        self.admin_transition(actor, task_id, TaskStatus::Completed)
            .await
    }

    /// Rejects a completion request, returning the task to in-progress
    /// (admin only).
    ///
    /// # Errors
    ///
    /// Returns an invalid-transition error unless the task awaits approval.
    pub async fn reject_completion(
        &self,
        actor: &Actor,
        task_id: TaskId,
    ) -> TaskWorkflowResult<Task> {
        self.admin_transition(actor, task_id, TaskStatus::InProgress)
            .await
    }

    /// Cancels a task (admin only).
    ///
    /// # Errors
    ///
    /// Returns an invalid-transition error when the task already reached a
    /// terminal status.
    pub async fn cancel_task(&self, actor: &Actor, task_id: TaskId) -> TaskWorkflowResult<Task> {
        self.admin_transition(actor, task_id, TaskStatus::Cancelled)
            .await
    }

    /// Deletes a task and its assignments (admin only).
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::TaskMissing`] when absent.
    pub async fn delete_task(&self, actor: &Actor, task_id: TaskId) -> TaskWorkflowResult<()> {
        if !actor.is_admin() {
            return Err(TaskWorkflowError::Forbidden);
        }
        self.tasks.delete(task_id).await.map_err(|err| {
            if matches!(err, TaskRepositoryError::NotFound(_)) {
                TaskWorkflowError::TaskMissing(task_id)
            } else {
                TaskWorkflowError::Tasks(err)
            }
        })
    }

    /// Returns a task visible to the actor.
    ///
    /// Invisible tasks are reported as missing so their existence is not
    /// disclosed across scopes.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::TaskMissing`] when absent or hidden.
    pub async fn get_task(&self, actor: &Actor, task_id: TaskId) -> TaskWorkflowResult<Task> {
        let task = self.require_task(task_id).await?;
        if Self::is_visible(actor, &task) {
            Ok(task)
        } else {
            Err(TaskWorkflowError::TaskMissing(task_id))
        }
    }

    /// Lists the tasks visible to the actor.
    ///
    /// Admins see everything, workers see their assignments, and clients see
    /// their own tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::Forbidden`] for client actors without a
    /// linked client record.
    pub async fn list_tasks(&self, actor: &Actor) -> TaskWorkflowResult<Vec<Task>> {
        match actor.role() {
            Role::Admin => Ok(self.tasks.list_all().await?),
            Role::Worker => Ok(self.tasks.list_for_worker(actor.user_id()).await?),
            Role::Client => {
                let client_id = actor.client_id().ok_or(TaskWorkflowError::Forbidden)?;
                Ok(self.tasks.list_for_client(client_id).await?)
            }
        }
    }

    async fn require_task(&self, task_id: TaskId) -> TaskWorkflowResult<Task> {
        self.tasks
            .find_by_id(task_id)
            .await?
            .ok_or(TaskWorkflowError::TaskMissing(task_id))
    }

    async fn worker_transition(
        &self,
        actor: &Actor,
        task_id: TaskId,
        target: TaskStatus,
    ) -> TaskWorkflowResult<Task> {
        if !actor.is_worker() {
            return Err(TaskWorkflowError::Forbidden);
        }
        let mut task = self.require_task(task_id).await?;
        if !task.is_assigned(actor.user_id()) {
            return Err(TaskWorkflowError::Forbidden);
        }
        task.transition_to(target, &*self.clock)?;
        self.tasks.update(&task).await?;
        Ok(task)
    }

    async fn admin_transition(
        &self,
        actor: &Actor,
        task_id: TaskId,
        target: TaskStatus,
    ) -> TaskWorkflowResult<Task> {
        if !actor.is_admin() {
            return Err(TaskWorkflowError::Forbidden);
        }
        let mut task = self.require_task(task_id).await?;
        task.transition_to(target, &*self.clock)?;
        self.tasks.update(&task).await?;
        Ok(task)
    }

    fn is_visible(actor: &Actor, task: &Task) -> bool {
        match actor.role() {
            Role::Admin => true,
            Role::Worker => task.is_assigned(actor.user_id()),
            Role::Client => actor.client_id() == Some(task.client_id()),
        }
    }
}
