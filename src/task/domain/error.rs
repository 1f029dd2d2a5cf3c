//! Error types for task domain validation and parsing.

use super::ids::TaskId;
use super::task::TaskStatus;
use crate::identity::domain::UserId;
use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The requested status change is not permitted by the state machine.
    #[error("invalid status transition for task {task_id}: {from:?} -> {to:?}")]
    InvalidStatusTransition {
        /// Task being mutated.
        task_id: TaskId,
        /// Current status.
        from: TaskStatus,
        /// Requested status.
        to: TaskStatus,
    },

    /// The worker is already assigned to the task.
    #[error("worker {worker_id} is already assigned to task {task_id}")]
    WorkerAlreadyAssigned {
        /// Task being mutated.
        task_id: TaskId,
        /// Worker in question.
        worker_id: UserId,
    },

    /// The worker is not assigned to the task.
    #[error("worker {worker_id} is not assigned to task {task_id}")]
    WorkerNotAssigned {
        /// Task being mutated.
        task_id: TaskId,
        /// Worker in question.
        worker_id: UserId,
    },
}

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);
