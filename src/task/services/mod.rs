//! Orchestration services for the task lifecycle.

mod workflow;

pub use workflow::{
    CreateTaskRequest, TaskWorkflowError, TaskWorkflowResult, TaskWorkflowService,
};
