//! Shared world state for task approval BDD scenarios.

use std::sync::Arc;

use atelier::identity::{
    adapters::memory::{InMemoryInviteRepository, InMemoryUserRepository},
    domain::{Actor, Role, UserId},
    services::AuthService,
};
use atelier::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::Task,
    services::{TaskWorkflowError, TaskWorkflowService},
};
use chrono::Duration;
use mockable::DefaultClock;
use rstest::fixture;

/// Task service type used by the BDD world.
pub type TestTaskService =
    TaskWorkflowService<InMemoryTaskRepository, InMemoryUserRepository, DefaultClock>;
/// Identity service type used by the BDD world.
pub type TestAuthService =
    AuthService<InMemoryUserRepository, InMemoryInviteRepository, DefaultClock>;

/// Scenario world for task approval behaviour tests.
pub struct TaskApprovalWorld {
    pub tasks: TestTaskService,
    pub auth: TestAuthService,
    pub admin: Actor,
    pub worker: Option<Actor>,
    pub other_worker: Option<Actor>,
    pub task: Option<Task>,
    pub last_result: Option<Result<Task, TaskWorkflowError>>,
}

impl TaskApprovalWorld {
    /// Creates a world sharing one user repository between both services.
    #[must_use]
    pub fn new() -> Self {
        let clock = Arc::new(DefaultClock);
        let users = Arc::new(InMemoryUserRepository::new());
        let tasks = TaskWorkflowService::new(
            Arc::new(InMemoryTaskRepository::new()),
            Arc::clone(&users),
            Arc::clone(&clock),
        );
        let auth = AuthService::new(
            users,
            Arc::new(InMemoryInviteRepository::new()),
            clock,
            Duration::hours(72),
        );

        Self {
            tasks,
            auth,
            admin: Actor::new(UserId::new(), Role::Admin, None),
            worker: None,
            other_worker: None,
            task: None,
            last_result: None,
        }
    }
}

impl Default for TaskApprovalWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskApprovalWorld {
    TaskApprovalWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
