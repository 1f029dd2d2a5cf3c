//! Service orchestration tests for the dual-approval task workflow.

use std::sync::Arc;

use crate::client::domain::ClientId;
use crate::identity::adapters::memory::InMemoryUserRepository;
use crate::identity::domain::{Actor, EmailAddress, PasswordHash, Role, User, UserId};
use crate::identity::ports::UserRepository;
use crate::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{TaskDomainError, TaskId, TaskStatus},
    services::{CreateTaskRequest, TaskWorkflowError, TaskWorkflowService},
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type TestService =
    TaskWorkflowService<InMemoryTaskRepository, InMemoryUserRepository, DefaultClock>;

struct Harness {
    service: TestService,
    users: Arc<InMemoryUserRepository>,
}

#[fixture]
fn harness() -> Harness {
    let users = Arc::new(InMemoryUserRepository::new());
    let service = TaskWorkflowService::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::clone(&users),
        Arc::new(DefaultClock),
    );
    Harness { service, users }
}

fn admin() -> Actor {
    Actor::new(UserId::new(), Role::Admin, None)
}

async fn seeded_worker(users: &InMemoryUserRepository, email: &str) -> Actor {
    let user = User::new(
        EmailAddress::new(email).expect("valid email"),
        "Worker",
        Role::Worker,
        None,
        Some(PasswordHash::derive("long enough password").expect("valid password")),
        &DefaultClock,
    )
    .expect("valid user");
    users.store(&user).await.expect("store succeeds");
    Actor::new(user.id(), Role::Worker, None)
}

async fn seeded_task(service: &TestService, client_id: ClientId) -> TaskId {
    service
        .create_task(&admin(), CreateTaskRequest::new(client_id, "Migrate mailboxes"))
        .await
        .expect("creation succeeds")
        .id()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_requires_admin(harness: Harness) {
    let worker = seeded_worker(&harness.users, "w@example.com").await;

    let result = harness
        .service
        .create_task(&worker, CreateTaskRequest::new(ClientId::new(), "Task"))
        .await;

    assert!(matches!(result, Err(TaskWorkflowError::Forbidden)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn assignment_rejects_non_worker_target(harness: Harness) {
    let task_id = seeded_task(&harness.service, ClientId::new()).await;

    let result = harness
        .service
        .assign_worker(&admin(), task_id, UserId::new())
        .await;

    assert!(matches!(result, Err(TaskWorkflowError::NotAWorker(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn full_dual_approval_flow(harness: Harness) {
    let worker = seeded_worker(&harness.users, "w@example.com").await;
    let task_id = seeded_task(&harness.service, ClientId::new()).await;

    harness
        .service
        .assign_worker(&admin(), task_id, worker.user_id())
        .await
        .expect("assignment succeeds");
    let started = harness
        .service
        .start_task(&worker, task_id)
        .await
        .expect("start succeeds");
    assert_eq!(started.status(), TaskStatus::InProgress);

    let submitted = harness
        .service
        .request_completion(&worker, task_id)
        .await
        .expect("submission succeeds");
    assert_eq!(submitted.status(), TaskStatus::PendingApproval);

    let approved = harness
        .service
        .approve_completion(&admin(), task_id)
        .await
        .expect("approval succeeds");
    assert_eq!(approved.status(), TaskStatus::Completed);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejection_reopens_the_task(harness: Harness) {
    let worker = seeded_worker(&harness.users, "w@example.com").await;
    let task_id = seeded_task(&harness.service, ClientId::new()).await;
    harness
        .service
        .assign_worker(&admin(), task_id, worker.user_id())
        .await
        .expect("assignment succeeds");
    harness
        .service
        .start_task(&worker, task_id)
        .await
        .expect("start succeeds");
    harness
        .service
        .request_completion(&worker, task_id)
        .await
        .expect("submission succeeds");

    let reopened = harness
        .service
        .reject_completion(&admin(), task_id)
        .await
        .expect("rejection succeeds");

    assert_eq!(reopened.status(), TaskStatus::InProgress);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unassigned_worker_cannot_start(harness: Harness) {
    let assigned = seeded_worker(&harness.users, "assigned@example.com").await;
    let outsider = seeded_worker(&harness.users, "outsider@example.com").await;
    let task_id = seeded_task(&harness.service, ClientId::new()).await;
    harness
        .service
        .assign_worker(&admin(), task_id, assigned.user_id())
        .await
        .expect("assignment succeeds");

    let result = harness.service.start_task(&outsider, task_id).await;

    assert!(matches!(result, Err(TaskWorkflowError::Forbidden)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn worker_cannot_approve_own_work(harness: Harness) {
    let worker = seeded_worker(&harness.users, "w@example.com").await;
    let task_id = seeded_task(&harness.service, ClientId::new()).await;
    harness
        .service
        .assign_worker(&admin(), task_id, worker.user_id())
        .await
        .expect("assignment succeeds");
    harness
        .service
        .start_task(&worker, task_id)
        .await
        .expect("start succeeds");
    harness
        .service
        .request_completion(&worker, task_id)
        .await
        .expect("submission succeeds");

    let result = harness.service.approve_completion(&worker, task_id).await;

    assert!(matches!(result, Err(TaskWorkflowError::Forbidden)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn approval_requires_pending_review(harness: Harness) {
    let task_id = seeded_task(&harness.service, ClientId::new()).await;

    let result = harness.service.approve_completion(&admin(), task_id).await;

    assert!(matches!(
        result,
        Err(TaskWorkflowError::Domain(
            TaskDomainError::InvalidStatusTransition {
                from: TaskStatus::Pending,
                to: TaskStatus::Completed,
                ..
            }
        ))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn cancelled_task_is_frozen(harness: Harness) {
    let worker = seeded_worker(&harness.users, "w@example.com").await;
    let task_id = seeded_task(&harness.service, ClientId::new()).await;
    harness
        .service
        .assign_worker(&admin(), task_id, worker.user_id())
        .await
        .expect("assignment succeeds");
    harness
        .service
        .cancel_task(&admin(), task_id)
        .await
        .expect("cancellation succeeds");

    let result = harness.service.start_task(&worker, task_id).await;

    assert!(matches!(
        result,
        Err(TaskWorkflowError::Domain(
            TaskDomainError::InvalidStatusTransition { .. }
        ))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn listing_scopes_by_role(harness: Harness) {
    let worker = seeded_worker(&harness.users, "w@example.com").await;
    let own_client = ClientId::new();
    let other_client = ClientId::new();
    let assigned_id = seeded_task(&harness.service, own_client).await;
    seeded_task(&harness.service, other_client).await;
    harness
        .service
        .assign_worker(&admin(), assigned_id, worker.user_id())
        .await
        .expect("assignment succeeds");

    let all = harness
        .service
        .list_tasks(&admin())
        .await
        .expect("admin listing succeeds");
    assert_eq!(all.len(), 2);

    let mine = harness
        .service
        .list_tasks(&worker)
        .await
        .expect("worker listing succeeds");
    assert_eq!(mine.len(), 1);
    assert_eq!(
        mine.first().map(crate::task::domain::Task::id),
        Some(assigned_id)
    );

    let client_actor = Actor::new(UserId::new(), Role::Client, Some(own_client));
    let owned = harness
        .service
        .list_tasks(&client_actor)
        .await
        .expect("client listing succeeds");
    assert_eq!(owned.len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn invisible_task_reads_as_missing(harness: Harness) {
    let task_id = seeded_task(&harness.service, ClientId::new()).await;
    let stranger = Actor::new(UserId::new(), Role::Client, Some(ClientId::new()));

    let result = harness.service.get_task(&stranger, task_id).await;

    assert!(matches!(result, Err(TaskWorkflowError::TaskMissing(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_reports_missing_task(harness: Harness) {
    let result = harness.service.delete_task(&admin(), TaskId::new()).await;

    assert!(matches!(result, Err(TaskWorkflowError::TaskMissing(_))));
}
