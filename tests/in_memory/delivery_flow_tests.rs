//! Delivery flow: task assignment, dual approval, and time tracking.

use atelier::task::domain::TaskStatus;
use atelier::task::services::{CreateTaskRequest, TaskWorkflowError};
use atelier::timesheet::ports::TimesheetFilter;
use atelier::timesheet::services::{LogTimeRequest, total_minutes};
use chrono::Utc;
use rstest::rstest;

use super::helpers::{Portal, admin, client_actor, portal, seeded_client, seeded_worker};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_runs_from_pending_to_completed(portal: Portal) {
    let client_id = seeded_client(&portal, "Studio Nord").await;
    let worker = seeded_worker(&portal, "dev@example.com").await;
    let task = portal
        .tasks
        .create_task(&admin(), CreateTaskRequest::new(client_id, "Relaunch homepage"))
        .await
        .expect("task creation succeeds");
    assert_eq!(task.status(), TaskStatus::Pending);

    portal
        .tasks
        .assign_worker(&admin(), task.id(), worker.user_id())
        .await
        .expect("assignment succeeds");
    let started = portal
        .tasks
        .start_task(&worker, task.id())
        .await
        .expect("start succeeds");
    assert_eq!(started.status(), TaskStatus::InProgress);

    let requested = portal
        .tasks
        .request_completion(&worker, task.id())
        .await
        .expect("completion request succeeds");
    assert_eq!(requested.status(), TaskStatus::PendingApproval);

    let approved = portal
        .tasks
        .approve_completion(&admin(), task.id())
        .await
        .expect("approval succeeds");
    assert_eq!(approved.status(), TaskStatus::Completed);

    let seen_by_client = portal
        .tasks
        .get_task(&client_actor(client_id), task.id())
        .await
        .expect("the owning client sees the task");
    assert_eq!(seen_by_client.id(), task.id());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejection_returns_the_task_to_in_progress(portal: Portal) {
    let client_id = seeded_client(&portal, "Studio Nord").await;
    let worker = seeded_worker(&portal, "dev@example.com").await;
    let task = portal
        .tasks
        .create_task(&admin(), CreateTaskRequest::new(client_id, "Relaunch homepage"))
        .await
        .expect("task creation succeeds");
    portal
        .tasks
        .assign_worker(&admin(), task.id(), worker.user_id())
        .await
        .expect("assignment succeeds");
    portal
        .tasks
        .start_task(&worker, task.id())
        .await
        .expect("start succeeds");
    portal
        .tasks
        .request_completion(&worker, task.id())
        .await
        .expect("completion request succeeds");

    let rejected = portal
        .tasks
        .reject_completion(&admin(), task.id())
        .await
        .expect("rejection succeeds");
    assert_eq!(rejected.status(), TaskStatus::InProgress);

    portal
        .tasks
        .request_completion(&worker, task.id())
        .await
        .expect("second completion request succeeds");
    let approved = portal
        .tasks
        .approve_completion(&admin(), task.id())
        .await
        .expect("approval succeeds");
    assert_eq!(approved.status(), TaskStatus::Completed);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unassigned_worker_cannot_start_the_task(portal: Portal) {
    let client_id = seeded_client(&portal, "Studio Nord").await;
    let assigned = seeded_worker(&portal, "dev@example.com").await;
    let bystander = seeded_worker(&portal, "other@example.com").await;
    let task = portal
        .tasks
        .create_task(&admin(), CreateTaskRequest::new(client_id, "Relaunch homepage"))
        .await
        .expect("task creation succeeds");
    portal
        .tasks
        .assign_worker(&admin(), task.id(), assigned.user_id())
        .await
        .expect("assignment succeeds");

    let result = portal.tasks.start_task(&bystander, task.id()).await;

    assert!(matches!(result, Err(TaskWorkflowError::Forbidden)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn logged_time_is_totalled_per_task(portal: Portal) {
    let client_id = seeded_client(&portal, "Studio Nord").await;
    let worker = seeded_worker(&portal, "dev@example.com").await;
    let task = portal
        .tasks
        .create_task(&admin(), CreateTaskRequest::new(client_id, "Relaunch homepage"))
        .await
        .expect("task creation succeeds");
    portal
        .tasks
        .assign_worker(&admin(), task.id(), worker.user_id())
        .await
        .expect("assignment succeeds");

    let today = Utc::now().date_naive();
    portal
        .timesheets
        .log_time(&worker, LogTimeRequest::new(task.id(), today, 90))
        .await
        .expect("first entry succeeds");
    portal
        .timesheets
        .log_time(
            &worker,
            LogTimeRequest::new(task.id(), today, 45).with_note("code review"),
        )
        .await
        .expect("second entry succeeds");

    let entries = portal
        .timesheets
        .list_entries(&admin(), TimesheetFilter::any().with_task(task.id()))
        .await
        .expect("listing succeeds");

    assert_eq!(entries.len(), 2);
    assert_eq!(total_minutes(&entries), 135);
    assert!(entries.iter().all(|entry| entry.worker_id() == worker.user_id()));
}
