//! Behaviour tests for the task approval handshake.

#[path = "task_approval_steps/mod.rs"]
mod task_approval_steps_defs;

use rstest_bdd_macros::scenario;
use task_approval_steps_defs::world::{TaskApprovalWorld, world};

#[scenario(
    path = "tests/features/task_approval.feature",
    name = "Worker completes an assigned task"
)]
#[tokio::test(flavor = "multi_thread")]
async fn worker_completes_an_assigned_task(world: TaskApprovalWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/task_approval.feature",
    name = "Admin rejects a completion request"
)]
#[tokio::test(flavor = "multi_thread")]
async fn admin_rejects_a_completion_request(world: TaskApprovalWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/task_approval.feature",
    name = "Unassigned workers cannot request completion"
)]
#[tokio::test(flavor = "multi_thread")]
async fn unassigned_workers_cannot_request_completion(world: TaskApprovalWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/task_approval.feature",
    name = "Approval requires a completion request"
)]
#[tokio::test(flavor = "multi_thread")]
async fn approval_requires_a_completion_request(world: TaskApprovalWorld) {
    let _ = world;
}
