//! Exhaustive checks over the task status state machine.

use crate::task::domain::{ParseTaskStatusError, TaskStatus};
use rstest::rstest;

#[rstest]
// Pending may start or be abandoned.
#[case(TaskStatus::Pending, TaskStatus::InProgress, true)]
#[case(TaskStatus::Pending, TaskStatus::PendingApproval, false)]
#[case(TaskStatus::Pending, TaskStatus::Completed, false)]
#[case(TaskStatus::Pending, TaskStatus::Cancelled, true)]
#[case(TaskStatus::Pending, TaskStatus::Pending, false)]
// In progress may go to review or be abandoned.
#[case(TaskStatus::InProgress, TaskStatus::Pending, false)]
#[case(TaskStatus::InProgress, TaskStatus::PendingApproval, true)]
#[case(TaskStatus::InProgress, TaskStatus::Completed, false)]
#[case(TaskStatus::InProgress, TaskStatus::Cancelled, true)]
#[case(TaskStatus::InProgress, TaskStatus::InProgress, false)]
// Pending approval may be approved, rejected back, or abandoned.
#[case(TaskStatus::PendingApproval, TaskStatus::Pending, false)]
#[case(TaskStatus::PendingApproval, TaskStatus::InProgress, true)]
#[case(TaskStatus::PendingApproval, TaskStatus::Completed, true)]
#[case(TaskStatus::PendingApproval, TaskStatus::Cancelled, true)]
#[case(TaskStatus::PendingApproval, TaskStatus::PendingApproval, false)]
// Terminal statuses admit nothing.
#[case(TaskStatus::Completed, TaskStatus::Pending, false)]
#[case(TaskStatus::Completed, TaskStatus::InProgress, false)]
#[case(TaskStatus::Completed, TaskStatus::PendingApproval, false)]
#[case(TaskStatus::Completed, TaskStatus::Cancelled, false)]
#[case(TaskStatus::Completed, TaskStatus::Completed, false)]
#[case(TaskStatus::Cancelled, TaskStatus::Pending, false)]
#[case(TaskStatus::Cancelled, TaskStatus::InProgress, false)]
#[case(TaskStatus::Cancelled, TaskStatus::PendingApproval, false)]
#[case(TaskStatus::Cancelled, TaskStatus::Completed, false)]
#[case(TaskStatus::Cancelled, TaskStatus::Cancelled, false)]
fn transition_matrix(#[case] from: TaskStatus, #[case] to: TaskStatus, #[case] allowed: bool) {
    assert_eq!(from.can_transition_to(to), allowed);
}

#[rstest]
#[case(TaskStatus::Pending, false)]
#[case(TaskStatus::InProgress, false)]
#[case(TaskStatus::PendingApproval, false)]
#[case(TaskStatus::Completed, true)]
#[case(TaskStatus::Cancelled, true)]
fn terminal_statuses(#[case] status: TaskStatus, #[case] terminal: bool) {
    assert_eq!(status.is_terminal(), terminal);
}

#[rstest]
#[case(TaskStatus::Pending, "pending")]
#[case(TaskStatus::InProgress, "in_progress")]
#[case(TaskStatus::PendingApproval, "pending_approval")]
#[case(TaskStatus::Completed, "completed")]
#[case(TaskStatus::Cancelled, "cancelled")]
fn round_trips_through_storage_form(#[case] status: TaskStatus, #[case] stored: &str) {
    assert_eq!(status.as_str(), stored);
    assert_eq!(TaskStatus::try_from(stored).expect("parses"), status);
}

#[rstest]
fn rejects_unknown_storage_form() {
    let result = TaskStatus::try_from("archived");

    assert_eq!(result, Err(ParseTaskStatusError("archived".to_owned())));
}
