//! Then steps for task approval BDD scenarios.

use super::world::TaskApprovalWorld;
use atelier::task::{
    domain::{TaskDomainError, TaskStatus},
    services::TaskWorkflowError,
};
use rstest_bdd_macros::then;

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &TaskApprovalWorld, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;

    let task = world
        .task
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing task in scenario world"))?;

    if task.status() != expected {
        return Err(eyre::eyre!(
            "expected status {}, found {}",
            expected.as_str(),
            task.status().as_str()
        ));
    }

    Ok(())
}

#[then("the request fails with a forbidden error")]
fn request_fails_forbidden(world: &TaskApprovalWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing workflow result"))?;

    if !matches!(result, Err(TaskWorkflowError::Forbidden)) {
        return Err(eyre::eyre!("expected Forbidden error, got {result:?}"));
    }

    Ok(())
}

#[then("the request fails with an invalid status transition error")]
fn request_fails_invalid_transition(world: &TaskApprovalWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing workflow result"))?;

    if !matches!(
        result,
        Err(TaskWorkflowError::Domain(
            TaskDomainError::InvalidStatusTransition { .. }
        ))
    ) {
        return Err(eyre::eyre!(
            "expected InvalidStatusTransition error, got {result:?}"
        ));
    }

    Ok(())
}
