//! When steps for task approval BDD scenarios.

use super::world::{TaskApprovalWorld, run_async};
use atelier::identity::domain::Actor;
use rstest_bdd_macros::when;

fn record_completion_request(
    world: &mut TaskApprovalWorld,
    actor: &Actor,
) -> Result<(), eyre::Report> {
    let task = world
        .task
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing task in scenario world"))?;
    let result = run_async(world.tasks.request_completion(actor, task.id()));
    if let Ok(ref updated) = result {
        world.task = Some(updated.clone());
    }
    world.last_result = Some(result);
    Ok(())
}

#[when("the worker requests completion")]
fn worker_requests_completion(world: &mut TaskApprovalWorld) -> Result<(), eyre::Report> {
    let worker = world
        .worker
        .ok_or_else(|| eyre::eyre!("missing worker in scenario world"))?;
    record_completion_request(world, &worker)
}

#[when("the other worker requests completion")]
fn other_worker_requests_completion(world: &mut TaskApprovalWorld) -> Result<(), eyre::Report> {
    let other = world
        .other_worker
        .ok_or_else(|| eyre::eyre!("missing other worker in scenario world"))?;
    record_completion_request(world, &other)
}

#[when("the admin approves the completion")]
fn admin_approves(world: &mut TaskApprovalWorld) -> Result<(), eyre::Report> {
    let task = world
        .task
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing task in scenario world"))?;
    let admin = world.admin;
    let result = run_async(world.tasks.approve_completion(&admin, task.id()));
    if let Ok(ref updated) = result {
        world.task = Some(updated.clone());
    }
    world.last_result = Some(result);
    Ok(())
}

#[when("the admin rejects the completion")]
fn admin_rejects(world: &mut TaskApprovalWorld) -> Result<(), eyre::Report> {
    let task = world
        .task
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing task in scenario world"))?;
    let admin = world.admin;
    let result = run_async(world.tasks.reject_completion(&admin, task.id()));
    if let Ok(ref updated) = result {
        world.task = Some(updated.clone());
    }
    world.last_result = Some(result);
    Ok(())
}
