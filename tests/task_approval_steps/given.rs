//! Given steps for task approval BDD scenarios.

use super::world::{TaskApprovalWorld, run_async};
use atelier::client::domain::ClientId;
use atelier::identity::domain::{Actor, Role};
use atelier::identity::services::RegisterUserRequest;
use atelier::task::services::CreateTaskRequest;
use eyre::WrapErr;
use rstest_bdd_macros::given;

fn register_worker(world: &mut TaskApprovalWorld, email: &str) -> Result<Actor, eyre::Report> {
    let request = RegisterUserRequest::new(email, "Worker", Role::Worker)
        .with_password("a sufficiently long password");
    let user = run_async(world.auth.register_user(&world.admin, request))
        .wrap_err("register worker for scenario")?;
    Ok(Actor::new(user.id(), Role::Worker, None))
}

#[given(r#"a pending task "{title}""#)]
fn pending_task(world: &mut TaskApprovalWorld, title: String) -> Result<(), eyre::Report> {
    let request = CreateTaskRequest::new(ClientId::new(), title);
    let task = run_async(world.tasks.create_task(&world.admin, request))
        .wrap_err("create task for scenario")?;
    world.task = Some(task);
    Ok(())
}

#[given(r#"a worker "{email}" assigned to the task"#)]
fn worker_assigned(world: &mut TaskApprovalWorld, email: String) -> Result<(), eyre::Report> {
    let worker = register_worker(world, &email)?;
    let task = world
        .task
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing task in scenario world"))?;
    let updated = run_async(
        world
            .tasks
            .assign_worker(&world.admin, task.id(), worker.user_id()),
    )
    .wrap_err("assign worker in scenario setup")?;
    world.task = Some(updated);
    world.worker = Some(worker);
    Ok(())
}

#[given("the worker has started the task")]
fn worker_started(world: &mut TaskApprovalWorld) -> Result<(), eyre::Report> {
    let worker = world
        .worker
        .ok_or_else(|| eyre::eyre!("missing worker in scenario world"))?;
    let task = world
        .task
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing task in scenario world"))?;
    let updated = run_async(world.tasks.start_task(&worker, task.id()))
        .wrap_err("start task in scenario setup")?;
    world.task = Some(updated);
    Ok(())
}

#[given("the worker has requested completion")]
fn worker_requested_completion(world: &mut TaskApprovalWorld) -> Result<(), eyre::Report> {
    let worker = world
        .worker
        .ok_or_else(|| eyre::eyre!("missing worker in scenario world"))?;
    let task = world
        .task
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing task in scenario world"))?;
    let updated = run_async(world.tasks.request_completion(&worker, task.id()))
        .wrap_err("request completion in scenario setup")?;
    world.task = Some(updated);
    Ok(())
}

#[given(r#"another worker "{email}""#)]
fn another_worker(world: &mut TaskApprovalWorld, email: String) -> Result<(), eyre::Report> {
    let worker = register_worker(world, &email)?;
    world.other_worker = Some(worker);
    Ok(())
}
