//! Service orchestration tests for client and project administration.

use std::sync::Arc;

use crate::billing::adapters::memory::{InMemoryInvoiceRepository, InMemoryOfferRepository};
use crate::billing::domain::{Invoice, InvoiceNumber, InvoiceParty, LineItem, Money};
use crate::billing::ports::InvoiceRepository;
use crate::client::{
    adapters::{
        dependents::RepositoryDependencyCheck,
        memory::{InMemoryClientRepository, InMemoryProjectRepository},
    },
    ports::ClientRepositoryError,
    services::{
        ClientDirectoryError, ClientDirectoryService, CreateClientRequest, CreateProjectRequest,
    },
};
use crate::hosting::adapters::memory::InMemoryDomainRecordRepository;
use crate::identity::domain::{Actor, Role, UserId};
use crate::task::adapters::memory::InMemoryTaskRepository;
use crate::task::domain::Task;
use crate::task::ports::TaskRepository;
use chrono::Utc;
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type TestDependencyCheck = RepositoryDependencyCheck<
    InMemoryTaskRepository,
    InMemoryInvoiceRepository,
    InMemoryOfferRepository,
    InMemoryDomainRecordRepository,
>;
type TestService = ClientDirectoryService<
    InMemoryClientRepository,
    InMemoryProjectRepository,
    TestDependencyCheck,
    DefaultClock,
>;

struct Harness {
    service: TestService,
    tasks: Arc<InMemoryTaskRepository>,
    invoices: Arc<InMemoryInvoiceRepository>,
}

#[fixture]
fn harness() -> Harness {
    let tasks = Arc::new(InMemoryTaskRepository::new());
    let invoices = Arc::new(InMemoryInvoiceRepository::new());
    let offers = Arc::new(InMemoryOfferRepository::new());
    let records = Arc::new(InMemoryDomainRecordRepository::new());
    let dependents = Arc::new(RepositoryDependencyCheck::new(
        Arc::clone(&tasks),
        Arc::clone(&invoices),
        offers,
        records,
    ));
    let service = ClientDirectoryService::new(
        Arc::new(InMemoryClientRepository::new()),
        Arc::new(InMemoryProjectRepository::new()),
        dependents,
        Arc::new(DefaultClock),
    );
    Harness {
        service,
        tasks,
        invoices,
    }
}

#[fixture]
fn service(harness: Harness) -> TestService {
    harness.service
}

fn admin() -> Actor {
    Actor::new(UserId::new(), Role::Admin, None)
}

fn worker() -> Actor {
    Actor::new(UserId::new(), Role::Worker, None)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_and_list_clients(service: TestService) {
    let request = CreateClientRequest::new("Acme GmbH", "billing@acme.example.com")
        .with_phone("+49 30 1234567");
    let created = service
        .create_client(&admin(), request)
        .await
        .expect("creation succeeds");

    let listed = service
        .list_clients(&admin())
        .await
        .expect("listing succeeds");

    assert_eq!(listed, vec![created]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn mutation_requires_admin(service: TestService) {
    let request = CreateClientRequest::new("Acme GmbH", "billing@acme.example.com");

    let result = service.create_client(&worker(), request).await;

    assert!(matches!(result, Err(ClientDirectoryError::Forbidden)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn client_actor_sees_only_own_record(service: TestService) {
    let own = service
        .create_client(
            &admin(),
            CreateClientRequest::new("Own Co", "own@example.com"),
        )
        .await
        .expect("creation succeeds");
    let other = service
        .create_client(
            &admin(),
            CreateClientRequest::new("Other Co", "other@example.com"),
        )
        .await
        .expect("creation succeeds");

    let actor = Actor::new(UserId::new(), Role::Client, Some(own.id()));
    let visible = service
        .list_clients(&actor)
        .await
        .expect("listing succeeds");
    assert_eq!(visible, vec![own]);

    let hidden = service.get_client(&actor, other.id()).await;
    assert!(matches!(
        hidden,
        Err(ClientDirectoryError::ClientMissing(_))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn worker_cannot_browse_clients(service: TestService) {
    let result = service.list_clients(&worker()).await;

    assert!(matches!(result, Err(ClientDirectoryError::Forbidden)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn project_requires_existing_client(service: TestService) {
    let request = CreateProjectRequest::new(crate::client::domain::ClientId::new(), "Relaunch");

    let result = service.create_project(&admin(), request).await;

    assert!(matches!(
        result,
        Err(ClientDirectoryError::ClientMissing(_))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn projects_are_scoped_to_client_actor(service: TestService) {
    let owner = service
        .create_client(
            &admin(),
            CreateClientRequest::new("Own Co", "own@example.com"),
        )
        .await
        .expect("creation succeeds");
    let other = service
        .create_client(
            &admin(),
            CreateClientRequest::new("Other Co", "other@example.com"),
        )
        .await
        .expect("creation succeeds");

    let own_project = service
        .create_project(&admin(), CreateProjectRequest::new(owner.id(), "Relaunch"))
        .await
        .expect("project creation succeeds");
    service
        .create_project(&admin(), CreateProjectRequest::new(other.id(), "Shop"))
        .await
        .expect("project creation succeeds");

    let actor = Actor::new(UserId::new(), Role::Client, Some(owner.id()));
    let visible = service
        .list_projects(&actor)
        .await
        .expect("listing succeeds");

    assert_eq!(visible, vec![own_project]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_replaces_profile(service: TestService) {
    let created = service
        .create_client(
            &admin(),
            CreateClientRequest::new("Acme GmbH", "billing@acme.example.com"),
        )
        .await
        .expect("creation succeeds");

    let updated = service
        .update_client(
            &admin(),
            created.id(),
            CreateClientRequest::new("Acme AG", "accounts@acme.example.com")
                .with_address("Example Street 1"),
        )
        .await
        .expect("update succeeds");

    assert_eq!(updated.profile().company_name(), "Acme AG");
    assert_eq!(updated.profile().address(), Some("Example Street 1"));
    assert!(updated.updated_at() >= created.updated_at());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deletion_rejected_while_tasks_reference_the_client(harness: Harness) {
    let client = harness
        .service
        .create_client(
            &admin(),
            CreateClientRequest::new("Acme GmbH", "billing@acme.example.com"),
        )
        .await
        .expect("creation succeeds");
    let task = Task::new(client.id(), None, "Relaunch homepage", None, None, &DefaultClock)
        .expect("valid task");
    harness.tasks.store(&task).await.expect("task stored");

    let blocked = harness.service.delete_client(&admin(), client.id()).await;
    assert!(matches!(
        blocked,
        Err(ClientDirectoryError::Clients(
            ClientRepositoryError::HasDependents(_)
        ))
    ));

    harness
        .tasks
        .delete(task.id())
        .await
        .expect("task removed");
    harness
        .service
        .delete_client(&admin(), client.id())
        .await
        .expect("deletion succeeds once no dependents remain");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deletion_rejected_while_invoices_reference_the_client(harness: Harness) {
    let client = harness
        .service
        .create_client(
            &admin(),
            CreateClientRequest::new("Acme GmbH", "billing@acme.example.com"),
        )
        .await
        .expect("creation succeeds");
    let issued_on = Utc::now().date_naive();
    let invoice = Invoice::new(
        InvoiceNumber::new("2026-0042").expect("valid number"),
        InvoiceParty::Client(client.id()),
        vec![LineItem::new("Design sprint", 1, Money::from_cents(120_000)).expect("valid item")],
        issued_on,
        issued_on,
        &DefaultClock,
    )
    .expect("valid invoice");
    harness
        .invoices
        .store(&invoice)
        .await
        .expect("invoice stored");

    let result = harness.service.delete_client(&admin(), client.id()).await;

    assert!(matches!(
        result,
        Err(ClientDirectoryError::Clients(
            ClientRepositoryError::HasDependents(_)
        ))
    ));
}
