//! Shared harness for in-memory integration tests.

use std::sync::Arc;

use atelier::billing::adapters::memory::{InMemoryInvoiceRepository, InMemoryOfferRepository};
use atelier::billing::services::{InvoiceService, OfferDocumentRenderer, OfferService};
use atelier::client::adapters::dependents::RepositoryDependencyCheck;
use atelier::client::adapters::memory::{InMemoryClientRepository, InMemoryProjectRepository};
use atelier::client::domain::ClientId;
use atelier::client::services::{ClientDirectoryService, CreateClientRequest};
use atelier::hosting::adapters::memory::InMemoryDomainRecordRepository;
use atelier::hosting::services::HostingService;
use atelier::identity::adapters::memory::{InMemoryInviteRepository, InMemoryUserRepository};
use atelier::identity::domain::{Actor, Role, UserId};
use atelier::identity::services::{AuthService, RegisterUserRequest};
use atelier::task::adapters::memory::InMemoryTaskRepository;
use atelier::task::services::TaskWorkflowService;
use atelier::timesheet::adapters::memory::InMemoryTimesheetRepository;
use atelier::timesheet::services::TimesheetService;
use chrono::Duration;
use mockable::DefaultClock;
use rstest::fixture;

/// Identity service wired over in-memory adapters.
pub type TestAuthService = AuthService<InMemoryUserRepository, InMemoryInviteRepository, DefaultClock>;
/// Client dependency check wired over in-memory adapters.
pub type TestDependencyCheck = RepositoryDependencyCheck<
    InMemoryTaskRepository,
    InMemoryInvoiceRepository,
    InMemoryOfferRepository,
    InMemoryDomainRecordRepository,
>;
/// Directory service wired over in-memory adapters.
pub type TestDirectoryService = ClientDirectoryService<
    InMemoryClientRepository,
    InMemoryProjectRepository,
    TestDependencyCheck,
    DefaultClock,
>;
/// Task service wired over in-memory adapters.
pub type TestTaskService =
    TaskWorkflowService<InMemoryTaskRepository, InMemoryUserRepository, DefaultClock>;
/// Invoice service wired over in-memory adapters.
pub type TestInvoiceService = InvoiceService<InMemoryInvoiceRepository, DefaultClock>;
/// Offer service wired over in-memory adapters.
pub type TestOfferService =
    OfferService<InMemoryOfferRepository, InMemoryClientRepository, DefaultClock>;
/// Hosting service wired over in-memory adapters.
pub type TestHostingService = HostingService<InMemoryDomainRecordRepository, DefaultClock>;
/// Timesheet service wired over in-memory adapters.
pub type TestTimesheetService =
    TimesheetService<InMemoryTimesheetRepository, InMemoryTaskRepository, DefaultClock>;

/// Every service wired over shared in-memory repositories, mirroring the
/// production wiring.
pub struct Portal {
    /// Identity operations.
    pub auth: TestAuthService,
    /// Client and project administration.
    pub directory: TestDirectoryService,
    /// Task lifecycle operations.
    pub tasks: TestTaskService,
    /// Invoice administration.
    pub invoices: TestInvoiceService,
    /// Offer administration.
    pub offers: TestOfferService,
    /// Hosting records and alerts.
    pub hosting: TestHostingService,
    /// Time tracking.
    pub timesheets: TestTimesheetService,
}

impl Portal {
    /// Wires a fresh portal with a 72-hour invite lifetime.
    #[must_use]
    pub fn new() -> Self {
        Self::with_invite_ttl(Duration::hours(72))
    }

    /// Wires a fresh portal with an explicit invite lifetime.
    #[must_use]
    pub fn with_invite_ttl(invite_ttl: Duration) -> Self {
        let clock = Arc::new(DefaultClock);
        let users = Arc::new(InMemoryUserRepository::new());
        let invites = Arc::new(InMemoryInviteRepository::new());
        let clients = Arc::new(InMemoryClientRepository::new());
        let projects = Arc::new(InMemoryProjectRepository::new());
        let tasks = Arc::new(InMemoryTaskRepository::new());
        let invoices = Arc::new(InMemoryInvoiceRepository::new());
        let offers = Arc::new(InMemoryOfferRepository::new());
        let records = Arc::new(InMemoryDomainRecordRepository::new());
        let entries = Arc::new(InMemoryTimesheetRepository::new());
        let renderer =
            Arc::new(OfferDocumentRenderer::new().expect("embedded template parses"));
        let dependents = Arc::new(RepositoryDependencyCheck::new(
            Arc::clone(&tasks),
            Arc::clone(&invoices),
            Arc::clone(&offers),
            Arc::clone(&records),
        ));

        Self {
            auth: AuthService::new(
                Arc::clone(&users),
                invites,
                Arc::clone(&clock),
                invite_ttl,
            ),
            directory: ClientDirectoryService::new(
                Arc::clone(&clients),
                projects,
                dependents,
                Arc::clone(&clock),
            ),
            tasks: TaskWorkflowService::new(
                Arc::clone(&tasks),
                Arc::clone(&users),
                Arc::clone(&clock),
            ),
            invoices: InvoiceService::new(invoices, Arc::clone(&clock)),
            offers: OfferService::new(offers, clients, renderer, Arc::clone(&clock)),
            hosting: HostingService::new(records, Arc::clone(&clock)),
            timesheets: TimesheetService::new(entries, tasks, clock),
        }
    }
}

impl Default for Portal {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture providing a fresh portal per test.
#[fixture]
pub fn portal() -> Portal {
    Portal::new()
}

/// An admin actor; admin identity is asserted from the token in production,
/// so tests can mint one directly.
#[must_use]
pub fn admin() -> Actor {
    Actor::new(UserId::new(), Role::Admin, None)
}

/// Registers an activated worker account and returns its actor.
pub async fn seeded_worker(portal: &Portal, email: &str) -> Actor {
    let request = RegisterUserRequest::new(email, "Worker", Role::Worker)
        .with_password("a sufficiently long password");
    let user = portal
        .auth
        .register_user(&admin(), request)
        .await
        .expect("worker registration succeeds");
    Actor::new(user.id(), Role::Worker, None)
}

/// Creates a client record and returns its identifier.
pub async fn seeded_client(portal: &Portal, company: &str) -> ClientId {
    portal
        .directory
        .create_client(
            &admin(),
            CreateClientRequest::new(company, "contact@example.com"),
        )
        .await
        .expect("client creation succeeds")
        .id()
}

/// A client-role actor linked to the given client record.
#[must_use]
pub fn client_actor(client_id: ClientId) -> Actor {
    Actor::new(UserId::new(), Role::Client, Some(client_id))
}
