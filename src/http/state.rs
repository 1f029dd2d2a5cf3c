//! Shared application state wired over the `PostgreSQL` adapters.

use crate::billing::adapters::postgres::{PostgresInvoiceRepository, PostgresOfferRepository};
use crate::billing::services::{
    InvoiceService, OfferDocumentError, OfferDocumentRenderer, OfferService,
};
use crate::client::adapters::dependents::RepositoryDependencyCheck;
use crate::client::adapters::postgres::{PostgresClientRepository, PostgresProjectRepository};
use crate::client::services::ClientDirectoryService;
use crate::config::Config;
use crate::hosting::adapters::postgres::PostgresDomainRecordRepository;
use crate::hosting::services::HostingService;
use crate::identity::adapters::postgres::{PostgresInviteRepository, PostgresUserRepository};
use crate::identity::services::{AuthService, JwtCodec};
use crate::task::adapters::postgres::PostgresTaskRepository;
use crate::task::services::TaskWorkflowService;
use crate::timesheet::adapters::postgres::PostgresTimesheetRepository;
use crate::timesheet::services::TimesheetService;
use chrono::Duration;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use mockable::DefaultClock;
use std::sync::Arc;

/// Shared `PostgreSQL` connection pool.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Identity service over the `PostgreSQL` adapters.
pub type PgAuthService = AuthService<PostgresUserRepository, PostgresInviteRepository, DefaultClock>;
/// Client dependency check over the `PostgreSQL` adapters.
pub type PgDependencyCheck = RepositoryDependencyCheck<
    PostgresTaskRepository,
    PostgresInvoiceRepository,
    PostgresOfferRepository,
    PostgresDomainRecordRepository,
>;
/// Client directory service over the `PostgreSQL` adapters.
pub type PgDirectoryService = ClientDirectoryService<
    PostgresClientRepository,
    PostgresProjectRepository,
    PgDependencyCheck,
    DefaultClock,
>;
/// Task workflow service over the `PostgreSQL` adapters.
pub type PgTaskService =
    TaskWorkflowService<PostgresTaskRepository, PostgresUserRepository, DefaultClock>;
/// Invoice service over the `PostgreSQL` adapter.
pub type PgInvoiceService = InvoiceService<PostgresInvoiceRepository, DefaultClock>;
/// Offer service over the `PostgreSQL` adapters.
pub type PgOfferService =
    OfferService<PostgresOfferRepository, PostgresClientRepository, DefaultClock>;
/// Hosting service over the `PostgreSQL` adapter.
pub type PgHostingService = HostingService<PostgresDomainRecordRepository, DefaultClock>;
/// Timesheet service over the `PostgreSQL` adapters.
pub type PgTimesheetService =
    TimesheetService<PostgresTimesheetRepository, PostgresTaskRepository, DefaultClock>;

/// Application state handed to every handler.
///
/// Services are shared behind `Arc` so cloning the state per request stays a
/// reference-count bump.
#[derive(Clone)]
pub struct AppState {
    /// Access-token codec shared with the authentication extractor.
    pub tokens: Arc<JwtCodec>,
    /// Identity operations.
    pub auth: Arc<PgAuthService>,
    /// Client and project administration.
    pub directory: Arc<PgDirectoryService>,
    /// Task lifecycle operations.
    pub tasks: Arc<PgTaskService>,
    /// Invoice administration.
    pub invoices: Arc<PgInvoiceService>,
    /// Offer administration and document rendering.
    pub offers: Arc<PgOfferService>,
    /// Domain record administration and expiry alerts.
    pub hosting: Arc<PgHostingService>,
    /// Worker time tracking.
    pub timesheets: Arc<PgTimesheetService>,
}

impl AppState {
    /// Wires every service over a shared connection pool.
    ///
    /// # Errors
    ///
    /// Returns [`OfferDocumentError::Template`] when the embedded offer
    /// template fails to parse.
    pub fn new(pool: PgPool, config: &Config) -> Result<Self, OfferDocumentError> {
        let clock = Arc::new(DefaultClock);
        let users = Arc::new(PostgresUserRepository::new(pool.clone()));
        let invites = Arc::new(PostgresInviteRepository::new(pool.clone()));
        let clients = Arc::new(PostgresClientRepository::new(pool.clone()));
        let projects = Arc::new(PostgresProjectRepository::new(pool.clone()));
        let tasks = Arc::new(PostgresTaskRepository::new(pool.clone()));
        let invoices = Arc::new(PostgresInvoiceRepository::new(pool.clone()));
        let offers = Arc::new(PostgresOfferRepository::new(pool.clone()));
        let records = Arc::new(PostgresDomainRecordRepository::new(pool.clone()));
        let entries = Arc::new(PostgresTimesheetRepository::new(pool));

        let dependents = Arc::new(RepositoryDependencyCheck::new(
            Arc::clone(&tasks),
            Arc::clone(&invoices),
            Arc::clone(&offers),
            Arc::clone(&records),
        ));

        Ok(Self {
            tokens: Arc::new(JwtCodec::new(&config.jwt_secret, config.token_ttl_minutes)),
            auth: Arc::new(AuthService::new(
                Arc::clone(&users),
                invites,
                Arc::clone(&clock),
                Duration::hours(config.invite_ttl_hours),
            )),
            directory: Arc::new(ClientDirectoryService::new(
                Arc::clone(&clients),
                projects,
                dependents,
                Arc::clone(&clock),
            )),
            tasks: Arc::new(TaskWorkflowService::new(
                Arc::clone(&tasks),
                users,
                Arc::clone(&clock),
            )),
            invoices: Arc::new(InvoiceService::new(invoices, Arc::clone(&clock))),
            offers: Arc::new(OfferService::new(
                offers,
                clients,
                Arc::new(OfferDocumentRenderer::new()?),
                Arc::clone(&clock),
            )),
            hosting: Arc::new(HostingService::new(records, Arc::clone(&clock))),
            timesheets: Arc::new(TimesheetService::new(entries, tasks, clock)),
        })
    }
}
