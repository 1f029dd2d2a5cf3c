//! `PostgreSQL` repository implementations for client and project storage.

use super::{
    models::{ClientRow, NewClientRow, NewProjectRow, ProjectRow},
    schema::{clients, projects},
};
use crate::client::{
    domain::{
        Client, ClientId, ClientProfile, PersistedClientData, PersistedProjectData, Project,
        ProjectId,
    },
    ports::{
        ClientRepository, ClientRepositoryError, ClientRepositoryResult, ProjectRepository,
        ProjectRepositoryError, ProjectRepositoryResult,
    },
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by client adapters.
pub type ClientPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed client repository.
#[derive(Debug, Clone)]
pub struct PostgresClientRepository {
    pool: ClientPgPool,
}

impl PostgresClientRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: ClientPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ClientRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ClientRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(ClientRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(ClientRepositoryError::persistence)?
    }
}

#[async_trait]
impl ClientRepository for PostgresClientRepository {
    async fn store(&self, client: &Client) -> ClientRepositoryResult<()> {
        let client_id = client.id();
        let new_row = client_to_new_row(client);

        self.run_blocking(move |connection| {
            diesel::insert_into(clients::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        ClientRepositoryError::DuplicateClient(client_id)
                    }
                    _ => ClientRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, client: &Client) -> ClientRepositoryResult<()> {
        let client_id = client.id();
        let row = client_to_new_row(client);

        self.run_blocking(move |connection| {
            let affected =
                diesel::update(clients::table.filter(clients::id.eq(client_id.into_inner())))
                    .set((
                        clients::company_name.eq(&row.company_name),
                        clients::contact_email.eq(&row.contact_email),
                        clients::phone.eq(&row.phone),
                        clients::address.eq(&row.address),
                        clients::updated_at.eq(row.updated_at),
                    ))
                    .execute(connection)
                    .map_err(ClientRepositoryError::persistence)?;
            if affected == 0 {
                return Err(ClientRepositoryError::NotFound(client_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: ClientId) -> ClientRepositoryResult<Option<Client>> {
        self.run_blocking(move |connection| {
            let row = clients::table
                .filter(clients::id.eq(id.into_inner()))
                .select(ClientRow::as_select())
                .first::<ClientRow>(connection)
                .optional()
                .map_err(ClientRepositoryError::persistence)?;
            row.map(row_to_client).transpose()
        })
        .await
    }

    async fn list_all(&self) -> ClientRepositoryResult<Vec<Client>> {
        self.run_blocking(move |connection| {
            let rows = clients::table
                .order(clients::company_name.asc())
                .select(ClientRow::as_select())
                .load::<ClientRow>(connection)
                .map_err(ClientRepositoryError::persistence)?;
            rows.into_iter().map(row_to_client).collect()
        })
        .await
    }

    async fn delete(&self, id: ClientId) -> ClientRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let affected = diesel::delete(clients::table.filter(clients::id.eq(id.into_inner())))
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                        ClientRepositoryError::HasDependents(id)
                    }
                    _ => ClientRepositoryError::persistence(err),
                })?;
            if affected == 0 {
                return Err(ClientRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }
}

fn client_to_new_row(client: &Client) -> NewClientRow {
    let profile = client.profile();
    NewClientRow {
        id: client.id().into_inner(),
        company_name: profile.company_name().to_owned(),
        contact_email: profile.contact_email().as_str().to_owned(),
        phone: profile.phone().map(str::to_owned),
        address: profile.address().map(str::to_owned),
        created_at: client.created_at(),
        updated_at: client.updated_at(),
    }
}

fn row_to_client(row: ClientRow) -> ClientRepositoryResult<Client> {
    let mut profile = ClientProfile::new(row.company_name, row.contact_email)
        .map_err(ClientRepositoryError::persistence)?;
    if let Some(phone) = row.phone {
        profile = profile.with_phone(phone);
    }
    if let Some(address) = row.address {
        profile = profile.with_address(address);
    }

    Ok(Client::from_persisted(PersistedClientData {
        id: ClientId::from_uuid(row.id),
        profile,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

/// `PostgreSQL`-backed project repository.
#[derive(Debug, Clone)]
pub struct PostgresProjectRepository {
    pool: ClientPgPool,
}

impl PostgresProjectRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: ClientPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ProjectRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ProjectRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(ProjectRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(ProjectRepositoryError::persistence)?
    }
}

#[async_trait]
impl ProjectRepository for PostgresProjectRepository {
    async fn store(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let project_id = project.id();
        let new_row = project_to_new_row(project);

        self.run_blocking(move |connection| {
            diesel::insert_into(projects::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        ProjectRepositoryError::DuplicateProject(project_id)
                    }
                    _ => ProjectRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>> {
        self.run_blocking(move |connection| {
            let row = projects::table
                .filter(projects::id.eq(id.into_inner()))
                .select(ProjectRow::as_select())
                .first::<ProjectRow>(connection)
                .optional()
                .map_err(ProjectRepositoryError::persistence)?;
            Ok(row.map(row_to_project))
        })
        .await
    }

    async fn list_all(&self) -> ProjectRepositoryResult<Vec<Project>> {
        self.run_blocking(move |connection| {
            let rows = projects::table
                .order(projects::created_at.asc())
                .select(ProjectRow::as_select())
                .load::<ProjectRow>(connection)
                .map_err(ProjectRepositoryError::persistence)?;
            Ok(rows.into_iter().map(row_to_project).collect())
        })
        .await
    }

    async fn list_for_client(&self, client_id: ClientId) -> ProjectRepositoryResult<Vec<Project>> {
        self.run_blocking(move |connection| {
            let rows = projects::table
                .filter(projects::client_id.eq(client_id.into_inner()))
                .order(projects::created_at.asc())
                .select(ProjectRow::as_select())
                .load::<ProjectRow>(connection)
                .map_err(ProjectRepositoryError::persistence)?;
            Ok(rows.into_iter().map(row_to_project).collect())
        })
        .await
    }

    async fn delete(&self, id: ProjectId) -> ProjectRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let affected =
                diesel::delete(projects::table.filter(projects::id.eq(id.into_inner())))
                    .execute(connection)
                    .map_err(ProjectRepositoryError::persistence)?;
            if affected == 0 {
                return Err(ProjectRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }
}

fn project_to_new_row(project: &Project) -> NewProjectRow {
    NewProjectRow {
        id: project.id().into_inner(),
        client_id: project.client_id().into_inner(),
        name: project.name().to_owned(),
        description: project.description().map(str::to_owned),
        created_at: project.created_at(),
        updated_at: project.updated_at(),
    }
}

fn row_to_project(row: ProjectRow) -> Project {
    Project::from_persisted(PersistedProjectData {
        id: ProjectId::from_uuid(row.id),
        client_id: ClientId::from_uuid(row.client_id),
        name: row.name,
        description: row.description,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}
