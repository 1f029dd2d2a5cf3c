//! `PostgreSQL` repository implementations for identity storage.

use super::{
    models::{InviteRow, NewInviteRow, NewUserRow, UserRow},
    schema::{invites, users},
};
use crate::client::domain::ClientId;
use crate::identity::{
    domain::{
        EmailAddress, Invite, InviteId, PasswordHash, PersistedInviteData, PersistedUserData, Role,
        User, UserId,
    },
    ports::{
        InviteRepository, InviteRepositoryError, InviteRepositoryResult, UserRepository,
        UserRepositoryError, UserRepositoryResult,
    },
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by identity adapters.
pub type IdentityPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed user repository.
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: IdentityPgPool,
}

impl PostgresUserRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: IdentityPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> UserRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> UserRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(UserRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(UserRepositoryError::persistence)?
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn store(&self, user: &User) -> UserRepositoryResult<()> {
        let user_id = user.id();
        let email = user.email().clone();
        let new_row = user_to_new_row(user);

        self.run_blocking(move |connection| {
            diesel::insert_into(users::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if is_email_unique_violation(info.as_ref()) =>
                    {
                        UserRepositoryError::DuplicateEmail(email.clone())
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        UserRepositoryError::DuplicateUser(user_id)
                    }
                    _ => UserRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, user: &User) -> UserRepositoryResult<()> {
        let user_id = user.id();
        let row = user_to_new_row(user);

        self.run_blocking(move |connection| {
            let affected = diesel::update(users::table.filter(users::id.eq(user_id.into_inner())))
                .set((
                    users::display_name.eq(&row.display_name),
                    users::password_hash.eq(&row.password_hash),
                    users::updated_at.eq(row.updated_at),
                ))
                .execute(connection)
                .map_err(UserRepositoryError::persistence)?;
            if affected == 0 {
                return Err(UserRepositoryError::NotFound(user_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>> {
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::id.eq(id.into_inner()))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?;
            row.map(row_to_user).transpose()
        })
        .await
    }

    async fn find_by_email(&self, email: &EmailAddress) -> UserRepositoryResult<Option<User>> {
        let lookup = email.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::email.eq(&lookup))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?;
            row.map(row_to_user).transpose()
        })
        .await
    }

    async fn list_by_role(&self, role: Role) -> UserRepositoryResult<Vec<User>> {
        let role_str = role.as_str().to_owned();
        self.run_blocking(move |connection| {
            let rows = users::table
                .filter(users::role.eq(&role_str))
                .order(users::created_at.asc())
                .select(UserRow::as_select())
                .load::<UserRow>(connection)
                .map_err(UserRepositoryError::persistence)?;
            rows.into_iter().map(row_to_user).collect()
        })
        .await
    }
}

fn user_to_new_row(user: &User) -> NewUserRow {
    NewUserRow {
        id: user.id().into_inner(),
        email: user.email().as_str().to_owned(),
        display_name: user.display_name().to_owned(),
        role: user.role().as_str().to_owned(),
        client_id: user.client_id().map(ClientId::into_inner),
        password_hash: user.password_hash().map(|hash| hash.as_str().to_owned()),
        created_at: user.created_at(),
        updated_at: user.updated_at(),
    }
}

fn row_to_user(row: UserRow) -> UserRepositoryResult<User> {
    let email = EmailAddress::new(row.email).map_err(UserRepositoryError::persistence)?;
    let role = Role::try_from(row.role.as_str()).map_err(UserRepositoryError::persistence)?;

    let data = PersistedUserData {
        id: UserId::from_uuid(row.id),
        email,
        display_name: row.display_name,
        role,
        client_id: row.client_id.map(ClientId::from_uuid),
        password_hash: row.password_hash.map(PasswordHash::from_stored),
        created_at: row.created_at,
        updated_at: row.updated_at,
    };
    Ok(User::from_persisted(data))
}

fn is_email_unique_violation(info: &dyn DatabaseErrorInformation) -> bool {
    info.constraint_name()
        .is_some_and(|name| name == "idx_users_email_unique")
}

/// `PostgreSQL`-backed invite repository.
#[derive(Debug, Clone)]
pub struct PostgresInviteRepository {
    pool: IdentityPgPool,
}

impl PostgresInviteRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: IdentityPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> InviteRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> InviteRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(InviteRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(InviteRepositoryError::persistence)?
    }
}

#[async_trait]
impl InviteRepository for PostgresInviteRepository {
    async fn store(&self, invite: &Invite) -> InviteRepositoryResult<()> {
        let invite_id = invite.id();
        let new_row = invite_to_new_row(invite);

        self.run_blocking(move |connection| {
            diesel::insert_into(invites::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        InviteRepositoryError::DuplicateInvite(invite_id)
                    }
                    _ => InviteRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, invite: &Invite) -> InviteRepositoryResult<()> {
        let invite_id = invite.id();
        let consumed_at = invite.consumed_at();

        self.run_blocking(move |connection| {
            let affected =
                diesel::update(invites::table.filter(invites::id.eq(invite_id.into_inner())))
                    .set(invites::consumed_at.eq(consumed_at))
                    .execute(connection)
                    .map_err(InviteRepositoryError::persistence)?;
            if affected == 0 {
                return Err(InviteRepositoryError::NotFound(invite_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_digest(&self, digest: &str) -> InviteRepositoryResult<Option<Invite>> {
        let lookup = digest.to_owned();
        self.run_blocking(move |connection| {
            let row = invites::table
                .filter(invites::token_digest.eq(&lookup))
                .select(InviteRow::as_select())
                .first::<InviteRow>(connection)
                .optional()
                .map_err(InviteRepositoryError::persistence)?;
            Ok(row.map(row_to_invite))
        })
        .await
    }

    async fn remove_pending_for_user(&self, user_id: UserId) -> InviteRepositoryResult<()> {
        self.run_blocking(move |connection| {
            diesel::delete(
                invites::table
                    .filter(invites::user_id.eq(user_id.into_inner()))
                    .filter(invites::consumed_at.is_null()),
            )
            .execute(connection)
            .map_err(InviteRepositoryError::persistence)?;
            Ok(())
        })
        .await
    }
}

fn invite_to_new_row(invite: &Invite) -> NewInviteRow {
    NewInviteRow {
        id: invite.id().into_inner(),
        user_id: invite.user_id().into_inner(),
        token_digest: invite.token_digest().to_owned(),
        expires_at: invite.expires_at(),
        consumed_at: invite.consumed_at(),
        created_at: invite.created_at(),
    }
}

fn row_to_invite(row: InviteRow) -> Invite {
    Invite::from_persisted(PersistedInviteData {
        id: InviteId::from_uuid(row.id),
        user_id: UserId::from_uuid(row.user_id),
        token_digest: row.token_digest,
        expires_at: row.expires_at,
        consumed_at: row.consumed_at,
        created_at: row.created_at,
    })
}
