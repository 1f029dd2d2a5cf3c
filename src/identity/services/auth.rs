//! Service layer for account registration, invites, and login.

use crate::client::domain::ClientId;
use crate::identity::{
    domain::{
        Actor, EmailAddress, IdentityDomainError, Invite, InviteToken, PasswordHash, Role, User,
        UserId,
    },
    ports::{
        InviteRepository, InviteRepositoryError, UserRepository, UserRepositoryError,
    },
};
use chrono::Duration;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for registering a portal user.
#[derive(Debug, Clone)]
pub struct RegisterUserRequest {
    email: String,
    display_name: String,
    role: Role,
    client_id: Option<ClientId>,
    password: Option<String>,
}

impl RegisterUserRequest {
    /// Creates a request with required account fields.
    #[must_use]
    pub fn new(email: impl Into<String>, display_name: impl Into<String>, role: Role) -> Self {
        Self {
            email: email.into(),
            display_name: display_name.into(),
            role,
            client_id: None,
            password: None,
        }
    }

    /// Links the account to a client record (required for client-role users).
    #[must_use]
    pub const fn with_client(mut self, client_id: ClientId) -> Self {
        self.client_id = Some(client_id);
        self
    }

    /// Sets an initial password, activating the account immediately.
    #[must_use]
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }
}

/// An invite issued for a user, carrying the one-time plaintext token.
#[derive(Debug, Clone)]
pub struct IssuedInvite {
    /// The stored invite aggregate.
    pub invite: Invite,
    /// The plaintext token; shown once, never persisted.
    pub token: InviteToken,
}

/// Service-level errors for identity operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] IdentityDomainError),
    /// User repository operation failed.
    #[error(transparent)]
    Users(#[from] UserRepositoryError),
    /// Invite repository operation failed.
    #[error(transparent)]
    Invites(#[from] InviteRepositoryError),
    /// The acting user lacks permission for this operation.
    #[error("operation requires an admin actor")]
    Forbidden,
    /// Email or password did not match an active account.
    #[error("invalid credentials")]
    InvalidCredentials,
    /// No invite matches the presented token.
    #[error("unknown invite token")]
    UnknownInvite,
    /// The referenced user does not exist.
    #[error("unknown user: {0}")]
    UnknownUser(UserId),
}

/// Result type for identity service operations.
pub type AuthResult<T> = Result<T, AuthError>;

/// Account registration, invite, and login orchestration.
#[derive(Clone)]
pub struct AuthService<U, I, C>
where
    U: UserRepository,
    I: InviteRepository,
    C: Clock + Send + Sync,
{
    users: Arc<U>,
    invites: Arc<I>,
    clock: Arc<C>,
    invite_ttl: Duration,
}

impl<U, I, C> AuthService<U, I, C>
where
    U: UserRepository,
    I: InviteRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new identity service.
    #[must_use]
    pub const fn new(users: Arc<U>, invites: Arc<I>, clock: Arc<C>, invite_ttl: Duration) -> Self {
        Self {
            users,
            invites,
            clock,
            invite_ttl,
        }
    }

    /// Registers a user on behalf of an admin.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Forbidden`] for non-admin actors, domain errors
    /// for invalid fields, and repository errors for duplicate emails.
    pub async fn register_user(
        &self,
        actor: &Actor,
        request: RegisterUserRequest,
    ) -> AuthResult<User> {
        if !actor.is_admin() {
            return Err(AuthError::Forbidden);
        }
        self.insert_user(request).await
    }

    /// Registers the first admin account without an acting user.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Forbidden`] once any admin account exists.
    pub async fn bootstrap_admin(
        &self,
        email: impl Into<String> + Send,
        display_name: impl Into<String> + Send,
        password: impl Into<String> + Send,
    ) -> AuthResult<User> {
        let existing = self.users.list_by_role(Role::Admin).await?;
        if !existing.is_empty() {
            return Err(AuthError::Forbidden);
        }
        let request = RegisterUserRequest::new(email, display_name, Role::Admin)
            .with_password(password);
        self.insert_user(request).await
    }

    /// Issues a single-use invite for a not-yet-activated user, invalidating
    /// any earlier pending invites for the same account.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Forbidden`] for non-admin actors,
    /// [`AuthError::UnknownUser`] when the user does not exist, and
    /// [`IdentityDomainError::AlreadyActivated`] when the account already
    /// holds credentials.
    pub async fn issue_invite(&self, actor: &Actor, user_id: UserId) -> AuthResult<IssuedInvite> {
        if !actor.is_admin() {
            return Err(AuthError::Forbidden);
        }
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UnknownUser(user_id))?;
        if user.is_active() {
            return Err(AuthError::Domain(IdentityDomainError::AlreadyActivated(
                user_id,
            )));
        }

        self.invites.remove_pending_for_user(user_id).await?;
        let (invite, token) = Invite::issue(user_id, self.invite_ttl, &*self.clock);
        self.invites.store(&invite).await?;
        Ok(IssuedInvite { invite, token })
    }

    /// Completes onboarding: validates the invite token, sets the account
    /// password, and consumes the invite.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::UnknownInvite`] for an unrecognized token and
    /// domain errors for expired/consumed invites or weak passwords.
    pub async fn accept_invite(&self, token: &str, password: &str) -> AuthResult<User> {
        let presented = InviteToken::from_presented(token);
        let mut invite = self
            .invites
            .find_by_digest(&presented.digest())
            .await?
            .ok_or(AuthError::UnknownInvite)?;

        invite.consume(&*self.clock)?;
        let mut user = self
            .users
            .find_by_id(invite.user_id())
            .await?
            .ok_or(AuthError::UnknownUser(invite.user_id()))?;

        let hash = PasswordHash::derive(password)?;
        user.activate(hash, &*self.clock)?;

        self.invites.update(&invite).await?;
        self.users.update(&user).await?;
        Ok(user)
    }

    /// Verifies email/password credentials.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] when the email is unknown,
    /// the account is inactive, or the password does not match. The error is
    /// uniform across those cases so callers cannot probe for accounts.
    pub async fn login(&self, email: &str, password: &str) -> AuthResult<User> {
        let address = EmailAddress::new(email).map_err(|_| AuthError::InvalidCredentials)?;
        let user = self
            .users
            .find_by_email(&address)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;
        if !user.verify_password(password) {
            return Err(AuthError::InvalidCredentials);
        }
        Ok(user)
    }

    /// Returns a user by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::UnknownUser`] when absent.
    pub async fn get_user(&self, actor: &Actor, user_id: UserId) -> AuthResult<User> {
        if !actor.is_admin() && actor.user_id() != user_id {
            return Err(AuthError::Forbidden);
        }
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UnknownUser(user_id))
    }

    /// Lists users holding the given role (admin only).
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Forbidden`] for non-admin actors.
    pub async fn list_by_role(&self, actor: &Actor, role: Role) -> AuthResult<Vec<User>> {
        if !actor.is_admin() {
            return Err(AuthError::Forbidden);
        }
        Ok(self.users.list_by_role(role).await?)
    }

    async fn insert_user(&self, request: RegisterUserRequest) -> AuthResult<User> {
        let email = EmailAddress::new(request.email)?;
        let password_hash = request
            .password
            .as_deref()
            .map(PasswordHash::derive)
            .transpose()?;
        let user = User::new(
            email,
            request.display_name,
            request.role,
            request.client_id,
            password_hash,
            &*self.clock,
        )?;
        self.users.store(&user).await?;
        Ok(user)
    }
}
