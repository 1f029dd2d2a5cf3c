//! Repository ports for user and invite persistence.

use crate::identity::domain::{EmailAddress, Invite, InviteId, Role, User, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for user repository operations.
pub type UserRepositoryResult<T> = Result<T, UserRepositoryError>;

/// User persistence contract.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Stores a new user.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::DuplicateUser`] when the identifier
    /// already exists or [`UserRepositoryError::DuplicateEmail`] when the
    /// email address is taken.
    async fn store(&self, user: &User) -> UserRepositoryResult<()>;

    /// Persists changes to an existing user (activation, timestamps).
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::NotFound`] when the user does not
    /// exist.
    async fn update(&self, user: &User) -> UserRepositoryResult<()>;

    /// Finds a user by identifier. Returns `None` when absent.
    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>>;

    /// Finds a user by normalized email address. Returns `None` when absent.
    async fn find_by_email(&self, email: &EmailAddress) -> UserRepositoryResult<Option<User>>;

    /// Returns all users holding the given role.
    async fn list_by_role(&self, role: Role) -> UserRepositoryResult<Vec<User>>;
}

/// Errors returned by user repository implementations.
#[derive(Debug, Clone, Error)]
pub enum UserRepositoryError {
    /// A user with the same identifier already exists.
    #[error("duplicate user identifier: {0}")]
    DuplicateUser(UserId),

    /// A user with the same email address already exists.
    #[error("duplicate email address: {0}")]
    DuplicateEmail(EmailAddress),

    /// The user was not found.
    #[error("user not found: {0}")]
    NotFound(UserId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl UserRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

/// Result type for invite repository operations.
pub type InviteRepositoryResult<T> = Result<T, InviteRepositoryError>;

/// Invite persistence contract.
#[async_trait]
pub trait InviteRepository: Send + Sync {
    /// Stores a new invite.
    ///
    /// # Errors
    ///
    /// Returns [`InviteRepositoryError::DuplicateInvite`] when the identifier
    /// already exists.
    async fn store(&self, invite: &Invite) -> InviteRepositoryResult<()>;

    /// Persists changes to an existing invite (consumption).
    ///
    /// # Errors
    ///
    /// Returns [`InviteRepositoryError::NotFound`] when the invite does not
    /// exist.
    async fn update(&self, invite: &Invite) -> InviteRepositoryResult<()>;

    /// Finds an invite by token digest. Returns `None` when absent.
    async fn find_by_digest(&self, digest: &str) -> InviteRepositoryResult<Option<Invite>>;

    /// Removes all unconsumed invites for a user.
    ///
    /// Issued before storing a replacement invite so only the latest token
    /// can unlock the account.
    async fn remove_pending_for_user(&self, user_id: UserId) -> InviteRepositoryResult<()>;
}

/// Errors returned by invite repository implementations.
#[derive(Debug, Clone, Error)]
pub enum InviteRepositoryError {
    /// An invite with the same identifier already exists.
    #[error("duplicate invite identifier: {0}")]
    DuplicateInvite(InviteId),

    /// The invite was not found.
    #[error("invite not found: {0}")]
    NotFound(InviteId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl InviteRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
