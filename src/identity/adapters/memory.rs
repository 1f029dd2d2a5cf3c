//! In-memory repositories for identity tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::identity::domain::{EmailAddress, Invite, InviteId, Role, User, UserId};
use crate::identity::ports::{
    InviteRepository, InviteRepositoryError, InviteRepositoryResult, UserRepository,
    UserRepositoryError, UserRepositoryResult,
};

/// Thread-safe in-memory user repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    state: Arc<RwLock<InMemoryUserState>>,
}

#[derive(Debug, Default)]
struct InMemoryUserState {
    users: HashMap<UserId, User>,
    email_index: HashMap<EmailAddress, UserId>,
}

impl InMemoryUserRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn store(&self, user: &User) -> UserRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            UserRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.users.contains_key(&user.id()) {
            return Err(UserRepositoryError::DuplicateUser(user.id()));
        }
        if state.email_index.contains_key(user.email()) {
            return Err(UserRepositoryError::DuplicateEmail(user.email().clone()));
        }
        state.email_index.insert(user.email().clone(), user.id());
        state.users.insert(user.id(), user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> UserRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            UserRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if !state.users.contains_key(&user.id()) {
            return Err(UserRepositoryError::NotFound(user.id()));
        }
        state.users.insert(user.id(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>> {
        let state = self.state.read().map_err(|err| {
            UserRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> UserRepositoryResult<Option<User>> {
        let state = self.state.read().map_err(|err| {
            UserRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let user = state
            .email_index
            .get(email)
            .and_then(|user_id| state.users.get(user_id))
            .cloned();
        Ok(user)
    }

    async fn list_by_role(&self, role: Role) -> UserRepositoryResult<Vec<User>> {
        let state = self.state.read().map_err(|err| {
            UserRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut users: Vec<User> = state
            .users
            .values()
            .filter(|user| user.role() == role)
            .cloned()
            .collect();
        users.sort_by_key(User::id);
        Ok(users)
    }
}

/// Thread-safe in-memory invite repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryInviteRepository {
    state: Arc<RwLock<HashMap<InviteId, Invite>>>,
}

impl InMemoryInviteRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InviteRepository for InMemoryInviteRepository {
    async fn store(&self, invite: &Invite) -> InviteRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            InviteRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.contains_key(&invite.id()) {
            return Err(InviteRepositoryError::DuplicateInvite(invite.id()));
        }
        state.insert(invite.id(), invite.clone());
        Ok(())
    }

    async fn update(&self, invite: &Invite) -> InviteRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            InviteRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if !state.contains_key(&invite.id()) {
            return Err(InviteRepositoryError::NotFound(invite.id()));
        }
        state.insert(invite.id(), invite.clone());
        Ok(())
    }

    async fn find_by_digest(&self, digest: &str) -> InviteRepositoryResult<Option<Invite>> {
        let state = self.state.read().map_err(|err| {
            InviteRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state
            .values()
            .find(|invite| invite.token_digest() == digest)
            .cloned())
    }

    async fn remove_pending_for_user(&self, user_id: UserId) -> InviteRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            InviteRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        state.retain(|_, invite| invite.user_id() != user_id || invite.consumed_at().is_some());
        Ok(())
    }
}
