//! Role enumeration and the authenticated actor passed to every service.

use super::error::ParseRoleError;
use super::ids::UserId;
use crate::client::domain::ClientId;
use serde::{Deserialize, Serialize};

/// Access role gating visibility and mutation rights on every resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full access to every resource.
    Admin,
    /// Sees assigned tasks, own payable invoices, and own timesheets.
    Worker,
    /// Sees resources owned by the linked client record.
    Client,
}

impl Role {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Worker => "worker",
            Self::Client => "client",
        }
    }
}

impl TryFrom<&str> for Role {
    type Error = ParseRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "admin" => Ok(Self::Admin),
            "worker" => Ok(Self::Worker),
            "client" => Ok(Self::Client),
            _ => Err(ParseRoleError(value.to_owned())),
        }
    }
}

/// Authenticated caller identity threaded through every service operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    user_id: UserId,
    role: Role,
    client_id: Option<ClientId>,
}

impl Actor {
    /// Creates an actor from verified token claims.
    #[must_use]
    pub const fn new(user_id: UserId, role: Role, client_id: Option<ClientId>) -> Self {
        Self {
            user_id,
            role,
            client_id,
        }
    }

    /// Returns the acting user identifier.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the acting role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns the client record linked to a client-role actor.
    #[must_use]
    pub const fn client_id(&self) -> Option<ClientId> {
        self.client_id
    }

    /// Returns `true` for admin actors.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }

    /// Returns `true` for worker actors.
    #[must_use]
    pub const fn is_worker(&self) -> bool {
        matches!(self.role, Role::Worker)
    }

    /// Returns `true` for client actors.
    #[must_use]
    pub const fn is_client(&self) -> bool {
        matches!(self.role, Role::Client)
    }
}
