//! Diesel row models for identity persistence.

use super::schema::{invites, users};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for user records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    /// Internal user identifier.
    pub id: uuid::Uuid,
    /// Normalized email address.
    pub email: String,
    /// Display name.
    pub display_name: String,
    /// Access role.
    pub role: String,
    /// Client linkage for client-role users.
    pub client_id: Option<uuid::Uuid>,
    /// Salted password digest, absent until activation.
    pub password_hash: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow {
    /// Internal user identifier.
    pub id: uuid::Uuid,
    /// Normalized email address.
    pub email: String,
    /// Display name.
    pub display_name: String,
    /// Access role.
    pub role: String,
    /// Client linkage for client-role users.
    pub client_id: Option<uuid::Uuid>,
    /// Salted password digest, absent until activation.
    pub password_hash: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query result row for invite records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = invites)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct InviteRow {
    /// Internal invite identifier.
    pub id: uuid::Uuid,
    /// Invited user.
    pub user_id: uuid::Uuid,
    /// Token digest.
    pub token_digest: String,
    /// Expiry timestamp.
    pub expires_at: DateTime<Utc>,
    /// Consumption timestamp.
    pub consumed_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for invite records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = invites)]
pub struct NewInviteRow {
    /// Internal invite identifier.
    pub id: uuid::Uuid,
    /// Invited user.
    pub user_id: uuid::Uuid,
    /// Token digest.
    pub token_digest: String,
    /// Expiry timestamp.
    pub expires_at: DateTime<Utc>,
    /// Consumption timestamp.
    pub consumed_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
