//! Domain types for identity and access management.

mod credentials;
mod email;
mod error;
mod ids;
mod invite;
mod role;
mod user;

pub use credentials::PasswordHash;
pub use email::EmailAddress;
pub use error::{IdentityDomainError, ParseRoleError};
pub use ids::{InviteId, UserId};
pub use invite::{Invite, InviteToken, PersistedInviteData};
pub use role::{Actor, Role};
pub use user::{PersistedUserData, User};
