//! Domain types for client records and projects.

mod client;
mod error;
mod ids;
mod project;

pub use client::{Client, ClientProfile, PersistedClientData};
pub use error::ClientDomainError;
pub use ids::{ClientId, ProjectId};
pub use project::{PersistedProjectData, Project};
