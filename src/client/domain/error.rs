//! Error types for client domain validation.

use thiserror::Error;

/// Errors returned while constructing client domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClientDomainError {
    /// The company name is empty after trimming.
    #[error("company name must not be empty")]
    EmptyCompanyName,

    /// The project name is empty after trimming.
    #[error("project name must not be empty")]
    EmptyProjectName,

    /// The contact email failed format validation.
    #[error("invalid contact email: {0}")]
    InvalidContactEmail(String),
}
