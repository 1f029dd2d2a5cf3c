//! Error types for hosting domain validation.

use thiserror::Error;

/// Errors returned while constructing hosting domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HostingDomainError {
    /// The domain name does not follow the label format.
    #[error("invalid domain name: {0}")]
    InvalidDomainName(String),
}
