//! Port contracts for hosting persistence.

mod repository;

pub use repository::{
    DomainRecordRepository, DomainRecordRepositoryError, DomainRecordRepositoryResult,
};
