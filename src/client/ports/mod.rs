//! Port contracts for client and project persistence.

mod dependents;
mod repository;

pub use dependents::ClientDependencyCheck;
pub use repository::{
    ClientRepository, ClientRepositoryError, ClientRepositoryResult, ProjectRepository,
    ProjectRepositoryError, ProjectRepositoryResult,
};
