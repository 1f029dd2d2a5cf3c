//! Port contracts for identity persistence.

mod repository;

pub use repository::{
    InviteRepository, InviteRepositoryError, InviteRepositoryResult, UserRepository,
    UserRepositoryError, UserRepositoryResult,
};
