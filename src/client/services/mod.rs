//! Orchestration services for client and project management.

mod directory;

pub use directory::{
    ClientDirectoryError, ClientDirectoryResult, ClientDirectoryService, CreateClientRequest,
    CreateProjectRequest,
};
