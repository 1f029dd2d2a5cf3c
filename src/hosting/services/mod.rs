//! Orchestration services for hosting records.

mod registry;

pub use registry::{
    CreateDomainRecordRequest, HostingService, HostingServiceError, HostingServiceResult,
};
