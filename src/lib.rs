//! Atelier: agency operations portal.
//!
//! This crate provides the backend for an agency operations portal: admins
//! manage clients, workers, tasks, invoices, offers, domain/hosting records,
//! and timesheets, while clients and workers get role-scoped views of their
//! own resources.
//!
//! # Architecture
//!
//! Atelier follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, REST, etc.)
//!
//! # Modules
//!
//! - [`identity`]: Users, roles, credentials, invites, and access tokens
//! - [`client`]: Client company records and projects
//! - [`task`]: Task lifecycle with dual-approval completion
//! - [`billing`]: Invoices and offers
//! - [`hosting`]: Domain/hosting/SSL registrar records and expiry alerts
//! - [`timesheet`]: Per-worker time tracking against tasks
//! - [`http`]: REST adapter exposing the services
//! - [`config`]: Environment-driven runtime configuration

pub mod billing;
pub mod client;
pub mod config;
pub mod hosting;
pub mod http;
pub mod identity;
pub mod task;
pub mod timesheet;
