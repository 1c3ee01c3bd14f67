//! Workday: multi-tenant task tracking access layer.
//!
//! Users record maintenance tasks whose free-text summaries are encrypted at
//! rest. Every request is authenticated with a bearer token and checked
//! against a role policy before a task is read, changed or removed.
//!
//! # Architecture
//!
//! Each bounded context follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, broker, crypto)
//! - **Services**: Orchestration of domain rules over ports
//!
//! # Modules
//!
//! - [`auth`]: Credential hashing, session tokens and the access policy
//! - [`confidentiality`]: Authenticated encryption of task summaries
//! - [`notification`]: Task events published to a message broker
//! - [`task`]: Owned tasks and their access service
//! - [`user`]: Accounts, roles and registration
//! - [`container`]: Wiring of configuration and adapters into services

pub mod auth;
pub mod config;
pub mod confidentiality;
pub mod container;
pub mod error;
pub mod notification;
pub mod task;
pub mod telemetry;
pub mod user;

#[cfg(test)]
mod test_support;
