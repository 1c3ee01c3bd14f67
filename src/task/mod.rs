//! Task records and the access layer around them.
//!
//! Every task operation passes through [`services::TaskAccessService`], which
//! applies the role policy, seals and opens the summary, and announces
//! creations. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
