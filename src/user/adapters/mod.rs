//! Adapter implementations for user and role persistence.

pub mod memory;
pub mod postgres;
