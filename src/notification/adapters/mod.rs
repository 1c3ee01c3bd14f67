//! Message publisher implementations.

#[cfg(feature = "amqp")]
pub mod amqp;
pub mod memory;
