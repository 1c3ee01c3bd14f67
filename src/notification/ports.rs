//! Outbound messaging port.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Publishes opaque payloads to named queues.
///
/// Implementations ensure the queue exists on every publish, so callers never
/// declare queues themselves.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePublisher: Send + Sync {
    /// Publishes `payload` to `queue`.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError`] when the transport cannot deliver the message.
    async fn publish(&self, queue: &str, payload: &[u8]) -> Result<(), PublishError>;
}

/// Errors returned by message publishers.
#[derive(Debug, Clone, Error)]
pub enum PublishError {
    /// The broker connection could not be established.
    #[error("broker connection failed: {0}")]
    Connection(Arc<dyn std::error::Error + Send + Sync>),

    /// Channel setup, queue declaration or delivery failed.
    #[error("message transport failed: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),

    /// The publisher refuses all messages.
    #[error("publisher unavailable: {0}")]
    Unavailable(String),
}

impl PublishError {
    /// Wraps a connection error.
    pub fn connection(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Connection(Arc::new(err))
    }

    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
