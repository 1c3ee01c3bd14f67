//! In-memory message publisher for tests and local flows.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::notification::ports::{MessagePublisher, PublishError};

/// A message captured by [`InMemoryPublisher`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedMessage {
    /// Destination queue.
    pub queue: String,
    /// Raw payload.
    pub payload: Vec<u8>,
}

impl PublishedMessage {
    /// Decodes the payload as JSON.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] when the payload is not valid JSON.
    pub fn json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_slice(&self.payload)
    }
}

/// Publisher recording every message, or rejecting every message when built
/// with [`InMemoryPublisher::unavailable`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryPublisher {
    published: Arc<Mutex<Vec<PublishedMessage>>>,
    attempts: Arc<Mutex<usize>>,
    reject: bool,
}

impl InMemoryPublisher {
    /// Creates a recording publisher.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a publisher whose every publish fails.
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            reject: true,
            ..Self::default()
        }
    }

    /// Returns the messages delivered so far.
    #[must_use]
    pub fn published(&self) -> Vec<PublishedMessage> {
        self.published
            .lock()
            .map(|messages| messages.clone())
            .unwrap_or_default()
    }

    /// Returns how many publishes were attempted, successful or not.
    #[must_use]
    pub fn attempts(&self) -> usize {
        self.attempts.lock().map(|count| *count).unwrap_or_default()
    }
}

#[async_trait]
impl MessagePublisher for InMemoryPublisher {
    async fn publish(&self, queue: &str, payload: &[u8]) -> Result<(), PublishError> {
        {
            let mut attempts = self
                .attempts
                .lock()
                .map_err(|err| PublishError::Unavailable(err.to_string()))?;
            *attempts += 1;
        }
        if self.reject {
            return Err(PublishError::Unavailable("broker unreachable".to_owned()));
        }
        let mut published = self
            .published
            .lock()
            .map_err(|err| PublishError::Unavailable(err.to_string()))?;
        published.push(PublishedMessage {
            queue: queue.to_owned(),
            payload: payload.to_vec(),
        });
        Ok(())
    }
}
