//! Best-effort event notification.

use crate::notification::{domain::TaskEvent, ports::MessagePublisher};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

/// How [`EventNotifier`] dispatches a publish.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NotificationMode {
    /// Await the publish on the caller's task, swallowing failures.
    Inline,
    /// Spawn the publish onto the runtime; the caller never waits.
    #[default]
    Detached,
}

impl NotificationMode {
    /// Returns the configuration spelling of the mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inline => "inline",
            Self::Detached => "detached",
        }
    }
}

impl fmt::Display for NotificationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The value is not a known notification mode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown notification mode: {0}")]
pub struct ParseNotificationModeError(String);

impl FromStr for NotificationMode {
    type Err = ParseNotificationModeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "inline" => Ok(Self::Inline),
            "detached" => Ok(Self::Detached),
            other => Err(ParseNotificationModeError(other.to_owned())),
        }
    }
}

/// Publishes domain events without ever failing the operation that raised
/// them.
///
/// Failures are logged at `warn` and dropped. There are no retries.
pub struct EventNotifier<P>
where
    P: MessagePublisher + 'static,
{
    publisher: Arc<P>,
    mode: NotificationMode,
}

impl<P> Clone for EventNotifier<P>
where
    P: MessagePublisher + 'static,
{
    fn clone(&self) -> Self {
        Self {
            publisher: Arc::clone(&self.publisher),
            mode: self.mode,
        }
    }
}

impl<P> EventNotifier<P>
where
    P: MessagePublisher + 'static,
{
    /// Creates a notifier.
    #[must_use]
    pub const fn new(publisher: Arc<P>, mode: NotificationMode) -> Self {
        Self { publisher, mode }
    }

    /// Returns the dispatch mode.
    #[must_use]
    pub const fn mode(&self) -> NotificationMode {
        self.mode
    }

    /// Publishes `event` according to the configured mode.
    pub async fn notify(&self, event: &TaskEvent) {
        let payload = match event.to_payload() {
            Ok(payload) => payload,
            Err(err) => {
                tracing::warn!(event = event.name(), error = %err, "failed to encode event");
                return;
            }
        };
        let queue = event.queue();
        let name = event.name();

        match self.mode {
            NotificationMode::Inline => {
                deliver(self.publisher.as_ref(), queue, name, &payload).await;
            }
            NotificationMode::Detached => {
                let publisher = Arc::clone(&self.publisher);
                tokio::spawn(async move {
                    deliver(publisher.as_ref(), queue, name, &payload).await;
                });
            }
        }
    }
}

async fn deliver<P>(publisher: &P, queue: &str, name: &str, payload: &[u8])
where
    P: MessagePublisher + ?Sized,
{
    match publisher.publish(queue, payload).await {
        Ok(()) => tracing::debug!(queue, event = name, "event published"),
        Err(err) => tracing::warn!(queue, event = name, error = %err, "failed to publish event"),
    }
}
