//! Shared world state for task access BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{TimeZone, Utc};
use mockable::DefaultClock;
use rstest::fixture;
use workday::auth::domain::Actor;
use workday::confidentiality::AesGcmCodec;
use workday::notification::{
    adapters::memory::InMemoryPublisher,
    services::{EventNotifier, NotificationMode},
};
use workday::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{TaskId, TaskView},
    services::{TaskAccessError, TaskAccessService, TaskRequest},
};
use workday::user::domain::UserId;

/// Service type used by the BDD world.
pub type TestTaskService =
    TaskAccessService<InMemoryTaskRepository, AesGcmCodec, InMemoryPublisher, DefaultClock>;

const KEY: [u8; 32] = [7; 32];

/// Scenario world for task access behaviour tests.
pub struct TaskAccessWorld {
    pub service: TestTaskService,
    pub actors: HashMap<String, Actor>,
    pub next_user_id: i64,
    pub current_task: Option<TaskId>,
    pub last_read: Option<Result<TaskView, TaskAccessError>>,
    pub last_failure: Option<TaskAccessError>,
    pub last_listing: Option<Vec<TaskView>>,
}

impl TaskAccessWorld {
    /// Creates a world with no actors or tasks.
    #[must_use]
    #[expect(
        clippy::expect_used,
        reason = "The key is a fixed 32-byte constant, so codec construction cannot fail"
    )]
    pub fn new() -> Self {
        let service = TaskAccessService::new(
            Arc::new(InMemoryTaskRepository::new()),
            Arc::new(AesGcmCodec::from_key_bytes(&KEY).expect("32-byte key is valid")),
            EventNotifier::new(Arc::new(InMemoryPublisher::new()), NotificationMode::Inline),
            Arc::new(DefaultClock),
        );

        Self {
            service,
            actors: HashMap::new(),
            next_user_id: 1,
            current_task: None,
            last_read: None,
            last_failure: None,
            last_listing: None,
        }
    }

    /// Adds a named actor built by `make`.
    pub fn add_actor(&mut self, name: String, make: impl FnOnce(UserId) -> Actor) {
        let id = UserId::new(self.next_user_id);
        self.next_user_id += 1;
        self.actors.insert(name, make(id));
    }

    /// Looks up a named actor.
    ///
    /// # Errors
    ///
    /// Returns an error if no actor has that name.
    pub fn actor(&self, name: &str) -> Result<Actor, eyre::Report> {
        self.actors
            .get(name)
            .cloned()
            .ok_or_else(|| eyre::eyre!("unknown actor {name} in scenario world"))
    }

    /// Returns the task the scenario is about.
    ///
    /// # Errors
    ///
    /// Returns an error if no task was recorded.
    pub fn task(&self) -> Result<TaskId, eyre::Report> {
        self.current_task
            .ok_or_else(|| eyre::eyre!("missing recorded task in scenario world"))
    }

    /// Builds a request with a fixed performed-at date.
    #[must_use]
    pub fn request(title: &str, summary: &str) -> TaskRequest {
        let performed_at = Utc
            .with_ymd_and_hms(2025, 3, 10, 14, 30, 0)
            .single()
            .unwrap_or_default();
        TaskRequest::new(title, summary, performed_at)
    }
}

impl Default for TaskAccessWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskAccessWorld {
    TaskAccessWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
