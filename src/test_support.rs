//! Shared fixtures for unit tests.

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;
use std::sync::Mutex;

/// Clock pinned to an instant that tests advance by hand.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn epoch() -> Self {
        Self::at(
            Utc.with_ymd_and_hms(2025, 3, 14, 9, 0, 0)
                .single()
                .expect("valid fixed instant"),
        )
    }

    pub fn advance(&self, delta: TimeDelta) {
        let mut now = self.now.lock().expect("clock lock");
        *now += delta;
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.lock().expect("clock lock")
    }
}
