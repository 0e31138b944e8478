//! Test utilities for the roster crate.
//!
//! Compiled for unit tests and, through the `test-support` feature, for the
//! integration tests under `tests/`.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeDelta, Utc};
use mockable::Clock;

use crate::domain::{ModelsService, PeopleService};
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::memory::{InMemoryModelRepository, InMemoryPersonRepository};

/// Clock whose current instant tests can move.
#[derive(Debug)]
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    /// Clock frozen at `now`.
    #[must_use]
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    /// Clock frozen at noon UTC on `date`.
    #[must_use]
    pub fn at_date(date: NaiveDate) -> Self {
        Self::new(date.and_time(NaiveTime::MIN).and_utc() + TimeDelta::hours(12))
    }

    /// Move the clock forward by whole days.
    pub fn advance_days(&self, days: i64) {
        *self.lock_clock() += TimeDelta::days(days);
    }

    /// Current UTC date.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.lock_clock().date_naive()
    }

    fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// HTTP state wired to empty in-memory stores and `clock`.
#[must_use]
pub fn in_memory_state(clock: Arc<dyn Clock>) -> HttpState {
    let people = Arc::new(PeopleService::new(
        Arc::new(InMemoryPersonRepository::new()),
        Arc::clone(&clock),
    ));
    let models = Arc::new(ModelsService::new(
        Arc::new(InMemoryModelRepository::new()),
        clock,
    ));
    HttpState::new(HttpStatePorts {
        people: people.clone(),
        people_commands: people,
        models: models.clone(),
        models_commands: models,
    })
}
