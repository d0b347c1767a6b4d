//! Deterministic `Clock` for tests.

use chrono::{DateTime, Utc};
use heartline_core::clock::Clock;

/// A clock stuck at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
