//! Timed work owned by the controller: the quiz auto-advance and the welcome
//! elapsed-time tick. Both are aborted when their handle is dropped.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use heartline_core::clock::Clock;
use serde::Serialize;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

/// Pause between the last quiz answer and the move into the game, so the
/// final selection is visible before the scene changes.
pub const QUIZ_ADVANCE_DELAY: Duration = Duration::from_millis(600);

/// Refresh period of the welcome elapsed-time display.
pub const ELAPSED_TICK: Duration = Duration::from_secs(1);

/// Messages delivered from timers back to the controller's event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal {
    /// The quiz auto-advance delay identified by `ticket` has run out.
    QuizAdvanceDue {
        /// Identifies the scheduling that produced this signal.
        ticket: u64,
    },
    /// A fresh elapsed-time reading for the welcome scene.
    Tick(Elapsed),
}

/// Whole days, hours, minutes and seconds since a start instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Elapsed {
    /// Whole days.
    pub days: i64,
    /// Hours within the day.
    pub hours: i64,
    /// Minutes within the hour.
    pub minutes: i64,
    /// Seconds within the minute.
    pub seconds: i64,
}

impl Elapsed {
    /// Time from `start` to `now`, clamped at zero when `now` is earlier.
    #[must_use]
    pub fn between(start: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let total = (now - start).num_seconds().max(0);
        Self {
            days: total / 86_400,
            hours: (total % 86_400) / 3_600,
            minutes: (total % 3_600) / 60,
            seconds: total % 60,
        }
    }
}

/// A one-shot delayed signal. Dropping it cancels the signal if it has not
/// fired yet.
#[derive(Debug)]
pub(crate) struct DelayedSignal {
    ticket: u64,
    handle: JoinHandle<()>,
}

impl DelayedSignal {
    /// Schedules `Signal::QuizAdvanceDue { ticket }` after `delay`.
    pub(crate) fn quiz_advance(
        ticket: u64,
        delay: Duration,
        signals: UnboundedSender<Signal>,
    ) -> Self {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // The receiver is gone only when the controller is; nothing to do.
            let _ = signals.send(Signal::QuizAdvanceDue { ticket });
        });
        Self { ticket, handle }
    }

    pub(crate) fn ticket(&self) -> u64 {
        self.ticket
    }
}

impl Drop for DelayedSignal {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Repeating elapsed-time tick. Runs until dropped.
#[derive(Debug)]
pub(crate) struct ElapsedTicker {
    handle: JoinHandle<()>,
}

impl ElapsedTicker {
    /// Starts ticking immediately and then every `period`.
    pub(crate) fn start(
        since: DateTime<Utc>,
        clock: Arc<dyn Clock>,
        period: Duration,
        signals: UnboundedSender<Signal>,
    ) -> Self {
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            loop {
                interval.tick().await;
                let elapsed = Elapsed::between(since, clock.now());
                if signals.send(Signal::Tick(elapsed)).is_err() {
                    break;
                }
            }
        });
        Self { handle }
    }
}

impl Drop for ElapsedTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
