//! Read-only views of a journey session.

use serde::Serialize;
use uuid::Uuid;

use crate::application::timers::Elapsed;
use crate::domain::aggregates::{JourneySession, PROMPT_COUNT, TOTAL_HEARTS};
use crate::domain::scene::{Answers, Decision, Scene};

/// Snapshot of everything a renderer needs to draw the active scene.
#[derive(Debug, Clone, Serialize)]
pub struct JourneyView {
    /// The session identifier.
    pub session_id: Uuid,
    /// Active scene.
    pub scene: Scene,
    /// 1-based step of the active scene.
    pub step: u8,
    /// Number of steps.
    pub total_steps: u8,
    /// Distinct prompts answered.
    pub answered: u8,
    /// Number of prompts.
    pub total_prompts: u8,
    /// Answers so far.
    pub answers: Answers,
    /// Hearts collected in the current game.
    pub hearts_collected: u8,
    /// Hearts needed to unlock the decision.
    pub total_hearts: u8,
    /// Whether the game's continue action is available.
    pub continue_available: bool,
    /// The decision, once made.
    pub decision: Option<Decision>,
    /// Whether the closing presentation was dismissed.
    pub outcome_dismissed: bool,
    /// Latest elapsed-time reading; present only on the welcome scene.
    pub elapsed: Option<Elapsed>,
    /// Whether a quiz auto-advance is scheduled.
    pub auto_advance_pending: bool,
    /// Whether the welcome tick is running.
    pub ticker_running: bool,
}

impl JourneyView {
    /// "Step N of 5".
    #[must_use]
    pub fn progress_label(&self) -> String {
        format!("Step {} of {}", self.step, self.total_steps)
    }

    /// "collected / total", never showing more than the total.
    #[must_use]
    pub fn hearts_label(&self) -> String {
        format!(
            "{} / {}",
            self.hearts_collected.min(self.total_hearts),
            self.total_hearts
        )
    }
}

/// Timer state the controller contributes to a view.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct TimerStatus {
    pub elapsed: Option<Elapsed>,
    pub auto_advance_pending: bool,
    pub ticker_running: bool,
}

/// Builds a view of `session`.
pub(crate) fn view_of(session: &JourneySession, timers: TimerStatus) -> JourneyView {
    let scene = session.scene();
    JourneyView {
        session_id: session.id,
        scene,
        step: scene.index(),
        total_steps: Scene::COUNT,
        answered: session.answered(),
        total_prompts: PROMPT_COUNT,
        answers: session.answers().clone(),
        hearts_collected: session.hearts(),
        total_hearts: TOTAL_HEARTS,
        continue_available: session.continue_available(),
        decision: session.decision(),
        outcome_dismissed: session.outcome_dismissed(),
        elapsed: if scene == Scene::Welcome {
            timers.elapsed
        } else {
            None
        },
        auto_advance_pending: timers.auto_advance_pending,
        ticker_running: timers.ticker_running,
    }
}
