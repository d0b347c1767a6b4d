//! Domain events for the journey context.

use heartline_core::event::{DomainEvent, EventMetadata};

use super::scene::{AnswerKey, Answers, Decision, Scene};

/// What caused a scene change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Forward navigation requested by the user.
    Advance,
    /// Back navigation requested by the user.
    Retreat,
    /// Timed move from a completed quiz into the game.
    QuizCompleted,
    /// The unlocked continue action of the game.
    GameContinue,
}

/// Emitted when the active scene changes.
#[derive(Debug, Clone)]
pub struct SceneEntered {
    /// The scene that was left.
    pub from: Scene,
    /// The scene now active.
    pub to: Scene,
    /// What triggered the change.
    pub transition: Transition,
}

/// Emitted when a quiz prompt is answered.
#[derive(Debug, Clone)]
pub struct AnswerRecorded {
    /// The prompt answered.
    pub key: AnswerKey,
    /// The chosen option.
    pub value: String,
    /// Whether this is the first answer for this prompt.
    pub first_answer: bool,
}

/// Emitted once, when the third distinct prompt is answered.
#[derive(Debug, Clone)]
pub struct QuizCompleted {
    /// Number of distinct prompts answered.
    pub answered: u8,
}

/// Emitted for every heart collected in the game.
#[derive(Debug, Clone)]
pub struct HeartCollected {
    /// Hearts collected so far, including this one.
    pub collected: u8,
}

/// Emitted when the last heart is collected and continue unlocks.
#[derive(Debug, Clone)]
pub struct GameCompleted {
    /// Hearts collected.
    pub collected: u8,
}

/// Emitted when the closing decision is made.
#[derive(Debug, Clone)]
pub struct DecisionRecorded {
    /// The decision.
    pub decision: Decision,
    /// Snapshot of every answer at decision time, decision included.
    pub answers: Answers,
}

/// Emitted when the closing presentation is dismissed.
#[derive(Debug, Clone)]
pub struct OutcomeDismissed {
    /// The decision whose presentation was dismissed.
    pub decision: Decision,
}

/// Event type identifier for [`SceneEntered`].
pub const SCENE_ENTERED_EVENT_TYPE: &str = "journey.scene_entered";

/// Event type identifier for [`AnswerRecorded`].
pub const ANSWER_RECORDED_EVENT_TYPE: &str = "journey.answer_recorded";

/// Event type identifier for [`QuizCompleted`].
pub const QUIZ_COMPLETED_EVENT_TYPE: &str = "journey.quiz_completed";

/// Event type identifier for [`HeartCollected`].
pub const HEART_COLLECTED_EVENT_TYPE: &str = "journey.heart_collected";

/// Event type identifier for [`GameCompleted`].
pub const GAME_COMPLETED_EVENT_TYPE: &str = "journey.game_completed";

/// Event type identifier for [`DecisionRecorded`].
pub const DECISION_RECORDED_EVENT_TYPE: &str = "journey.decision_recorded";

/// Event type identifier for [`OutcomeDismissed`].
pub const OUTCOME_DISMISSED_EVENT_TYPE: &str = "journey.outcome_dismissed";

/// Event payload variants for the journey context.
#[derive(Debug, Clone)]
pub enum JourneyEventKind {
    /// The active scene changed.
    SceneEntered(SceneEntered),
    /// A quiz prompt was answered.
    AnswerRecorded(AnswerRecorded),
    /// All quiz prompts have been answered.
    QuizCompleted(QuizCompleted),
    /// A heart was collected.
    HeartCollected(HeartCollected),
    /// All hearts have been collected.
    GameCompleted(GameCompleted),
    /// The closing decision was made.
    DecisionRecorded(DecisionRecorded),
    /// The closing presentation was dismissed.
    OutcomeDismissed(OutcomeDismissed),
}

impl JourneyEventKind {
    /// Returns the event type identifier for this payload.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            JourneyEventKind::SceneEntered(_) => SCENE_ENTERED_EVENT_TYPE,
            JourneyEventKind::AnswerRecorded(_) => ANSWER_RECORDED_EVENT_TYPE,
            JourneyEventKind::QuizCompleted(_) => QUIZ_COMPLETED_EVENT_TYPE,
            JourneyEventKind::HeartCollected(_) => HEART_COLLECTED_EVENT_TYPE,
            JourneyEventKind::GameCompleted(_) => GAME_COMPLETED_EVENT_TYPE,
            JourneyEventKind::DecisionRecorded(_) => DECISION_RECORDED_EVENT_TYPE,
            JourneyEventKind::OutcomeDismissed(_) => OUTCOME_DISMISSED_EVENT_TYPE,
        }
    }
}

/// Domain event envelope for the journey context.
#[derive(Debug, Clone)]
pub struct JourneyEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: JourneyEventKind,
}

impl DomainEvent for JourneyEvent {
    fn event_type(&self) -> &'static str {
        self.kind.event_type()
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
