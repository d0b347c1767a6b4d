//! Aggregate root for the journey context.

use std::collections::BTreeSet;

use heartline_core::aggregate::AggregateRoot;
use heartline_core::clock::Clock;
use heartline_core::error::DomainError;
use heartline_core::event::EventMetadata;
use uuid::Uuid;

use super::events::{
    AnswerRecorded, DecisionRecorded, GameCompleted, HeartCollected, JourneyEvent,
    JourneyEventKind, OutcomeDismissed, QuizCompleted, SceneEntered, Transition,
};
use super::scene::{AnswerKey, Answers, Decision, Scene};

/// Number of quiz prompts.
pub const PROMPT_COUNT: u8 = 3;

/// Hearts needed to unlock the decision.
pub const TOTAL_HEARTS: u8 = 5;

/// The aggregate root for one pass through the card.
///
/// The session lives only in memory, so events are applied the moment they are
/// raised; `uncommitted_events` holds them until the controller has reacted.
#[derive(Debug)]
pub struct JourneySession {
    /// Aggregate identifier.
    pub id: Uuid,
    /// Current version (event count).
    pub(crate) version: i64,
    /// Active scene.
    pub(crate) scene: Scene,
    /// Prompts answered at least once.
    pub(crate) answered_keys: BTreeSet<AnswerKey>,
    /// Answer accumulator.
    pub(crate) answers: Answers,
    /// Hearts collected since the game was last entered.
    pub(crate) hearts: u8,
    /// Whether the closing presentation was dismissed.
    pub(crate) outcome_dismissed: bool,
    /// Events raised since the last drain.
    uncommitted_events: Vec<JourneyEvent>,
}

impl JourneySession {
    /// Creates a new session on the welcome scene.
    #[must_use]
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            version: 0,
            scene: Scene::Welcome,
            answered_keys: BTreeSet::new(),
            answers: Answers::default(),
            hearts: 0,
            outcome_dismissed: false,
            uncommitted_events: Vec::new(),
        }
    }

    /// Active scene.
    #[must_use]
    pub fn scene(&self) -> Scene {
        self.scene
    }

    /// Number of distinct prompts answered.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn answered(&self) -> u8 {
        self.answered_keys.len() as u8
    }

    /// Whether every prompt has an answer.
    #[must_use]
    pub fn quiz_complete(&self) -> bool {
        self.answered() == PROMPT_COUNT
    }

    /// The answer accumulator.
    #[must_use]
    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    /// Hearts collected in the current game.
    #[must_use]
    pub fn hearts(&self) -> u8 {
        self.hearts
    }

    /// Whether the continue action of the game is available.
    #[must_use]
    pub fn continue_available(&self) -> bool {
        self.scene == Scene::Game && self.hearts >= TOTAL_HEARTS
    }

    /// The decision, once made.
    #[must_use]
    pub fn decision(&self) -> Option<Decision> {
        self.answers.decision
    }

    /// Whether the closing presentation was dismissed.
    #[must_use]
    pub fn outcome_dismissed(&self) -> bool {
        self.outcome_dismissed
    }

    /// Returns the next sequence number for a new event.
    fn next_sequence_number(&self) -> i64 {
        self.version + 1
    }

    fn raise(&mut self, kind: JourneyEventKind, correlation_id: Uuid, clock: &dyn Clock) {
        let event = JourneyEvent {
            metadata: EventMetadata {
                event_id: Uuid::new_v4(),
                event_type: kind.event_type().to_owned(),
                aggregate_id: self.id,
                sequence_number: self.next_sequence_number(),
                correlation_id,
                occurred_at: clock.now(),
            },
            kind,
        };
        self.apply(&event);
        self.uncommitted_events.push(event);
    }

    fn enter(&mut self, to: Scene, transition: Transition, correlation_id: Uuid, clock: &dyn Clock) {
        let from = self.scene;
        self.raise(
            JourneyEventKind::SceneEntered(SceneEntered {
                from,
                to,
                transition,
            }),
            correlation_id,
            clock,
        );
    }

    /// Moves to the next scene. Returns `false` when already on the last scene
    /// or once the decision has been made.
    pub fn advance(&mut self, correlation_id: Uuid, clock: &dyn Clock) -> bool {
        if self.decision().is_some() {
            return false;
        }
        let Some(to) = self.scene.next() else {
            return false;
        };
        self.enter(to, Transition::Advance, correlation_id, clock);
        true
    }

    /// Moves to the previous scene. Returns `false` when already on the first
    /// scene or once the decision has been made.
    pub fn retreat(&mut self, correlation_id: Uuid, clock: &dyn Clock) -> bool {
        if self.decision().is_some() {
            return false;
        }
        let Some(to) = self.scene.previous() else {
            return false;
        };
        self.enter(to, Transition::Retreat, correlation_id, clock);
        true
    }

    /// Records an answer to a quiz prompt, producing `AnswerRecorded` and, on
    /// the third distinct prompt, `QuizCompleted`. Returns whether this was
    /// the first answer for the prompt.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the quiz is not the active scene
    /// or the value is empty.
    pub fn record_answer(
        &mut self,
        key: AnswerKey,
        value: String,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<bool, DomainError> {
        if self.scene != Scene::Quiz {
            return Err(DomainError::Validation(format!(
                "answers are only accepted on the quiz scene, not {}",
                self.scene
            )));
        }
        if value.trim().is_empty() {
            return Err(DomainError::Validation(format!(
                "answer for {key} must not be empty"
            )));
        }

        let first_answer = !self.answered_keys.contains(&key);
        self.raise(
            JourneyEventKind::AnswerRecorded(AnswerRecorded {
                key,
                value,
                first_answer,
            }),
            correlation_id,
            clock,
        );

        if first_answer && self.quiz_complete() {
            self.raise(
                JourneyEventKind::QuizCompleted(QuizCompleted {
                    answered: self.answered(),
                }),
                correlation_id,
                clock,
            );
        }
        Ok(first_answer)
    }

    /// Moves from a completed quiz into the game. Returns `false` if the quiz
    /// is no longer active or not yet complete.
    pub fn enter_game_after_quiz(&mut self, correlation_id: Uuid, clock: &dyn Clock) -> bool {
        if self.scene != Scene::Quiz || !self.quiz_complete() {
            return false;
        }
        self.enter(Scene::Game, Transition::QuizCompleted, correlation_id, clock);
        true
    }

    /// Collects one heart. Extra interactions once all hearts are collected
    /// change nothing. Returns the hearts collected.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the game is not the active scene.
    pub fn collect_heart(&mut self, correlation_id: Uuid, clock: &dyn Clock) -> Result<u8, DomainError> {
        if self.scene != Scene::Game {
            return Err(DomainError::Validation(format!(
                "hearts can only be collected in the game, not {}",
                self.scene
            )));
        }
        if self.hearts >= TOTAL_HEARTS {
            return Ok(self.hearts);
        }

        let collected = self.hearts + 1;
        self.raise(
            JourneyEventKind::HeartCollected(HeartCollected { collected }),
            correlation_id,
            clock,
        );
        if collected == TOTAL_HEARTS {
            self.raise(
                JourneyEventKind::GameCompleted(GameCompleted { collected }),
                correlation_id,
                clock,
            );
        }
        Ok(collected)
    }

    /// Leaves the finished game for the decision. Inert (returns `false`)
    /// while hearts remain uncollected.
    pub fn continue_to_decision(&mut self, correlation_id: Uuid, clock: &dyn Clock) -> bool {
        if !self.continue_available() {
            return false;
        }
        self.enter(Scene::Decision, Transition::GameContinue, correlation_id, clock);
        true
    }

    /// Records the closing decision, producing `DecisionRecorded` with a
    /// snapshot of all answers.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the decision scene is not active
    /// or a decision was already recorded.
    pub fn record_decision(
        &mut self,
        decision: Decision,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        if self.scene != Scene::Decision {
            return Err(DomainError::Validation(format!(
                "a decision can only be made on the decision scene, not {}",
                self.scene
            )));
        }
        if let Some(existing) = self.decision() {
            return Err(DomainError::Validation(format!(
                "decision already recorded as {existing}"
            )));
        }

        let mut answers = self.answers.clone();
        answers.decision = Some(decision);
        self.raise(
            JourneyEventKind::DecisionRecorded(DecisionRecorded { decision, answers }),
            correlation_id,
            clock,
        );
        Ok(())
    }

    /// Dismisses the closing presentation and returns the decision it showed.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if no decision exists yet or the
    /// presentation was already dismissed.
    pub fn dismiss_outcome(
        &mut self,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<Decision, DomainError> {
        let Some(decision) = self.decision() else {
            return Err(DomainError::Validation(
                "nothing to dismiss before a decision is made".to_owned(),
            ));
        };
        if self.outcome_dismissed {
            return Err(DomainError::Validation(
                "closing presentation already dismissed".to_owned(),
            ));
        }
        self.raise(
            JourneyEventKind::OutcomeDismissed(OutcomeDismissed { decision }),
            correlation_id,
            clock,
        );
        Ok(decision)
    }

    /// Removes and returns the events raised since the last drain.
    pub fn take_uncommitted_events(&mut self) -> Vec<JourneyEvent> {
        std::mem::take(&mut self.uncommitted_events)
    }
}

impl AggregateRoot for JourneySession {
    type Event = JourneyEvent;

    fn aggregate_id(&self) -> Uuid {
        self.id
    }

    fn version(&self) -> i64 {
        self.version
    }

    fn apply(&mut self, event: &Self::Event) {
        match &event.kind {
            JourneyEventKind::SceneEntered(payload) => {
                // The game is scene-local: entering it starts a fresh round.
                if payload.to == Scene::Game && payload.from != Scene::Game {
                    self.hearts = 0;
                }
                self.scene = payload.to;
            }
            JourneyEventKind::AnswerRecorded(payload) => {
                self.answers.set(payload.key, payload.value.clone());
                self.answered_keys.insert(payload.key);
            }
            JourneyEventKind::HeartCollected(payload) => {
                self.hearts = payload.collected.min(TOTAL_HEARTS);
            }
            JourneyEventKind::DecisionRecorded(payload) => {
                self.answers.decision = Some(payload.decision);
            }
            JourneyEventKind::OutcomeDismissed(_) => {
                self.outcome_dismissed = true;
            }
            JourneyEventKind::QuizCompleted(_) | JourneyEventKind::GameCompleted(_) => {}
        }
        self.version += 1;
    }

    fn uncommitted_events(&self) -> &[Self::Event] {
        &self.uncommitted_events
    }

    fn clear_uncommitted_events(&mut self) {
        self.uncommitted_events.clear();
    }
}
