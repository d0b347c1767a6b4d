//! The journey controller: owns the session, runs its timers and hands the
//! final report to a dispatcher.
//!
//! Everything runs on the caller's task. Timers only post [`Signal`]s back;
//! the caller feeds them in through [`JourneyController::handle_signal`], so
//! state changes never race each other.

use std::sync::Arc;

use heartline_core::clock::Clock;
use heartline_core::error::DomainError;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info};
use uuid::Uuid;

use crate::application::command_handlers;
use crate::application::dispatch::{ReportDispatch, ReportPayload};
use crate::application::query_handlers::{JourneyView, TimerStatus, view_of};
use crate::application::timers::{
    DelayedSignal, ELAPSED_TICK, Elapsed, ElapsedTicker, QUIZ_ADVANCE_DELAY, Signal,
};
use crate::content::CardContent;
use crate::domain::aggregates::JourneySession;
use crate::domain::commands::{
    Advance, CollectHeart, ContinueToDecision, DismissOutcome, EnterGame, RecordAnswer,
    RecordDecision, Retreat,
};
use crate::domain::events::{JourneyEvent, JourneyEventKind};
use crate::domain::scene::{AnswerKey, Decision, Scene};

/// Drives one session through the card.
pub struct JourneyController {
    session: JourneySession,
    content: CardContent,
    clock: Arc<dyn Clock>,
    dispatcher: Arc<dyn ReportDispatch>,
    signals_tx: UnboundedSender<Signal>,
    signals_rx: UnboundedReceiver<Signal>,
    pending_advance: Option<DelayedSignal>,
    next_ticket: u64,
    ticker: Option<ElapsedTicker>,
    elapsed: Option<Elapsed>,
}

impl JourneyController {
    /// Creates a controller for a fresh session on the welcome scene. Call
    /// [`start`](Self::start) from inside a Tokio runtime to begin ticking.
    #[must_use]
    pub fn new(
        content: CardContent,
        clock: Arc<dyn Clock>,
        dispatcher: Arc<dyn ReportDispatch>,
    ) -> Self {
        let (signals_tx, signals_rx) = mpsc::unbounded_channel();
        Self {
            session: JourneySession::new(Uuid::new_v4()),
            content,
            clock,
            dispatcher,
            signals_tx,
            signals_rx,
            pending_advance: None,
            next_ticket: 0,
            ticker: None,
            elapsed: None,
        }
    }

    /// Starts the welcome tick if the welcome scene is active.
    pub fn start(&mut self) {
        info!(session_id = %self.session.id, "journey started");
        if self.session.scene() == Scene::Welcome && self.ticker.is_none() {
            self.start_ticker();
        }
    }

    /// The card being presented.
    #[must_use]
    pub fn content(&self) -> &CardContent {
        &self.content
    }

    /// Read-only snapshot of the session.
    #[must_use]
    pub fn view(&self) -> JourneyView {
        view_of(
            &self.session,
            TimerStatus {
                elapsed: self.elapsed,
                auto_advance_pending: self.pending_advance.is_some(),
                ticker_running: self.ticker.is_some(),
            },
        )
    }

    /// Moves one scene forward. Returns whether the scene changed.
    pub fn advance(&mut self) -> bool {
        let command = Advance {
            correlation_id: Uuid::new_v4(),
        };
        let events = command_handlers::handle_advance(&command, &mut self.session, self.clock.as_ref());
        self.react(&events);
        !events.is_empty()
    }

    /// Moves one scene back. Returns whether the scene changed.
    pub fn retreat(&mut self) -> bool {
        let command = Retreat {
            correlation_id: Uuid::new_v4(),
        };
        let events = command_handlers::handle_retreat(&command, &mut self.session, self.clock.as_ref());
        self.react(&events);
        !events.is_empty()
    }

    /// Answers a prompt with the option at `option_index` (0-based). Returns
    /// whether this was the prompt's first answer.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotFound` for an option index outside the
    /// prompt's option set and `DomainError::Validation` when the quiz is not
    /// the active scene.
    pub fn answer(&mut self, key: AnswerKey, option_index: usize) -> Result<bool, DomainError> {
        let value = self
            .content
            .option(key, option_index)
            .ok_or_else(|| {
                let label = option_index.saturating_add(1);
                DomainError::NotFound(format!("option {label} of prompt {key}"))
            })?
            .to_owned();
        let command = RecordAnswer {
            correlation_id: Uuid::new_v4(),
            key,
            value,
        };
        let events =
            command_handlers::handle_record_answer(&command, &mut self.session, self.clock.as_ref())?;
        let first_answer = events.iter().any(|e| {
            matches!(&e.kind, JourneyEventKind::AnswerRecorded(payload) if payload.first_answer)
        });
        self.react(&events);
        Ok(first_answer)
    }

    /// Collects one heart. Returns the hearts collected.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` when the game is not the active scene.
    pub fn collect_heart(&mut self) -> Result<u8, DomainError> {
        let command = CollectHeart {
            correlation_id: Uuid::new_v4(),
        };
        let events =
            command_handlers::handle_collect_heart(&command, &mut self.session, self.clock.as_ref())?;
        self.react(&events);
        Ok(self.session.hearts())
    }

    /// Leaves the finished game for the decision. Returns `false` while the
    /// action is still locked.
    pub fn continue_to_decision(&mut self) -> bool {
        let command = ContinueToDecision {
            correlation_id: Uuid::new_v4(),
        };
        let events = command_handlers::handle_continue_to_decision(
            &command,
            &mut self.session,
            self.clock.as_ref(),
        );
        self.react(&events);
        !events.is_empty()
    }

    /// Records the decision and dispatches the report without waiting on it.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` when the decision scene is not active
    /// or a decision was already made; nothing is dispatched in that case.
    pub fn decide(&mut self, decision: Decision) -> Result<(), DomainError> {
        let command = RecordDecision {
            correlation_id: Uuid::new_v4(),
            decision,
        };
        let events = command_handlers::handle_record_decision(
            &command,
            &mut self.session,
            self.clock.as_ref(),
        )?;
        self.react(&events);
        Ok(())
    }

    /// Dismisses the closing presentation and returns the external page to
    /// open.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if no decision was made yet or the
    /// presentation was already dismissed.
    pub fn dismiss_outcome(&mut self) -> Result<String, DomainError> {
        let command = DismissOutcome {
            correlation_id: Uuid::new_v4(),
        };
        let events = command_handlers::handle_dismiss_outcome(
            &command,
            &mut self.session,
            self.clock.as_ref(),
        )?;
        self.react(&events);
        let decision = self.session.decision().ok_or_else(|| {
            DomainError::Validation("dismissed without a decision".to_owned())
        })?;
        let destination = self.content.outcome(decision).destination.clone();
        info!(%decision, %destination, "redirecting after decision");
        Ok(destination)
    }

    /// Waits for the next timer signal. Cancel-safe.
    pub async fn next_signal(&mut self) -> Option<Signal> {
        self.signals_rx.recv().await
    }

    /// Applies a timer signal. Signals from cancelled timers are ignored.
    pub fn handle_signal(&mut self, signal: Signal) {
        match signal {
            Signal::QuizAdvanceDue { ticket } => {
                if self.pending_advance.as_ref().map(DelayedSignal::ticket) != Some(ticket) {
                    debug!(ticket, "ignoring stale quiz advance");
                    return;
                }
                self.pending_advance = None;
                let command = EnterGame {
                    correlation_id: Uuid::new_v4(),
                };
                let events = command_handlers::handle_enter_game(
                    &command,
                    &mut self.session,
                    self.clock.as_ref(),
                );
                self.react(&events);
            }
            Signal::Tick(elapsed) => {
                if self.ticker.is_some() {
                    self.elapsed = Some(elapsed);
                }
            }
        }
    }

    /// Cancels every running timer. Also happens on drop.
    pub fn shutdown(&mut self) {
        self.pending_advance = None;
        self.ticker = None;
        debug!(session_id = %self.session.id, "journey timers stopped");
    }

    fn react(&mut self, events: &[JourneyEvent]) {
        for event in events {
            match &event.kind {
                JourneyEventKind::SceneEntered(payload) => {
                    info!(
                        from = %payload.from,
                        to = %payload.to,
                        transition = ?payload.transition,
                        "scene entered"
                    );
                    if payload.from == Scene::Quiz && self.pending_advance.take().is_some() {
                        debug!("quiz auto-advance cancelled");
                    }
                    if payload.from == Scene::Welcome {
                        self.ticker = None;
                        self.elapsed = None;
                    }
                    if payload.to == Scene::Welcome {
                        self.start_ticker();
                    }
                }
                JourneyEventKind::QuizCompleted(_) => self.schedule_quiz_advance(),
                JourneyEventKind::DecisionRecorded(payload) => {
                    let report = ReportPayload::new(payload.answers.clone(), self.clock.now());
                    info!(decision = %payload.decision, "dispatching answer report");
                    self.dispatcher.dispatch(report);
                }
                JourneyEventKind::AnswerRecorded(_)
                | JourneyEventKind::HeartCollected(_)
                | JourneyEventKind::GameCompleted(_)
                | JourneyEventKind::OutcomeDismissed(_) => {}
            }
        }
    }

    fn schedule_quiz_advance(&mut self) {
        self.next_ticket += 1;
        debug!(ticket = self.next_ticket, "quiz complete, scheduling auto-advance");
        self.pending_advance = Some(DelayedSignal::quiz_advance(
            self.next_ticket,
            QUIZ_ADVANCE_DELAY,
            self.signals_tx.clone(),
        ));
    }

    fn start_ticker(&mut self) {
        let since = self.content.welcome.together_since;
        self.elapsed = Some(Elapsed::between(since, self.clock.now()));
        self.ticker = Some(ElapsedTicker::start(
            since,
            Arc::clone(&self.clock),
            ELAPSED_TICK,
            self.signals_tx.clone(),
        ));
    }
}
