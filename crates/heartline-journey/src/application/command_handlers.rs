//! Command handlers for the journey context.
//!
//! Each handler executes one command against the in-memory session and
//! returns the events it raised. An empty list means the command was a no-op
//! (navigation past either end, an inert continue).

use heartline_core::clock::Clock;
use heartline_core::command::Command;
use heartline_core::error::DomainError;
use tracing::debug;

use crate::domain::aggregates::JourneySession;
use crate::domain::commands::{
    Advance, CollectHeart, ContinueToDecision, DismissOutcome, EnterGame, RecordAnswer,
    RecordDecision, Retreat,
};
use crate::domain::events::JourneyEvent;

fn drained(session: &mut JourneySession, command: &dyn Command) -> Vec<JourneyEvent> {
    let events = session.take_uncommitted_events();
    debug!(
        command_type = command.command_type(),
        correlation_id = %command.correlation_id(),
        events = events.len(),
        scene = %session.scene(),
        "journey command handled"
    );
    events
}

/// Handles the `Advance` command.
pub fn handle_advance(
    command: &Advance,
    session: &mut JourneySession,
    clock: &dyn Clock,
) -> Vec<JourneyEvent> {
    session.advance(command.correlation_id, clock);
    drained(session, command)
}

/// Handles the `Retreat` command.
pub fn handle_retreat(
    command: &Retreat,
    session: &mut JourneySession,
    clock: &dyn Clock,
) -> Vec<JourneyEvent> {
    session.retreat(command.correlation_id, clock);
    drained(session, command)
}

/// Handles the `RecordAnswer` command.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the quiz is not active or the answer
/// is empty.
pub fn handle_record_answer(
    command: &RecordAnswer,
    session: &mut JourneySession,
    clock: &dyn Clock,
) -> Result<Vec<JourneyEvent>, DomainError> {
    session.record_answer(
        command.key,
        command.value.clone(),
        command.correlation_id,
        clock,
    )?;
    Ok(drained(session, command))
}

/// Handles the `EnterGame` command.
pub fn handle_enter_game(
    command: &EnterGame,
    session: &mut JourneySession,
    clock: &dyn Clock,
) -> Vec<JourneyEvent> {
    session.enter_game_after_quiz(command.correlation_id, clock);
    drained(session, command)
}

/// Handles the `CollectHeart` command.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the game is not active.
pub fn handle_collect_heart(
    command: &CollectHeart,
    session: &mut JourneySession,
    clock: &dyn Clock,
) -> Result<Vec<JourneyEvent>, DomainError> {
    session.collect_heart(command.correlation_id, clock)?;
    Ok(drained(session, command))
}

/// Handles the `ContinueToDecision` command.
pub fn handle_continue_to_decision(
    command: &ContinueToDecision,
    session: &mut JourneySession,
    clock: &dyn Clock,
) -> Vec<JourneyEvent> {
    session.continue_to_decision(command.correlation_id, clock);
    drained(session, command)
}

/// Handles the `RecordDecision` command.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the decision scene is not active or a
/// decision already exists.
pub fn handle_record_decision(
    command: &RecordDecision,
    session: &mut JourneySession,
    clock: &dyn Clock,
) -> Result<Vec<JourneyEvent>, DomainError> {
    session.record_decision(command.decision, command.correlation_id, clock)?;
    Ok(drained(session, command))
}

/// Handles the `DismissOutcome` command.
///
/// # Errors
///
/// Returns `DomainError::Validation` if there is nothing to dismiss.
pub fn handle_dismiss_outcome(
    command: &DismissOutcome,
    session: &mut JourneySession,
    clock: &dyn Clock,
) -> Result<Vec<JourneyEvent>, DomainError> {
    session.dismiss_outcome(command.correlation_id, clock)?;
    Ok(drained(session, command))
}
