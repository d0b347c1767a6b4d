//! Commands for the journey context.

use heartline_core::command::Command;
use uuid::Uuid;

use super::scene::{AnswerKey, Decision};

/// Command to move one scene forward.
#[derive(Debug, Clone)]
pub struct Advance {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

impl Command for Advance {
    fn command_type(&self) -> &'static str {
        "journey.advance"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to move one scene back.
#[derive(Debug, Clone)]
pub struct Retreat {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

impl Command for Retreat {
    fn command_type(&self) -> &'static str {
        "journey.retreat"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to answer a quiz prompt.
#[derive(Debug, Clone)]
pub struct RecordAnswer {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The prompt being answered.
    pub key: AnswerKey,
    /// The chosen option text.
    pub value: String,
}

impl Command for RecordAnswer {
    fn command_type(&self) -> &'static str {
        "journey.record_answer"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to move from a completed quiz into the game.
#[derive(Debug, Clone)]
pub struct EnterGame {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

impl Command for EnterGame {
    fn command_type(&self) -> &'static str {
        "journey.enter_game"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to collect one heart in the game.
#[derive(Debug, Clone)]
pub struct CollectHeart {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

impl Command for CollectHeart {
    fn command_type(&self) -> &'static str {
        "journey.collect_heart"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to leave the finished game for the decision.
#[derive(Debug, Clone)]
pub struct ContinueToDecision {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

impl Command for ContinueToDecision {
    fn command_type(&self) -> &'static str {
        "journey.continue_to_decision"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to record the closing decision.
#[derive(Debug, Clone)]
pub struct RecordDecision {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The decision.
    pub decision: Decision,
}

impl Command for RecordDecision {
    fn command_type(&self) -> &'static str {
        "journey.record_decision"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to dismiss the closing presentation.
#[derive(Debug, Clone)]
pub struct DismissOutcome {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

impl Command for DismissOutcome {
    fn command_type(&self) -> &'static str {
        "journey.dismiss_outcome"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
