//! Card content: the text, prompts, media paths and destinations a journey
//! presents. Authored as YAML; a default card is compiled in.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

use crate::domain::scene::{AnswerKey, Decision};

const BUILTIN_CARD: &str = include_str!("../card.yaml");

/// Errors raised while loading card content.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The card file could not be read.
    #[error("failed to read card: {0}")]
    Io(#[from] std::io::Error),

    /// The card is not valid YAML for the expected shape.
    #[error("failed to parse card: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// The card parsed but is unusable.
    #[error("invalid card: {0}")]
    Invalid(String),
}

/// Kind of a memory media item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// A still image.
    Image,
    /// A video clip.
    Video,
}

/// One item of the memories gallery.
#[derive(Debug, Clone, Deserialize)]
pub struct MemoryItem {
    /// Caption title.
    pub title: String,
    /// Caption text.
    pub hint: String,
    /// Media path, resolved by whoever renders it.
    pub src: String,
    /// Image or video.
    pub kind: MediaKind,
}

/// Welcome scene text.
#[derive(Debug, Clone, Deserialize)]
pub struct WelcomeContent {
    /// Heading line.
    pub heading: String,
    /// Embedded video URL.
    pub video_url: String,
    /// Start of the elapsed-time display.
    pub together_since: DateTime<Utc>,
    /// Call to action.
    pub invitation: String,
}

/// Memories scene text and gallery.
#[derive(Debug, Clone, Deserialize)]
pub struct MemoriesContent {
    /// Heading line.
    pub heading: String,
    /// Gallery items in display order.
    pub items: Vec<MemoryItem>,
}

/// One quiz prompt and its fixed option set.
#[derive(Debug, Clone, Deserialize)]
pub struct Prompt {
    /// Which answer slot this prompt fills.
    pub key: AnswerKey,
    /// Question title.
    pub title: String,
    /// Supporting text.
    pub text: String,
    /// Selectable answers.
    pub options: Vec<String>,
}

/// Quiz scene text and prompts.
#[derive(Debug, Clone, Deserialize)]
pub struct QuizContent {
    /// Heading line.
    pub heading: String,
    /// Shown under a prompt once it has been answered.
    pub acknowledgement: String,
    /// The prompts, one per answer key.
    pub prompts: Vec<Prompt>,
}

/// Game scene text.
#[derive(Debug, Clone, Deserialize)]
pub struct GameContent {
    /// Heading line.
    pub heading: String,
    /// Instructions.
    pub hint: String,
    /// Shown once every heart is collected.
    pub completed: String,
}

/// Closing presentation for one decision.
#[derive(Debug, Clone, Deserialize)]
pub struct OutcomeContent {
    /// Headline.
    pub headline: String,
    /// Message body.
    pub message: String,
    /// Media shown with the message.
    pub media: String,
    /// External page opened when the presentation is dismissed.
    pub destination: String,
}

/// Decision scene text and outcomes.
#[derive(Debug, Clone, Deserialize)]
pub struct DecisionContent {
    /// The closing question.
    pub question: String,
    /// Photo shown with the question.
    pub photo: String,
    /// Presentation after a yes.
    pub yes: OutcomeContent,
    /// Presentation after a no.
    pub no: OutcomeContent,
}

/// A complete card definition.
#[derive(Debug, Clone, Deserialize)]
pub struct CardContent {
    /// Who the card is for.
    pub recipient: String,
    /// Who made it.
    pub author: String,
    /// Welcome scene.
    pub welcome: WelcomeContent,
    /// Memories scene.
    pub memories: MemoriesContent,
    /// Quiz scene.
    pub quiz: QuizContent,
    /// Game scene.
    pub game: GameContent,
    /// Decision scene.
    pub decision: DecisionContent,
}

impl CardContent {
    /// The card compiled into the binary.
    ///
    /// # Errors
    ///
    /// Returns `ContentError` if the bundled card fails to parse or validate.
    pub fn builtin() -> Result<Self, ContentError> {
        Self::from_yaml_str(BUILTIN_CARD)
    }

    /// Parses and validates a card from YAML text.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::Parse` for malformed YAML and
    /// `ContentError::Invalid` for a card that fails validation.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ContentError> {
        let card: CardContent = serde_yaml::from_str(yaml)?;
        card.validate()?;
        Ok(card)
    }

    /// Reads, parses and validates a card file.
    ///
    /// # Errors
    ///
    /// Returns `ContentError` if the file cannot be read, parsed or validated.
    pub fn load(path: &Path) -> Result<Self, ContentError> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    fn validate(&self) -> Result<(), ContentError> {
        for key in AnswerKey::ALL {
            let count = self.quiz.prompts.iter().filter(|p| p.key == key).count();
            if count != 1 {
                return Err(ContentError::Invalid(format!(
                    "expected exactly one prompt for {key}, found {count}"
                )));
            }
        }
        for prompt in &self.quiz.prompts {
            if prompt.options.is_empty() || prompt.options.iter().any(|o| o.trim().is_empty()) {
                return Err(ContentError::Invalid(format!(
                    "prompt {} needs at least one option and no blank ones",
                    prompt.key
                )));
            }
        }
        for decision in [Decision::Yes, Decision::No] {
            if self.outcome(decision).destination.trim().is_empty() {
                return Err(ContentError::Invalid(format!(
                    "destination for {decision} must not be empty"
                )));
            }
        }
        Ok(())
    }

    /// The prompt for an answer key. Validation guarantees one exists.
    #[must_use]
    pub fn prompt(&self, key: AnswerKey) -> Option<&Prompt> {
        self.quiz.prompts.iter().find(|p| p.key == key)
    }

    /// Prompts in answer-key order.
    pub fn prompts_in_order(&self) -> impl Iterator<Item = &Prompt> {
        AnswerKey::ALL.into_iter().filter_map(|key| self.prompt(key))
    }

    /// The option text at `index` (0-based) of a prompt.
    #[must_use]
    pub fn option(&self, key: AnswerKey, index: usize) -> Option<&str> {
        self.prompt(key)?.options.get(index).map(String::as_str)
    }

    /// The closing presentation for a decision.
    #[must_use]
    pub fn outcome(&self, decision: Decision) -> &OutcomeContent {
        match decision {
            Decision::Yes => &self.decision.yes,
            Decision::No => &self.decision.no,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_card_parses_and_validates() {
        let card = CardContent::builtin().unwrap();

        assert_eq!(card.memories.items.len(), 4);
        assert_eq!(card.prompts_in_order().count(), 3);
        assert_eq!(card.option(AnswerKey::Q2, 2), Some("Home"));
        assert!(card.outcome(Decision::Yes).destination.starts_with("https://"));
        assert_ne!(
            card.outcome(Decision::Yes).destination,
            card.outcome(Decision::No).destination
        );
    }

    #[test]
    fn test_option_out_of_range_is_none() {
        let card = CardContent::builtin().unwrap();

        assert_eq!(card.option(AnswerKey::Q1, 99), None);
    }

    #[test]
    fn test_missing_prompt_is_rejected() {
        let yaml = BUILTIN_CARD.replace("key: q3", "key: q2");

        let result = CardContent::from_yaml_str(&yaml);

        match result.unwrap_err() {
            ContentError::Invalid(msg) => assert!(msg.contains("q2") || msg.contains("q3")),
            other => panic!("expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_yaml_is_a_parse_error() {
        let result = CardContent::from_yaml_str("recipient: [unclosed");

        assert!(matches!(result, Err(ContentError::Parse(_))));
    }
}
