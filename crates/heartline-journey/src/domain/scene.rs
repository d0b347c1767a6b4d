//! Scenes, prompt keys, decisions and the answer accumulator.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the five linear steps of the card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Scene {
    /// Opening scene with the elapsed-time display.
    Welcome,
    /// Photo and video gallery.
    Memories,
    /// Three multiple-choice prompts.
    Quiz,
    /// Collect-the-hearts mini-game.
    Game,
    /// The closing yes/no question.
    Decision,
}

impl Scene {
    /// Number of scenes in the journey.
    pub const COUNT: u8 = 5;

    /// All scenes in order.
    pub const ALL: [Scene; 5] = [
        Scene::Welcome,
        Scene::Memories,
        Scene::Quiz,
        Scene::Game,
        Scene::Decision,
    ];

    /// Returns the 1-based step index.
    #[must_use]
    pub const fn index(self) -> u8 {
        match self {
            Scene::Welcome => 1,
            Scene::Memories => 2,
            Scene::Quiz => 3,
            Scene::Game => 4,
            Scene::Decision => 5,
        }
    }

    /// Looks up a scene by its 1-based step index.
    #[must_use]
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(usize::from(index.checked_sub(1)?)).copied()
    }

    /// The following scene, or `None` on the last one.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    /// The preceding scene, or `None` on the first one.
    #[must_use]
    pub fn previous(self) -> Option<Self> {
        Self::from_index(self.index() - 1)
    }
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Scene::Welcome => "welcome",
            Scene::Memories => "memories",
            Scene::Quiz => "quiz",
            Scene::Game => "game",
            Scene::Decision => "decision",
        };
        f.write_str(name)
    }
}

/// Key of one of the three quiz prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerKey {
    /// First prompt.
    Q1,
    /// Second prompt.
    Q2,
    /// Third prompt.
    Q3,
}

impl AnswerKey {
    /// All prompt keys in order.
    pub const ALL: [AnswerKey; 3] = [AnswerKey::Q1, AnswerKey::Q2, AnswerKey::Q3];

    /// Wire name of the key (`q1`, `q2`, `q3`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            AnswerKey::Q1 => "q1",
            AnswerKey::Q2 => "q2",
            AnswerKey::Q3 => "q3",
        }
    }
}

impl fmt::Display for AnswerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The binary answer to the closing question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    /// Accepted.
    Yes,
    /// Declined.
    No,
}

impl Decision {
    /// Wire name of the decision.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Decision::Yes => "yes",
            Decision::No => "no",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accumulated answers for a session. Keys are filled in as the user goes and
/// never removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Answers {
    /// Answer to the first prompt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q1: Option<String>,
    /// Answer to the second prompt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q2: Option<String>,
    /// Answer to the third prompt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q3: Option<String>,
    /// The closing decision.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decision: Option<Decision>,
}

impl Answers {
    /// Returns the stored answer for a prompt.
    #[must_use]
    pub fn get(&self, key: AnswerKey) -> Option<&str> {
        match key {
            AnswerKey::Q1 => self.q1.as_deref(),
            AnswerKey::Q2 => self.q2.as_deref(),
            AnswerKey::Q3 => self.q3.as_deref(),
        }
    }

    /// Stores an answer, replacing any earlier one for the same prompt.
    pub fn set(&mut self, key: AnswerKey, value: String) {
        let slot = match key {
            AnswerKey::Q1 => &mut self.q1,
            AnswerKey::Q2 => &mut self.q2,
            AnswerKey::Q3 => &mut self.q3,
        };
        *slot = Some(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_indices_are_one_based_and_contiguous() {
        for (position, scene) in Scene::ALL.iter().enumerate() {
            assert_eq!(usize::from(scene.index()), position + 1);
            assert_eq!(Scene::from_index(scene.index()), Some(*scene));
        }
        assert_eq!(Scene::from_index(0), None);
        assert_eq!(Scene::from_index(6), None);
    }

    #[test]
    fn test_next_and_previous_stop_at_the_ends() {
        assert_eq!(Scene::Welcome.previous(), None);
        assert_eq!(Scene::Welcome.next(), Some(Scene::Memories));
        assert_eq!(Scene::Decision.next(), None);
        assert_eq!(Scene::Decision.previous(), Some(Scene::Game));
    }

    #[test]
    fn test_answers_serialize_only_populated_keys() {
        // Arrange
        let mut answers = Answers::default();
        answers.set(AnswerKey::Q2, "Home".to_owned());
        answers.decision = Some(Decision::No);

        // Act
        let json = serde_json::to_value(&answers).unwrap();

        // Assert
        assert_eq!(json, serde_json::json!({ "q2": "Home", "decision": "no" }));
    }

    #[test]
    fn test_answers_set_replaces_previous_value() {
        let mut answers = Answers::default();
        answers.set(AnswerKey::Q1, "first".to_owned());
        answers.set(AnswerKey::Q1, "second".to_owned());

        assert_eq!(answers.get(AnswerKey::Q1), Some("second"));
        assert_eq!(answers.get(AnswerKey::Q3), None);
    }
}
