//! Parsing of typed player commands.

use heartline_journey::domain::scene::{AnswerKey, Decision};

/// One line of player input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerAction {
    /// Move one scene forward.
    Next,
    /// Move one scene back.
    Back,
    /// Pick an option for a prompt. `option` is 0-based.
    Answer {
        /// The prompt.
        key: AnswerKey,
        /// The chosen option.
        option: usize,
    },
    /// Collect a heart in the game.
    Heart,
    /// Leave the finished game.
    Continue,
    /// Answer the closing question.
    Decide(Decision),
    /// Close the closing presentation.
    Dismiss,
    /// Print the command list.
    Help,
    /// Leave without finishing.
    Quit,
    /// Anything else.
    Unknown(String),
}

/// Parses one line. Blank lines yield `None`.
///
/// Answers are typed as the prompt number followed by the option number,
/// both 1-based: `2 3` or `q2 3` picks the third option of the second prompt.
#[must_use]
pub fn parse(line: &str) -> Option<PlayerAction> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let lowered = line.to_ascii_lowercase();
    let mut words = lowered.split_whitespace();
    let first = words.next()?;
    let second = words.next();
    let extra = words.next().is_some();

    let action = match (first, second, extra) {
        ("next" | "n" | "begin" | "start", None, false) => PlayerAction::Next,
        ("back" | "b" | "prev", None, false) => PlayerAction::Back,
        ("heart" | "h" | "collect", None, false) => PlayerAction::Heart,
        ("continue" | "c", None, false) => PlayerAction::Continue,
        ("yes" | "y", None, false) => PlayerAction::Decide(Decision::Yes),
        ("no", None, false) => PlayerAction::Decide(Decision::No),
        ("close" | "dismiss" | "ok", None, false) => PlayerAction::Dismiss,
        ("help" | "?", None, false) => PlayerAction::Help,
        ("quit" | "exit" | "q", None, false) => PlayerAction::Quit,
        (prompt, Some(option), false) => {
            parse_answer(prompt, option).unwrap_or_else(|| PlayerAction::Unknown(line.to_owned()))
        }
        _ => PlayerAction::Unknown(line.to_owned()),
    };
    Some(action)
}

fn parse_answer(prompt: &str, option: &str) -> Option<PlayerAction> {
    let key = match prompt.strip_prefix('q').unwrap_or(prompt) {
        "1" => AnswerKey::Q1,
        "2" => AnswerKey::Q2,
        "3" => AnswerKey::Q3,
        _ => return None,
    };
    let option: usize = option.parse().ok()?;
    Some(PlayerAction::Answer {
        key,
        option: option.checked_sub(1)?,
    })
}
