//! Text rendering of journey views.

use std::fmt::Write as _;

use heartline_journey::application::query_handlers::JourneyView;
use heartline_journey::application::timers::Elapsed;
use heartline_journey::content::{CardContent, MediaKind};
use heartline_journey::domain::scene::{Decision, Scene};

/// Command list shown on `help`.
pub const HELP: &str = "\
Commands:
  next / back        move between scenes
  <prompt> <option>  answer a quiz prompt, e.g. `2 3`
  heart              collect a heart in the game
  continue           leave the finished game
  yes / no           answer the closing question
  close              close the final message
  quit               leave the card
";

/// "302 days 10 hours 4 minutes 9 seconds".
#[must_use]
pub fn render_elapsed(elapsed: &Elapsed) -> String {
    format!(
        "{} days {} hours {} minutes {} seconds",
        elapsed.days, elapsed.hours, elapsed.minutes, elapsed.seconds
    )
}

/// Renders the active scene in full.
#[must_use]
pub fn render_scene(view: &JourneyView, content: &CardContent) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n== {} ({}) ==", view.progress_label(), view.scene);

    match view.scene {
        Scene::Welcome => render_welcome(&mut out, view, content),
        Scene::Memories => render_memories(&mut out, content),
        Scene::Quiz => render_quiz(&mut out, view, content),
        Scene::Game => render_game(&mut out, view, content),
        Scene::Decision => render_decision(&mut out, view, content),
    }
    out
}

fn render_welcome(out: &mut String, view: &JourneyView, content: &CardContent) {
    let welcome = &content.welcome;
    let _ = writeln!(out, "{}, {}", welcome.heading, content.recipient);
    let _ = writeln!(out, "Video: {}", welcome.video_url);
    let _ = writeln!(out, "{}", welcome.invitation);
    let _ = writeln!(out, "Type `next` to begin.");
    if let Some(elapsed) = &view.elapsed {
        let _ = write!(out, "Together for {}", render_elapsed(elapsed));
    }
}

fn render_memories(out: &mut String, content: &CardContent) {
    let memories = &content.memories;
    let _ = writeln!(out, "{}", memories.heading);
    for (position, item) in memories.items.iter().enumerate() {
        let kind = match item.kind {
            MediaKind::Image => "photo",
            MediaKind::Video => "video",
        };
        let _ = writeln!(out, "  {}. {} [{kind}: {}]", position + 1, item.title, item.src);
        let _ = writeln!(out, "     {}", item.hint);
    }
}

fn render_quiz(out: &mut String, view: &JourneyView, content: &CardContent) {
    let quiz = &content.quiz;
    let _ = writeln!(out, "{}", quiz.heading);
    for (number, prompt) in content.prompts_in_order().enumerate() {
        let _ = writeln!(out, "\n{}. {}", number + 1, prompt.title);
        let _ = writeln!(out, "   {}", prompt.text);
        let selected = view.answers.get(prompt.key);
        for (index, option) in prompt.options.iter().enumerate() {
            let marker = if selected == Some(option.as_str()) { '*' } else { ' ' };
            let _ = writeln!(out, "  {marker}[{}] {option}", index + 1);
        }
        if selected.is_some() {
            let _ = writeln!(out, "   {}", quiz.acknowledgement);
        }
    }
    let _ = writeln!(out, "\nAnswered {} of {}", view.answered, view.total_prompts);
}

fn render_game(out: &mut String, view: &JourneyView, content: &CardContent) {
    let game = &content.game;
    let _ = writeln!(out, "{}", game.heading);
    let _ = writeln!(out, "{}", game.hint);
    let _ = writeln!(out, "Hearts: {}", view.hearts_label());
    if view.continue_available {
        let _ = writeln!(out, "{}", game.completed);
        let _ = writeln!(out, "Type `continue` for the question.");
    } else {
        let _ = writeln!(out, "Type `heart` to collect one. (continue is locked)");
    }
}

fn render_decision(out: &mut String, view: &JourneyView, content: &CardContent) {
    match view.decision {
        Some(decision) => out.push_str(&render_outcome(decision, content)),
        None => {
            let _ = writeln!(out, "{}", content.decision.question);
            let _ = writeln!(out, "Photo: {}", content.decision.photo);
            let _ = writeln!(out, "Type `yes` or `no`.");
        }
    }
}

/// Renders the closing presentation for a decision.
#[must_use]
pub fn render_outcome(decision: Decision, content: &CardContent) -> String {
    let outcome = content.outcome(decision);
    let mut out = String::new();
    let _ = writeln!(out, "\n*** {} ***", outcome.headline);
    let _ = writeln!(out, "{}", outcome.message);
    let _ = writeln!(out, "[{}]", outcome.media);
    let _ = writeln!(out, "Type `close` to continue.");
    out
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{TimeZone, Utc};
    use heartline_journey::application::controller::JourneyController;
    use heartline_journey::domain::scene::AnswerKey;
    use heartline_test_support::{FixedClock, RecordingDispatcher};

    use super::*;

    fn controller() -> JourneyController {
        JourneyController::new(
            CardContent::builtin().unwrap(),
            Arc::new(FixedClock(Utc.with_ymd_and_hms(2026, 2, 14, 10, 0, 0).unwrap())),
            Arc::new(RecordingDispatcher::default()),
        )
    }

    #[test]
    fn test_render_elapsed() {
        let elapsed = Elapsed {
            days: 302,
            hours: 10,
            minutes: 4,
            seconds: 9,
        };

        assert_eq!(render_elapsed(&elapsed), "302 days 10 hours 4 minutes 9 seconds");
    }

    #[test]
    fn test_welcome_shows_progress_and_invitation() {
        let controller = controller();

        let text = render_scene(&controller.view(), controller.content());

        assert!(text.contains("Step 1 of 5"));
        assert!(text.contains("Happy Valentine's Day, My Valentine"));
        assert!(text.contains("Type `next` to begin."));
    }

    #[test]
    fn test_memories_list_every_item() {
        let mut controller = controller();
        controller.advance();

        let text = render_scene(&controller.view(), controller.content());

        assert!(text.contains("Step 2 of 5"));
        assert!(text.contains("1. The first time [video: /memories/1-first-video.mp4]"));
        assert!(text.contains("4. Us in bed [photo: /memories/4-bed-screenshot.jpg]"));
    }

    #[tokio::test]
    async fn test_quiz_marks_selected_option() {
        // Arrange
        let mut controller = controller();
        controller.advance();
        controller.advance();

        // Act
        controller.answer(AnswerKey::Q2, 2).unwrap();
        let text = render_scene(&controller.view(), controller.content());

        // Assert
        assert!(text.contains(" *[3] Home"));
        assert!(text.contains("  [1] Warm"));
        assert!(text.contains("Answered 1 of 3"));
    }

    #[test]
    fn test_game_shows_hearts_and_lock() {
        let mut controller = controller();
        for _ in 0..3 {
            controller.advance();
        }
        controller.collect_heart().unwrap();

        let text = render_scene(&controller.view(), controller.content());

        assert!(text.contains("Hearts: 1 / 5"));
        assert!(text.contains("continue is locked"));
    }

    #[test]
    fn test_decision_shows_outcome_once_decided() {
        let mut controller = controller();
        for _ in 0..4 {
            controller.advance();
        }
        let before = render_scene(&controller.view(), controller.content());
        controller.decide(Decision::No).unwrap();

        let after = render_scene(&controller.view(), controller.content());

        assert!(before.contains("Will you be my Valentine?"));
        assert!(after.contains("*** It's okay ***"));
        assert!(after.contains("Type `close` to continue."));
    }
}
