//! Scripted playthroughs of the built-in card.

use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use heartline_journey::application::controller::JourneyController;
use heartline_journey::content::CardContent;
use heartline_journey::domain::scene::{Decision, Scene};
use heartline_player::app;
use heartline_test_support::{FixedClock, RecordingDispatcher};
use tokio::io::{AsyncWriteExt, BufReader};

fn controller_with(dispatcher: &Arc<RecordingDispatcher>) -> JourneyController {
    JourneyController::new(
        CardContent::builtin().unwrap(),
        Arc::new(FixedClock(Utc.with_ymd_and_hms(2026, 2, 14, 10, 0, 0).unwrap())),
        dispatcher.clone(),
    )
}

const FULL_SCRIPT: &str = "\
next
next
1 3
2 3
2 3
3 4
next
heart
heart
heart
heart
continue
heart
continue
yes
yes
close
";

#[tokio::test(start_paused = true)]
async fn test_full_playthrough_reports_once_and_redirects() {
    // Arrange
    let dispatcher = Arc::new(RecordingDispatcher::default());
    let mut controller = controller_with(&dispatcher);
    let mut out = Vec::new();

    // Act
    let destination = app::run(&mut controller, FULL_SCRIPT.as_bytes(), &mut out)
        .await
        .unwrap();

    // Assert
    let yes_destination = controller.content().outcome(Decision::Yes).destination.clone();
    assert_eq!(destination, Some(yes_destination));

    let reports = dispatcher.dispatched();
    assert_eq!(reports.len(), 1);
    let report = &reports[0];
    assert_eq!(
        report.answers.q1.as_deref(),
        Some("A small, quiet moment only we understand")
    );
    assert_eq!(report.answers.q2.as_deref(), Some("Home"));
    assert_eq!(
        report.answers.q3.as_deref(),
        Some("More than you'll ever really know")
    );
    assert_eq!(report.answers.decision, Some(Decision::Yes));
    assert_eq!(report.timestamp, "2026-02-14T10:00:00.000Z");

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Step 1 of 5"));
    assert!(text.contains("Step 4 of 5"));
    assert!(text.contains("Hearts: 5 / 5"));
    assert!(text.contains("*** They said yes! ***"));
    assert!(text.contains("already"));

    let view = controller.view();
    assert!(view.outcome_dismissed);
    assert!(!view.ticker_running);
    assert!(!view.auto_advance_pending);
}

#[tokio::test(start_paused = true)]
async fn test_input_ending_early_sends_nothing() {
    let dispatcher = Arc::new(RecordingDispatcher::default());
    let mut controller = controller_with(&dispatcher);
    let mut out = Vec::new();

    let destination = app::run(&mut controller, "next\nnext\n1 1\n".as_bytes(), &mut out)
        .await
        .unwrap();

    assert_eq!(destination, None);
    assert!(dispatcher.dispatched().is_empty());
    assert_eq!(controller.view().scene, Scene::Quiz);
}

#[tokio::test(start_paused = true)]
async fn test_quit_stops_without_redirect() {
    let dispatcher = Arc::new(RecordingDispatcher::default());
    let mut controller = controller_with(&dispatcher);
    let mut out = Vec::new();

    let destination = app::run(&mut controller, "quit\nnext\n".as_bytes(), &mut out)
        .await
        .unwrap();

    assert_eq!(destination, None);
    assert_eq!(controller.view().scene, Scene::Welcome);
}

#[tokio::test(start_paused = true)]
async fn test_unknown_and_rejected_commands_are_explained() {
    let dispatcher = Arc::new(RecordingDispatcher::default());
    let mut controller = controller_with(&dispatcher);
    let mut out = Vec::new();

    app::run(&mut controller, "dance\nheart\nyes\n".as_bytes(), &mut out)
        .await
        .unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Unknown command `dance`"));
    assert!(text.contains("validation error"));
    assert!(dispatcher.dispatched().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_completed_quiz_moves_to_game_on_its_own() {
    // Arrange
    let dispatcher = Arc::new(RecordingDispatcher::default());
    let mut controller = controller_with(&dispatcher);
    let (reader, mut writer) = tokio::io::duplex(1024);
    let mut out = Vec::new();

    let script = async move {
        writer
            .write_all(b"next\nnext\n1 1\n2 1\n3 1\n")
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_secs(2)).await;
        writer.write_all(b"heart\nquit\n").await.unwrap();
    };

    // Act
    let (result, ()) = tokio::join!(
        app::run(&mut controller, BufReader::new(reader), &mut out),
        script
    );

    // Assert
    assert_eq!(result.unwrap(), None);
    let view = controller.view();
    assert_eq!(view.scene, Scene::Game);
    assert_eq!(view.hearts_collected, 1);
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("A tiny game before the truth"));
}
