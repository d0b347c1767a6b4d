//! The interactive loop: reads commands, feeds timer signals to the
//! controller and redraws the terminal.

use std::io::Write;

use heartline_core::error::DomainError;
use heartline_journey::application::controller::JourneyController;
use heartline_journey::application::timers::Signal;
use heartline_journey::domain::scene::Scene;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use crate::error::PlayerError;
use crate::input::{self, PlayerAction};
use crate::render;

enum Flow {
    Continue,
    Quit,
    Redirect(String),
}

/// Plays the card until the player quits, input ends, or the closing
/// presentation is dismissed. Returns the external destination in the last
/// case.
///
/// # Errors
///
/// Returns `PlayerError::Io` if reading input or writing output fails.
pub async fn run<R, W>(
    controller: &mut JourneyController,
    input: R,
    out: &mut W,
) -> Result<Option<String>, PlayerError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    controller.start();
    redraw(controller, out)?;

    let mut lines = input.lines();
    let outcome = loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    debug!("input closed");
                    break None;
                };
                match step(controller, &line, out)? {
                    Flow::Continue => {}
                    Flow::Quit => break None,
                    Flow::Redirect(destination) => break Some(destination),
                }
            }
            Some(signal) = controller.next_signal() => {
                on_signal(controller, signal, out)?;
            }
        }
    };

    controller.shutdown();
    Ok(outcome)
}

fn redraw<W: Write>(controller: &JourneyController, out: &mut W) -> Result<(), PlayerError> {
    let text = render::render_scene(&controller.view(), controller.content());
    write!(out, "{text}\n> ")?;
    out.flush()?;
    Ok(())
}

fn step<W: Write>(
    controller: &mut JourneyController,
    line: &str,
    out: &mut W,
) -> Result<Flow, PlayerError> {
    let Some(action) = input::parse(line) else {
        write!(out, "> ")?;
        out.flush()?;
        return Ok(Flow::Continue);
    };

    let changed = match action {
        PlayerAction::Next => controller.advance(),
        PlayerAction::Back => controller.retreat(),
        PlayerAction::Answer { key, option } => {
            report(controller.answer(key, option).map(|_| ()), out)?
        }
        PlayerAction::Heart => report(controller.collect_heart().map(|_| ()), out)?,
        PlayerAction::Continue => controller.continue_to_decision(),
        PlayerAction::Decide(decision) => report(controller.decide(decision), out)?,
        PlayerAction::Dismiss => match controller.dismiss_outcome() {
            Ok(destination) => return Ok(Flow::Redirect(destination)),
            Err(e) => report(Err(e), out)?,
        },
        PlayerAction::Help => {
            write!(out, "{}", render::HELP)?;
            false
        }
        PlayerAction::Quit => return Ok(Flow::Quit),
        PlayerAction::Unknown(text) => {
            writeln!(out, "Unknown command `{text}`. Type `help` for the list.")?;
            false
        }
    };

    if changed {
        redraw(controller, out)?;
    } else {
        write!(out, "> ")?;
        out.flush()?;
    }
    Ok(Flow::Continue)
}

/// Prints a rejected action and returns whether the action went through.
fn report<W: Write>(
    result: Result<(), DomainError>,
    out: &mut W,
) -> Result<bool, PlayerError> {
    match result {
        Ok(()) => Ok(true),
        Err(e) => {
            writeln!(out, "{e}")?;
            Ok(false)
        }
    }
}

fn on_signal<W: Write>(
    controller: &mut JourneyController,
    signal: Signal,
    out: &mut W,
) -> Result<(), PlayerError> {
    let before = controller.view().scene;
    let is_tick = matches!(signal, Signal::Tick(_));
    controller.handle_signal(signal);
    let view = controller.view();

    if view.scene != before {
        redraw(controller, out)?;
    } else if is_tick && view.scene == Scene::Welcome {
        if let Some(elapsed) = &view.elapsed {
            write!(out, "\rTogether for {}  > ", render::render_elapsed(elapsed))?;
            out.flush()?;
        }
    }
    Ok(())
}
