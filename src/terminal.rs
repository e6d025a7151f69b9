//! Line-based terminal front-end.
//!
//! Reads a cell (0-8 or a label such as `center`) per line from stdin and
//! redraws the board after every turn. `restart` starts over, `quit` exits.

use crate::controller::{GameController, GameReport, TurnReport};
use crate::notifier::Notifier;
use crate::scheduler::Scheduler;
use anyhow::Result;
use rand::Rng;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, instrument};
use ttt_core::{Board, Cell, Position};

/// A line of player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Play at a cell.
    Move(Position),
    /// Start a new game.
    Restart,
    /// Leave the program.
    Quit,
    /// Anything unrecognised.
    Unknown,
}

impl Command {
    /// Parses one input line.
    pub fn parse(line: &str) -> Self {
        match line.trim().to_lowercase().as_str() {
            "q" | "quit" | "exit" => Command::Quit,
            "r" | "restart" | "new" => Command::Restart,
            other => Position::parse(other).map_or(Command::Unknown, Command::Move),
        }
    }
}

/// Draws the board, bracketing highlighted cells.
pub fn render_board(board: &Board, highlight: &[Position]) -> String {
    let mut rows = Vec::with_capacity(3);
    for row in Position::ALL.chunks(3) {
        let cells: Vec<String> = row
            .iter()
            .map(|&pos| {
                let symbol = match board.get(pos) {
                    Cell::Empty => pos.to_index().to_string(),
                    Cell::Occupied(mark) => mark.to_string(),
                };
                if highlight.contains(&pos) {
                    format!("[{}]", symbol)
                } else {
                    format!(" {} ", symbol)
                }
            })
            .collect();
        rows.push(cells.join("|"));
    }
    rows.join("\n---+---+---\n")
}

/// End-of-game message block.
pub fn render_report(report: &GameReport) -> String {
    match report.promo_code() {
        Some(code) => format!("{}\nPromo code issued: {}", report.headline(), code),
        None => report.headline().to_string(),
    }
}

fn draw<N, S, R, W>(controller: &GameController<N, S, R>, out: &mut W) -> Result<()>
where
    N: Notifier,
    S: Scheduler,
    R: Rng,
    W: Write,
{
    let highlight = controller
        .report()
        .map(|r| r.winning_cells().clone())
        .unwrap_or_default();
    writeln!(out, "\n{}\n", render_board(controller.board(), &highlight))?;
    writeln!(out, "{}", controller.status_text())?;
    if let Some(report) = controller.report() {
        writeln!(out, "\n{}", render_report(report))?;
        writeln!(out, "Type `restart` to play again or `quit` to leave.")?;
    }
    out.flush()?;
    Ok(())
}

/// Applies one line of input and writes what the player sees to `out`.
///
/// A move is drawn as soon as it is placed, so the pending status shows
/// during the computer's pause. Returns `false` once the player quits.
pub async fn handle_line<N, S, R, W>(
    controller: &mut GameController<N, S, R>,
    line: &str,
    out: &mut W,
) -> Result<bool>
where
    N: Notifier,
    S: Scheduler,
    R: Rng,
    W: Write,
{
    match Command::parse(line) {
        Command::Quit => return Ok(false),
        Command::Restart => controller.restart(),
        Command::Move(pos) => {
            let mut report = controller.submit_human_move(pos.to_index());
            if report == TurnReport::AwaitingComputer {
                draw(controller, out)?;
                report = controller.await_computer_move().await;
            }
            debug!(report = ?report, "Turn finished");
            if let TurnReport::Ignored(reason) = report {
                writeln!(out, "Move ignored: {:?}", reason)?;
            }
        }
        Command::Unknown => {
            writeln!(
                out,
                "Enter a cell 0-8 (or a name like `center`), `restart` or `quit`."
            )?;
            return Ok(true);
        }
    }
    draw(controller, out)?;
    Ok(true)
}

/// Runs the interactive loop until `quit` or end of input.
#[instrument(skip_all)]
pub async fn run<N, S, R>(controller: &mut GameController<N, S, R>) -> Result<()>
where
    N: Notifier,
    S: Scheduler,
    R: Rng,
{
    info!("Starting terminal game");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut out = std::io::stdout();
    draw(controller, &mut out)?;

    while let Some(line) = lines.next_line().await? {
        if !handle_line(controller, &line, &mut out).await? {
            break;
        }
    }

    info!("Terminal game closed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::notifier::RecordingNotifier;
    use crate::scheduler::ImmediateScheduler;
    use rand::rngs::mock::StepRng;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("4"), Command::Move(Position::Center));
        assert_eq!(Command::parse("Top-Left"), Command::Move(Position::TopLeft));
        assert_eq!(Command::parse(" quit "), Command::Quit);
        assert_eq!(Command::parse("restart"), Command::Restart);
        assert_eq!(Command::parse("11"), Command::Unknown);
    }

    #[test]
    fn test_render_highlights_winning_cells() {
        let board: Board = "XXX OO_ ___".parse().unwrap();
        let text = render_board(
            &board,
            &[Position::TopLeft, Position::TopCenter, Position::TopRight],
        );
        let first = text.lines().next().unwrap();
        assert_eq!(first, "[X]|[X]|[X]");
        assert!(text.contains(" O | O | 5 "));
    }

    fn controller() -> GameController<RecordingNotifier, ImmediateScheduler, StepRng> {
        GameController::new(
            RecordingNotifier::new(),
            ImmediateScheduler,
            StepRng::new(0, 0),
            GameConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_move_shows_thinking_before_reply() {
        let mut controller = controller();
        let mut out = Vec::new();

        assert!(handle_line(&mut controller, "4", &mut out).await.unwrap());

        let text = String::from_utf8(out).unwrap();
        let at = |needle: &str| text.find(needle).unwrap_or_else(|| panic!("missing {}", needle));
        let human_only = at(" 0 | 1 | 2 ");
        let thinking = at("Computer is thinking...");
        let replied = at(" O | 1 | 2 ");
        let your_move = at("Your move (X)");
        assert!(human_only < thinking);
        assert!(thinking < replied);
        assert!(replied < your_move);
    }

    #[tokio::test]
    async fn test_ignored_move_and_quit() {
        let mut controller = controller();
        let mut out = Vec::new();

        handle_line(&mut controller, "9", &mut out).await.unwrap();
        handle_line(&mut controller, "4", &mut out).await.unwrap();
        handle_line(&mut controller, "center", &mut out).await.unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Enter a cell 0-8"));
        assert!(text.contains("Move ignored: Refused(Occupied(Center))"));

        let mut out = Vec::new();
        assert!(!handle_line(&mut controller, "quit", &mut out).await.unwrap());
        assert!(out.is_empty());
    }
}
