//! Game controller: turn sequencing for one human against the computer.
//!
//! A turn runs in two phases. [`GameController::submit_human_move`] places
//! the human's mark and, if the game goes on, leaves the session waiting for
//! the computer. [`GameController::resolve_computer_move`] then plays the
//! computer's reply. [`GameController::play_human_turn`] runs both with the
//! configured pause in between, taken through the injected [`Scheduler`].
//!
//! Human input that arrives while the computer is pending, after the game
//! has ended, or for an occupied cell is ignored and changes nothing.

use crate::config::GameConfig;
use crate::notifier::Notifier;
use crate::reward::{generate_promo_code, loss_notification, win_notification};
use crate::scheduler::Scheduler;
use derive_getters::Getters;
use rand::Rng;
use tracing::{debug, error, info, instrument};
use ttt_core::{
    Board, Choice, GameState, GameStatus, GreedyOpponent, Mark, MoveError, Outcome, Position,
};

/// Where the session is in the turn cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum Phase {
    /// Waiting for the human to pick a cell.
    HumanTurn,
    /// Human has moved; the computer's reply is scheduled.
    ComputerPending,
    /// Game over. Only a restart leaves this phase.
    Terminal,
}

/// Why an input was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The game has ended.
    GameOver,
    /// The computer's reply is still pending.
    AwaitingComputer,
    /// Computer move requested while it is not the computer's turn.
    NotComputerTurn,
    /// The engine refused the move.
    Refused(MoveError),
}

/// End-of-game information for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Getters, derive_new::new)]
pub struct GameReport {
    /// Result from the human's side.
    outcome: Outcome,
    /// Cells on every completed line, ascending. Empty for a draw.
    winning_cells: Vec<Position>,
    /// Reward shown to a winner.
    promo_code: Option<String>,
}

impl GameReport {
    /// Heading of the end-of-game message block.
    pub fn headline(&self) -> &'static str {
        match self.outcome {
            Outcome::Win => "Victory!",
            Outcome::Loss => "Defeat",
            Outcome::Draw => "Draw!",
        }
    }
}

/// What a controller call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnReport {
    /// Nothing changed.
    Ignored(IgnoreReason),
    /// The human's mark is placed and the computer will reply.
    AwaitingComputer,
    /// The computer replied here and it is the human's turn again.
    ComputerMoved(Position),
    /// The last move ended the game.
    Finished(GameReport),
}

/// Board and turn state of one game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    game: GameState,
    phase: Phase,
}

impl Session {
    /// Fresh session: empty board, X to move.
    pub fn new() -> Self {
        Self {
            game: GameState::new(),
            phase: Phase::HumanTurn,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The board.
    pub fn board(&self) -> &Board {
        self.game.board()
    }

    /// Mark expected to move next.
    pub fn current_mark(&self) -> Mark {
        self.game.to_move()
    }

    /// False once the game has ended.
    pub fn is_active(&self) -> bool {
        self.phase != Phase::Terminal
    }

    /// True while the computer's reply is pending. Human input is dropped.
    pub fn is_awaiting_opponent(&self) -> bool {
        self.phase == Phase::ComputerPending
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Drives one session against the greedy opponent.
pub struct GameController<N, S, R> {
    session: Session,
    opponent: GreedyOpponent<R>,
    notifier: N,
    scheduler: S,
    config: GameConfig,
    report: Option<GameReport>,
}

impl<N, S, R> GameController<N, S, R>
where
    N: Notifier,
    S: Scheduler,
    R: Rng,
{
    /// Creates a controller with a fresh session.
    pub fn new(notifier: N, scheduler: S, rng: R, config: GameConfig) -> Self {
        Self {
            session: Session::new(),
            opponent: GreedyOpponent::new(Mark::COMPUTER, rng),
            notifier,
            scheduler,
            config,
            report: None,
        }
    }

    /// Current session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The board.
    pub fn board(&self) -> &Board {
        self.session.board()
    }

    /// End-of-game report, once the game is over.
    pub fn report(&self) -> Option<&GameReport> {
        self.report.as_ref()
    }

    /// Status line for the current phase.
    pub fn status_text(&self) -> &'static str {
        match (self.session.phase, &self.report) {
            (Phase::Terminal, Some(report)) => report.outcome().message(),
            (Phase::HumanTurn, _) => "Your move (X)",
            (Phase::ComputerPending, _) => "Computer is thinking...",
            (Phase::Terminal, None) => "Game over",
        }
    }

    /// Starts a new game.
    #[instrument(skip(self))]
    pub fn restart(&mut self) {
        info!("Starting new game");
        self.session = Session::new();
        self.report = None;
    }

    /// Places the human's mark at board `index`.
    #[instrument(skip(self), fields(phase = %self.session.phase))]
    pub fn submit_human_move(&mut self, index: usize) -> TurnReport {
        match self.session.phase {
            Phase::Terminal => return self.ignore(IgnoreReason::GameOver),
            Phase::ComputerPending => return self.ignore(IgnoreReason::AwaitingComputer),
            Phase::HumanTurn => {}
        }

        match self.session.game.apply_index(index, Mark::HUMAN) {
            Ok(GameStatus::InProgress) => {
                self.session.phase = Phase::ComputerPending;
                debug!("Human moved, computer reply pending");
                TurnReport::AwaitingComputer
            }
            Ok(_) => self.finish(),
            Err(e) => self.ignore(IgnoreReason::Refused(e)),
        }
    }

    /// Plays the computer's reply to the pending human move.
    #[instrument(skip(self), fields(phase = %self.session.phase))]
    pub fn resolve_computer_move(&mut self) -> TurnReport {
        if self.session.phase != Phase::ComputerPending {
            return self.ignore(IgnoreReason::NotComputerTurn);
        }

        let choice = self.opponent.choose(self.session.board());
        if choice == Choice::Exhausted {
            error!("Computer reply requested on a full board");
        }
        let pos = choice.position();

        match self.session.game.apply_move(pos, Mark::COMPUTER) {
            Ok(GameStatus::InProgress) => {
                self.session.phase = Phase::HumanTurn;
                debug!(position = ?pos, choice = ?choice, "Computer moved");
                TurnReport::ComputerMoved(pos)
            }
            Ok(_) => self.finish(),
            Err(e) => {
                // Hand the turn back only if the engine expects the human next.
                self.session.phase = if self.session.current_mark() == Mark::HUMAN {
                    Phase::HumanTurn
                } else {
                    Phase::Terminal
                };
                error!(
                    error = %e,
                    position = ?pos,
                    phase = %self.session.phase,
                    "Computer move refused"
                );
                TurnReport::Ignored(IgnoreReason::Refused(e))
            }
        }
    }

    /// Takes the configured pause, then plays the computer's reply.
    #[instrument(skip(self))]
    pub async fn await_computer_move(&mut self) -> TurnReport {
        if self.session.phase != Phase::ComputerPending {
            return self.ignore(IgnoreReason::NotComputerTurn);
        }

        self.scheduler.delay(self.config.computer_delay()).await;
        self.resolve_computer_move()
    }

    /// Plays a full turn: the human's move, the pause, then the reply.
    #[instrument(skip(self))]
    pub async fn play_human_turn(&mut self, index: usize) -> TurnReport {
        let report = self.submit_human_move(index);
        if report != TurnReport::AwaitingComputer {
            return report;
        }
        self.await_computer_move().await
    }

    fn ignore(&self, reason: IgnoreReason) -> TurnReport {
        debug!(reason = ?reason, "Input ignored");
        TurnReport::Ignored(reason)
    }

    /// Freezes the session, builds the report and sends the notification.
    fn finish(&mut self) -> TurnReport {
        self.session.phase = Phase::Terminal;

        let Some(outcome) = Outcome::from_status(self.session.game.status()) else {
            error!("Finish called on a game still in progress");
            return TurnReport::Ignored(IgnoreReason::GameOver);
        };

        let promo_code = match outcome {
            Outcome::Win => {
                let code =
                    generate_promo_code(self.opponent.rng_mut(), self.config.promo_code_len());
                self.notifier.notify(win_notification(&code));
                Some(code)
            }
            Outcome::Loss => {
                self.notifier.notify(loss_notification());
                None
            }
            Outcome::Draw => None,
        };

        let report = GameReport::new(outcome, self.session.game.winning_cells(), promo_code);
        info!(outcome = %outcome, winning_cells = ?report.winning_cells(), "Game over");
        self.report = Some(report.clone());
        TurnReport::Finished(report)
    }
}
