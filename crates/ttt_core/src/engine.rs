//! Move engine: applies moves and detects the end of the game.

use crate::rules::{check_win, is_draw, winning_lines};
use crate::{Board, Cell, Mark, Position};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Current status of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Game is ongoing.
    InProgress,
    /// Game ended with `Mark` completing a line.
    Won(Mark),
    /// Board filled with no completed line.
    Draw,
}

impl GameStatus {
    /// Returns true once the game has ended.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

/// Reasons a move is refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum MoveError {
    /// The game has already ended.
    #[display("Game is already over")]
    GameOver,
    /// The mark is not the side to move.
    #[display("It is not {}'s turn", _0)]
    WrongTurn(#[error(not(source))] Mark),
    /// The target cell already holds a mark.
    #[display("{} is already occupied", _0)]
    Occupied(#[error(not(source))] Position),
    /// Index outside 0-8.
    #[display("Position {} out of bounds (must be 0-8)", _0)]
    OutOfBounds(#[error(not(source))] usize),
}

/// Board, side to move and status of one game.
///
/// The state only ever moves forward: cells are filled one at a time and
/// once the status is terminal every further move is refused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    board: Board,
    to_move: Mark,
    status: GameStatus,
    history: Vec<Position>,
}

impl GameState {
    /// Creates a new game with X to move.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            to_move: Mark::X,
            status: GameStatus::InProgress,
            history: Vec::new(),
        }
    }

    /// Creates an in-progress game from an arbitrary board.
    ///
    /// History is unknown for such a board and starts empty.
    pub fn from_board(board: Board, to_move: Mark) -> Self {
        Self {
            board,
            to_move,
            status: GameStatus::InProgress,
            history: Vec::new(),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the side to move.
    pub fn to_move(&self) -> Mark {
        self.to_move
    }

    /// Returns the game status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Positions played so far, in order.
    pub fn history(&self) -> &[Position] {
        &self.history
    }

    /// Checks a move without applying it.
    pub fn validate(&self, pos: Position, mark: Mark) -> Result<(), MoveError> {
        if self.status.is_terminal() {
            return Err(MoveError::GameOver);
        }
        if mark != self.to_move {
            return Err(MoveError::WrongTurn(mark));
        }
        if !self.board.is_empty(pos) {
            return Err(MoveError::Occupied(pos));
        }
        Ok(())
    }

    /// Places `mark` at `pos` and returns the resulting status.
    ///
    /// A win is checked before a draw, so a move that fills the last cell
    /// and completes a line is a win. On a refused move nothing changes.
    #[instrument(skip(self), fields(to_move = ?self.to_move))]
    pub fn apply_move(&mut self, pos: Position, mark: Mark) -> Result<GameStatus, MoveError> {
        self.validate(pos, mark)?;

        self.board.set(pos, Cell::Occupied(mark));
        self.history.push(pos);

        self.status = if check_win(&self.board, mark) {
            GameStatus::Won(mark)
        } else if is_draw(&self.board) {
            GameStatus::Draw
        } else {
            self.to_move = mark.opponent();
            GameStatus::InProgress
        };

        debug!(status = ?self.status, "Move applied");
        Ok(self.status)
    }

    /// Same as [`GameState::apply_move`] for a raw board index.
    pub fn apply_index(&mut self, index: usize, mark: Mark) -> Result<GameStatus, MoveError> {
        let pos = Position::from_index(index).ok_or(MoveError::OutOfBounds(index))?;
        self.apply_move(pos, mark)
    }

    /// Cells on every line completed by the winner, ascending.
    ///
    /// Empty unless the game was won.
    pub fn winning_cells(&self) -> Vec<Position> {
        let GameStatus::Won(winner) = self.status else {
            return Vec::new();
        };
        let mut cells: Vec<Position> = winning_lines(&self.board, winner)
            .into_iter()
            .flatten()
            .collect();
        cells.sort();
        cells.dedup();
        cells
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
