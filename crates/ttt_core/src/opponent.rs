//! Greedy single-ply computer opponent.
//!
//! The opponent looks exactly one move ahead: take a win if there is one,
//! otherwise block the human's win, otherwise play a random empty cell.
//! It has no notion of forks, centre or corner control, so correct play
//! by the human always draws or wins against it.

use crate::rules::check_win;
use crate::{Board, Mark, Position};
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, instrument, warn};

/// Why the opponent picked a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    /// Playing here completes a line for the opponent.
    Win(Position),
    /// Playing here stops the human completing a line.
    Block(Position),
    /// No win or block exists; picked uniformly among empty cells.
    Random(Position),
    /// The board had no empty cell. Falls back to position 0.
    Exhausted,
}

impl Choice {
    /// The chosen position.
    pub fn position(&self) -> Position {
        match self {
            Choice::Win(pos) | Choice::Block(pos) | Choice::Random(pos) => *pos,
            Choice::Exhausted => Position::TopLeft,
        }
    }
}

/// Returns the lowest empty position where `mark` would complete a line.
///
/// Candidates are scanned in ascending index order on a copy of the board.
pub fn completing_move(board: &Board, mark: Mark) -> Option<Position> {
    board
        .empty_positions()
        .into_iter()
        .find(|&pos| check_win(&board.with(pos, mark), mark))
}

/// Computer player using the win, block, random heuristic.
#[derive(Debug, Clone)]
pub struct GreedyOpponent<R> {
    mark: Mark,
    rng: R,
}

impl<R: Rng> GreedyOpponent<R> {
    /// Creates an opponent playing `mark`, drawing random moves from `rng`.
    pub fn new(mark: Mark, rng: R) -> Self {
        Self { mark, rng }
    }

    /// Gives access to the random source, e.g. to draw other values from it.
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Chooses a move for the current board.
    #[instrument(skip(self, board), fields(mark = ?self.mark))]
    pub fn choose(&mut self, board: &Board) -> Choice {
        if let Some(pos) = completing_move(board, self.mark) {
            debug!(position = ?pos, "Winning move available");
            return Choice::Win(pos);
        }

        if let Some(pos) = completing_move(board, self.mark.opponent()) {
            debug!(position = ?pos, "Blocking opponent line");
            return Choice::Block(pos);
        }

        match board.empty_positions().choose(&mut self.rng) {
            Some(&pos) => {
                debug!(position = ?pos, "No win or block, picking at random");
                Choice::Random(pos)
            }
            None => {
                warn!("Opponent asked to move on a full board");
                Choice::Exhausted
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn opponent(seed: u64) -> GreedyOpponent<ChaCha8Rng> {
        GreedyOpponent::new(Mark::O, ChaCha8Rng::seed_from_u64(seed))
    }

    #[test]
    fn test_takes_win() {
        let board: Board = "OO_ XX_ X__".parse().unwrap();
        assert_eq!(opponent(1).choose(&board), Choice::Win(Position::TopRight));
    }

    #[test]
    fn test_blocks() {
        let board: Board = "O__ XX_ ___".parse().unwrap();
        assert_eq!(opponent(1).choose(&board), Choice::Block(Position::MiddleRight));
    }

    #[test]
    fn test_lowest_block_wins_tie() {
        // X threatens both 2 (top row) and 6 (left column).
        let board: Board = "XX_ XO_ _O_".parse().unwrap();
        assert_eq!(opponent(3).choose(&board), Choice::Block(Position::TopRight));
    }

    #[test]
    fn test_board_is_not_modified() {
        let board: Board = "OO_ XX_ ___".parse().unwrap();
        let copy = board;
        opponent(7).choose(&board);
        assert_eq!(board, copy);
    }

    #[test]
    fn test_full_board_falls_back_to_zero() {
        let board: Board = "XOX OXX OXO".parse().unwrap();
        let choice = opponent(0).choose(&board);
        assert_eq!(choice, Choice::Exhausted);
        assert_eq!(choice.position(), Position::TopLeft);
    }
}
