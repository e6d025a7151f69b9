//! Win detection logic for tic-tac-toe.

use crate::{Board, Cell, Mark, Position};
use tracing::instrument;

/// The eight winning lines: rows, then columns, then diagonals.
pub const WINNING_LINES: [[Position; 3]; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [Position::MiddleLeft, Position::Center, Position::MiddleRight],
    [Position::BottomLeft, Position::BottomCenter, Position::BottomRight],
    // Columns
    [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft],
    [Position::TopCenter, Position::Center, Position::BottomCenter],
    [Position::TopRight, Position::MiddleRight, Position::BottomRight],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

fn line_is(board: &Board, line: &[Position; 3], mark: Mark) -> bool {
    line.iter().all(|&pos| board.get(pos) == Cell::Occupied(mark))
}

/// Returns true if `mark` holds all three cells of at least one line.
#[instrument(level = "trace")]
pub fn check_win(board: &Board, mark: Mark) -> bool {
    WINNING_LINES.iter().any(|line| line_is(board, line, mark))
}

/// Returns every line held entirely by `mark`.
///
/// More than one line can be complete at once (a move that closes a row
/// and a diagonal), so callers that highlight cells should use all of them.
#[instrument(level = "trace")]
pub fn winning_lines(board: &Board, mark: Mark) -> Vec<[Position; 3]> {
    WINNING_LINES
        .iter()
        .filter(|line| line_is(board, line, mark))
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_winner_empty_board() {
        let board = Board::new();
        assert!(!check_win(&board, Mark::X));
        assert!(!check_win(&board, Mark::O));
    }

    #[test]
    fn test_winner_top_row() {
        let board: Board = "XXX OO_ ___".parse().unwrap();
        assert!(check_win(&board, Mark::X));
        assert!(!check_win(&board, Mark::O));
    }

    #[test]
    fn test_winner_anti_diagonal() {
        let board: Board = "X_O XO_ O_X".parse().unwrap();
        assert!(check_win(&board, Mark::O));
        assert_eq!(
            winning_lines(&board, Mark::O),
            vec![[Position::TopRight, Position::Center, Position::BottomLeft]]
        );
    }

    #[test]
    fn test_no_winner_incomplete() {
        let board: Board = "XX_ ___ ___".parse().unwrap();
        assert!(!check_win(&board, Mark::X));
        assert!(winning_lines(&board, Mark::X).is_empty());
    }

    #[test]
    fn test_two_lines_at_once() {
        // X closes the top row and the left column with the same move.
        let board: Board = "XXX XOO XOO".parse().unwrap();
        let lines = winning_lines(&board, Mark::X);
        assert_eq!(lines.len(), 2);
        assert!(lines.contains(&WINNING_LINES[0]));
        assert!(lines.contains(&WINNING_LINES[3]));
    }
}
