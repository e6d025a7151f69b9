//! Draw detection logic for tic-tac-toe.

use crate::{Board, Cell};
use tracing::instrument;

/// Checks if every cell is occupied.
///
/// This does not rule out a win: a full board can also hold a complete
/// line. The engine checks for a win before asking this.
#[instrument(level = "trace")]
pub fn is_draw(board: &Board) -> bool {
    board.cells().iter().all(|c| *c != Cell::Empty)
}
