//! Game rules for tic-tac-toe.
//!
//! Pure functions for evaluating a board. Rules are kept apart from the
//! move engine so the opponent can query hypothetical boards with them.

pub mod draw;
pub mod win;

pub use draw::is_draw;
pub use win::{WINNING_LINES, check_win, winning_lines};
