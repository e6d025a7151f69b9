//! Pure tic-tac-toe rules and a greedy computer opponent.
//!
//! - [`Board`], [`Cell`], [`Mark`], [`Position`]: board state
//! - [`rules`]: win and draw evaluation
//! - [`GameState`]: the move engine
//! - [`GreedyOpponent`]: single-ply win, block, random heuristic
//! - [`Outcome`]: results from the human player's side
//!
//! ```
//! use ttt_core::{GameState, GameStatus, Mark, Position};
//!
//! let mut game = GameState::new();
//! let status = game.apply_move(Position::Center, Mark::X)?;
//! assert_eq!(status, GameStatus::InProgress);
//! assert_eq!(game.to_move(), Mark::O);
//! # Ok::<(), ttt_core::MoveError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod engine;
mod opponent;
mod outcome;
pub mod rules;
mod types;

pub use engine::{GameState, GameStatus, MoveError};
pub use opponent::{Choice, GreedyOpponent, completing_move};
pub use outcome::Outcome;
pub use types::{Board, Cell, Mark, Position};
