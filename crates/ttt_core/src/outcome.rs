//! Game results seen from the human player's side.

use crate::{GameStatus, Mark};
use serde::{Deserialize, Serialize};

/// How a finished game ended for the human (X).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum Outcome {
    /// The human completed a line.
    Win,
    /// The computer completed a line.
    Loss,
    /// Nobody completed a line.
    Draw,
}

impl Outcome {
    /// Maps a terminal status to an outcome. `None` while in progress.
    pub fn from_status(status: GameStatus) -> Option<Self> {
        match status {
            GameStatus::InProgress => None,
            GameStatus::Won(Mark::X) => Some(Outcome::Win),
            GameStatus::Won(Mark::O) => Some(Outcome::Loss),
            GameStatus::Draw => Some(Outcome::Draw),
        }
    }

    /// Status line shown once the game is over.
    pub fn message(&self) -> &'static str {
        match self {
            Outcome::Win => "You won",
            Outcome::Loss => "You lost",
            Outcome::Draw => "Draw",
        }
    }
}
