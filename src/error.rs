//! Errors reported by engine operations.
//!
//! Every variant aborts the whole operation; the match record is left
//! exactly as it was before the call.

use thiserror::Error;

use crate::core::geometry::{Coord, FleetError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("match not found")]
    NotFound,
    #[error("player is not part of this match")]
    Forbidden,
    #[error("player has already joined this match")]
    AlreadyJoined,
    #[error("match already has two players")]
    GameFull,
    #[error("match is not in the setup phase")]
    NotInSetup,
    #[error("invalid fleet: {0}")]
    InvalidFleet(#[from] FleetError),
    #[error("match is not in the playing phase")]
    WrongPhase,
    #[error("it is not this player's turn")]
    NotYourTurn,
    #[error("no special attacks remaining")]
    NoChargesRemaining,
    #[error("cell {0} has already been attacked")]
    DuplicateAttack(Coord),
    #[error("cell {0} is outside the board")]
    OutOfBounds(Coord),
    #[error("match was modified concurrently too many times, try again")]
    TransientConflict,
    #[error("storage failure: {0}")]
    Storage(String),
}

impl GameError {
    /// Whether the failed operation may succeed if simply resubmitted.
    pub fn is_retryable(&self) -> bool {
        matches!(self, GameError::TransientConflict)
    }
}

impl From<bincode::Error> for GameError {
    fn from(err: bincode::Error) -> Self {
        GameError::Storage(err.to_string())
    }
}
