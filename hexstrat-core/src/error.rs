//! Rejection reasons for player intents
//!
//! Every variant is a recoverable outcome of an invalid intent. A rejected
//! intent leaves the session exactly as it was.

use crate::board::Cell;
use crate::session::Phase;

/// Error types for game actions
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("cell {0} is occupied")]
    CellOccupied(Cell),

    #[error("cell {0} has no unit")]
    CellEmpty(Cell),

    #[error("roster is full ({0} units max)")]
    RosterFull(i32),

    #[error("cell {0} is outside the placement zone")]
    InvalidZone(Cell),

    #[error("target {0} is out of range")]
    OutOfRange(Cell),

    #[error("cannot climb onto {0} from this side")]
    TerrainBlocked(Cell),

    #[error("no unit selected")]
    NoSelection,

    #[error("not this side's turn")]
    WrongTurn,

    #[error("cell {0} is off the board")]
    OutOfBounds(Cell),

    #[error("action not available during {0:?}")]
    WrongPhase(Phase),

    #[error("game is over")]
    GameOver,

    #[error("a unit is already selected")]
    SelectionActive,

    #[error("no enemy unit at {0}")]
    FriendlyTarget(Cell),
}

pub type Result<T> = std::result::Result<T, GameError>;
