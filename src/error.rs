//! Error types for the reversi engine.

use crate::game_repr::{Coord, PlayerId};
use thiserror::Error;

/// Errors that can occur while driving a game.
///
/// Out-of-range coordinates are not represented here: they are caller bugs
/// and panic in [`Coord::new`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The target cell is occupied or the placement would flip nothing
    #[error("illegal move for {player} at {coord}")]
    IllegalMove { coord: Coord, player: PlayerId },

    /// An agent reported no legal moves although the board had one
    #[error("{player} reported no legal moves, but the board has at least one")]
    NoMovesContradiction { player: PlayerId },

    /// A background agent computation is already outstanding
    #[error("an agent move is already being computed")]
    AgentBusy,

    /// There is no background agent computation to collect
    #[error("no agent turn is in progress")]
    NoPendingTurn,

    /// The background worker went away without delivering a result
    #[error("background agent worker disconnected before reporting a move")]
    AgentDisconnected,

    /// The operation needs an agent but a human is to move
    #[error("{player} is human and must supply a move")]
    HumanToMove { player: PlayerId },

    /// An automatic run did not finish within its turn budget
    #[error("game did not finish within {turns} turns")]
    TurnLimit { turns: usize },

    /// A board layout string could not be parsed
    #[error("invalid board layout: {reason}")]
    InvalidLayout { reason: String },
}
