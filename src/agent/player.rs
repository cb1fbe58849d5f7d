//! Player trait and associated types for reversi game agents.
//!
//! This module provides the core abstraction for entities that can place tiles.
//! Different player types (Human, Agent) implement the `Player` trait to participate
//! in games driven by the [`TurnEngine`](crate::orchestrator::TurnEngine).
//!
//! # Design Philosophy
//!
//! The `Player` trait focuses on **behavior** rather than construction. Different player
//! implementations require different initialization parameters:
//! - `HumanPlayer` only needs a display name; its moves arrive from the view layer
//! - `RandomPlayer` needs a random number generator (seeded for reproducible games)
//!
//! Therefore, the trait does not define a constructor method. Each implementation provides
//! its own constructor tailored to its specific needs.
//!
//! # Synchronous Design
//!
//! `attempt_move()` is synchronous. The engine can run an agent's turn on a background
//! worker (see [`TurnEngine::spawn_agent_turn`](crate::orchestrator::TurnEngine::spawn_agent_turn));
//! in that case the player works on a scratch copy of the board and the engine applies the
//! chosen coordinate to the real board itself.
//!
//! # Examples
//!
//! ```rust
//! use reversi_engine::agent::{HumanPlayer, MoveOutcome, Player};
//! use reversi_engine::game_repr::{Board, Coord, PlayerId};
//!
//! let mut board = Board::new();
//! let mut human = HumanPlayer::new("Alice");
//!
//! // occupied cell: nothing happens
//! let outcome = human.attempt_move(&mut board, PlayerId::A, Some(Coord::new(3, 3)));
//! assert_eq!(outcome, MoveOutcome::Rejected);
//!
//! let outcome = human.attempt_move(&mut board, PlayerId::A, Some(Coord::new(2, 4)));
//! assert!(matches!(outcome, MoveOutcome::Applied { .. }));
//! ```

use crate::game_repr::{Board, ChangeSet, Coord, PlayerId};
use std::fmt;

/// What kind of entity is behind a [`Player`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerKind {
    /// Moves are supplied by the view layer
    Human,
    /// Moves are chosen by the player itself
    Agent,
}

impl fmt::Display for PlayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerKind::Human => write!(f, "Human"),
            PlayerKind::Agent => write!(f, "Computer"),
        }
    }
}

/// Result of asking a player to move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// A tile was placed at `coord`; `changes` lists every mutated cell,
    /// the placed cell first
    Applied { coord: Coord, changes: ChangeSet },
    /// The player has no legal placement
    NoLegalMoves,
    /// The requested placement is missing or illegal; the board is untouched
    Rejected,
}

/// Trait for entities that can place tiles.
///
/// # Required Methods
///
/// `attempt_move()` and `kind()` must be implemented. `name()` has a default.
///
/// ## `attempt_move()`
/// - **Applied**: the player placed a tile and the board was mutated
/// - **Rejected**: nothing was mutated; the same player keeps the turn
/// - **NoLegalMoves**: only valid when `board.has_any_legal_move(player)` is false
///
/// Implementations must only mutate `board` through
/// [`Board::apply_move`], so every placement is validated.
///
/// # Thread Safety
///
/// Players are `Send` so an agent's turn can run on a background worker.
pub trait Player: Send {
    /// Try to place a tile for `player`.
    ///
    /// `requested` is the coordinate picked in the view layer, if any. Agents
    /// ignore it.
    fn attempt_move(&mut self, board: &mut Board, player: PlayerId, requested: Option<Coord>) -> MoveOutcome;

    /// Whether this is a human or an agent.
    fn kind(&self) -> PlayerKind;

    /// Get the display name of this player.
    ///
    /// # Default Implementation
    ///
    /// Returns `"Player"`.
    fn name(&self) -> &str {
        "Player"
    }
}
