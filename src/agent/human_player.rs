//! Human player implementation that gets moves from the view layer.
//!
//! A `HumanPlayer` never decides anything on its own: the presentation shell
//! forwards the clicked cell to [`TurnEngine::submit_move`](crate::orchestrator::TurnEngine::submit_move),
//! which hands it to this player. The player validates it against the board and
//! either places the tile or rejects the click so the user can try again.
//!
//! # Control Flow
//!
//! ```text
//! click (row, col) → TurnEngine::submit_move()
//!     ↓
//! player.attempt_move(board, id, Some(coord))
//!     ↓
//! board.is_legal_move()? ── no ──→ Rejected (turn unchanged)
//!     ↓ yes
//! board.apply_move() → Applied (turn passes)
//! ```

use crate::agent::player::{MoveOutcome, Player, PlayerKind};
use crate::game_repr::{Board, Coord, PlayerId};

/// Human player that makes moves via the view layer.
#[derive(Debug, Clone)]
pub struct HumanPlayer {
    /// Display name for this player
    name: String,
}

impl HumanPlayer {
    /// Create a new human player.
    ///
    /// # Arguments
    ///
    /// * `name` - Display name for this player
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for HumanPlayer {
    fn default() -> Self {
        Self::new("Human")
    }
}

impl Player for HumanPlayer {
    fn attempt_move(&mut self, board: &mut Board, player: PlayerId, requested: Option<Coord>) -> MoveOutcome {
        let coord = match requested {
            Some(coord) => coord,
            None => {
                log::warn!("[{}] no cell selected", self.name);
                return MoveOutcome::Rejected;
            }
        };

        if !board.is_legal_move(coord, player) {
            log::warn!("[{}] illegal move at {coord}", self.name);
            return MoveOutcome::Rejected;
        }

        match board.apply_move(coord, player) {
            Ok(changes) => MoveOutcome::Applied { coord, changes },
            Err(err) => {
                log::warn!("[{}] {err}", self.name);
                MoveOutcome::Rejected
            }
        }
    }

    fn kind(&self) -> PlayerKind {
        PlayerKind::Human
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_repr::Occupant;

    #[test]
    fn test_missing_coordinate_is_rejected() {
        let mut board = Board::new();
        let mut player = HumanPlayer::default();

        assert_eq!(player.attempt_move(&mut board, PlayerId::A, None), MoveOutcome::Rejected);
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_illegal_coordinate_is_rejected() {
        let mut board = Board::new();
        let mut player = HumanPlayer::new("Alice");

        // empty but flips nothing
        let outcome = player.attempt_move(&mut board, PlayerId::A, Some(Coord::new(0, 0)));
        assert_eq!(outcome, MoveOutcome::Rejected);
        // the other player's opening square
        let outcome = player.attempt_move(&mut board, PlayerId::A, Some(Coord::new(2, 3)));
        assert_eq!(outcome, MoveOutcome::Rejected);

        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_legal_coordinate_is_applied() {
        let mut board = Board::new();
        let mut player = HumanPlayer::new("Alice");

        let outcome = player.attempt_move(&mut board, PlayerId::A, Some(Coord::new(3, 5)));
        match outcome {
            MoveOutcome::Applied { coord, changes } => {
                assert_eq!(coord, Coord::new(3, 5));
                assert_eq!(changes.len(), 2);
            }
            other => panic!("expected Applied, got {other:?}"),
        }
        assert_eq!(board.occupant(Coord::new(3, 4)), Occupant::Player(PlayerId::A));
    }

    #[test]
    fn test_kind_and_name() {
        let player = HumanPlayer::new("Alice");
        assert_eq!(player.kind(), PlayerKind::Human);
        assert_eq!(player.name(), "Alice");
        assert_eq!(player.kind().to_string(), "Human");
    }
}
