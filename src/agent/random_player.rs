// Agent player that picks a uniformly random legal move

use crate::agent::player::{MoveOutcome, Player, PlayerKind};
use crate::game_repr::{Board, Coord, PlayerId, BOARD_WIDTH};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Agent that samples random cells until it finds a legal one.
///
/// Sampling only starts after [`Board::has_any_legal_move`] succeeds, so the
/// loop always finds a placement.
#[derive(Debug, Clone)]
pub struct RandomPlayer {
    /// Source of randomness; seeded players replay identical games
    rng: StdRng,
    /// Display name for this agent
    name: String,
}

impl RandomPlayer {
    /// Create a new agent seeded from system entropy.
    ///
    /// # Arguments
    ///
    /// * `name` - Display name for this agent
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            rng: StdRng::from_entropy(),
            name: name.into(),
        }
    }

    /// Create an agent whose choices are fully determined by `seed`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use reversi_engine::agent::{MoveOutcome, Player, RandomPlayer};
    /// use reversi_engine::game_repr::{Board, PlayerId};
    ///
    /// let mut first = Board::new();
    /// let mut second = Board::new();
    /// let a = RandomPlayer::with_seed(7, "Bot").attempt_move(&mut first, PlayerId::A, None);
    /// let b = RandomPlayer::with_seed(7, "Bot").attempt_move(&mut second, PlayerId::A, None);
    /// assert_eq!(a, b);
    /// ```
    pub fn with_seed(seed: u64, name: impl Into<String>) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            name: name.into(),
        }
    }

    fn sample(&mut self) -> Coord {
        Coord::new(self.rng.gen_range(0..BOARD_WIDTH), self.rng.gen_range(0..BOARD_WIDTH))
    }
}

impl Default for RandomPlayer {
    fn default() -> Self {
        Self::new("Computer")
    }
}

impl Player for RandomPlayer {
    /// Pick a random legal cell and place a tile there.
    ///
    /// The requested coordinate is ignored. Returns `NoLegalMoves` without
    /// sampling when the player is stuck.
    fn attempt_move(&mut self, board: &mut Board, player: PlayerId, _requested: Option<Coord>) -> MoveOutcome {
        if !board.has_any_legal_move(player) {
            return MoveOutcome::NoLegalMoves;
        }

        let mut samples = 0u32;
        loop {
            let coord = self.sample();
            samples += 1;
            if !board.is_legal_move(coord, player) {
                continue;
            }

            log::debug!("[{}] chose {coord} after {samples} samples", self.name);
            return match board.apply_move(coord, player) {
                Ok(changes) => MoveOutcome::Applied { coord, changes },
                Err(err) => {
                    log::error!("[{}] {err}", self.name);
                    MoveOutcome::Rejected
                }
            };
        }
    }

    fn kind(&self) -> PlayerKind {
        PlayerKind::Agent
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plays_a_legal_opening_move() {
        let mut board = Board::new();
        let legal = board.legal_moves(PlayerId::A);
        let mut player = RandomPlayer::with_seed(42, "Bot");

        match player.attempt_move(&mut board, PlayerId::A, None) {
            MoveOutcome::Applied { coord, changes } => {
                assert!(legal.contains(&coord));
                assert_eq!(changes.len(), 2);
            }
            other => panic!("expected Applied, got {other:?}"),
        }
    }

    #[test]
    fn test_ignores_requested_coordinate() {
        let mut board = Board::new();
        let mut player = RandomPlayer::with_seed(1, "Bot");

        // (0,0) can never be played on the opening board
        let outcome = player.attempt_move(&mut board, PlayerId::A, Some(Coord::new(0, 0)));
        assert!(matches!(outcome, MoveOutcome::Applied { .. }));
        assert!(board.occupant(Coord::new(0, 0)).is_empty());
    }

    #[test]
    fn test_no_legal_moves_skips_sampling() {
        let mut board = Board::from_layout(&"A".repeat(64)).unwrap();
        let mut player = RandomPlayer::with_seed(3, "Bot");

        assert_eq!(player.attempt_move(&mut board, PlayerId::B, None), MoveOutcome::NoLegalMoves);
        assert_eq!(board.count(PlayerId::A), 64);
    }

    #[test]
    fn test_same_seed_same_choices() {
        let mut first = RandomPlayer::with_seed(99, "Bot");
        let mut second = RandomPlayer::with_seed(99, "Bot");
        let mut board_a = Board::new();
        let mut board_b = Board::new();

        for player in [PlayerId::A, PlayerId::B, PlayerId::A, PlayerId::B] {
            let a = first.attempt_move(&mut board_a, player, None);
            let b = second.attempt_move(&mut board_b, player, None);
            assert_eq!(a, b);
        }
        assert_eq!(board_a, board_b);
    }

    #[test]
    fn test_kind() {
        let player = RandomPlayer::default();
        assert_eq!(player.kind(), PlayerKind::Agent);
        assert_eq!(player.kind().to_string(), "Computer");
        assert_eq!(player.name(), "Computer");
    }
}
