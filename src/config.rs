//! Game configuration types.
//!
//! A [`GameConfig`] holds everything needed to build the two players of a
//! game; [`TurnEngine::new`](crate::orchestrator::TurnEngine::new) consumes it.

use crate::agent::{HumanPlayer, Player, RandomPlayer};
use crate::game_repr::PlayerId;

/// Configuration for a single player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerConfig {
    /// Human player whose moves come from the view layer
    Human,
    /// Random-move agent; a seed makes its choices reproducible
    Agent { seed: Option<u64> },
}

/// Game mode selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// Player vs Player - two humans
    PvP,
    /// Player vs AI - one human, one agent
    PvAI,
    /// AI vs AI - two agents (computer simulation)
    AIvAI,
}

/// Complete game configuration.
///
/// Contains the game mode and player configurations for both sides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// The selected game mode
    pub mode: GameMode,
    /// Configuration for player A (moves first)
    pub player_a: PlayerConfig,
    /// Configuration for player B
    pub player_b: PlayerConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::pvp()
    }
}

impl GameConfig {
    /// Create a PvP game configuration.
    pub fn pvp() -> Self {
        Self {
            mode: GameMode::PvP,
            player_a: PlayerConfig::Human,
            player_b: PlayerConfig::Human,
        }
    }

    /// Create a PvAI game configuration.
    ///
    /// # Arguments
    /// * `human_side` - The side the human player will play
    pub fn pvai(human_side: PlayerId) -> Self {
        let agent = PlayerConfig::Agent { seed: None };
        let (player_a, player_b) = match human_side {
            PlayerId::A => (PlayerConfig::Human, agent),
            PlayerId::B => (agent, PlayerConfig::Human),
        };

        Self {
            mode: GameMode::PvAI,
            player_a,
            player_b,
        }
    }

    /// Create an AIvAI game configuration.
    pub fn aivai() -> Self {
        Self {
            mode: GameMode::AIvAI,
            player_a: PlayerConfig::Agent { seed: None },
            player_b: PlayerConfig::Agent { seed: None },
        }
    }

    /// Seed every agent in this configuration.
    ///
    /// Player B's agent gets `seed + 1` so the two sides do not mirror each
    /// other's samples.
    pub fn with_seed(mut self, seed: u64) -> Self {
        if let PlayerConfig::Agent { .. } = self.player_a {
            self.player_a = PlayerConfig::Agent { seed: Some(seed) };
        }
        if let PlayerConfig::Agent { .. } = self.player_b {
            self.player_b = PlayerConfig::Agent {
                seed: Some(seed.wrapping_add(1)),
            };
        }
        self
    }

    /// Configuration for one side.
    pub fn player(&self, side: PlayerId) -> PlayerConfig {
        match side {
            PlayerId::A => self.player_a,
            PlayerId::B => self.player_b,
        }
    }

    /// Get the human player's side in a PvAI game.
    /// Returns None for PvP or AIvAI games.
    pub fn human_side(&self) -> Option<PlayerId> {
        match self.mode {
            GameMode::PvAI => {
                if matches!(self.player_a, PlayerConfig::Human) {
                    Some(PlayerId::A)
                } else {
                    Some(PlayerId::B)
                }
            }
            _ => None,
        }
    }

    /// Build the player object for one side.
    pub fn build_player(&self, side: PlayerId) -> Box<dyn Player> {
        match self.player(side) {
            PlayerConfig::Human => Box::new(HumanPlayer::new(format!("Human {}", side.to_char()))),
            PlayerConfig::Agent { seed: Some(seed) } => {
                Box::new(RandomPlayer::with_seed(seed, format!("Computer {}", side.to_char())))
            }
            PlayerConfig::Agent { seed: None } => Box::new(RandomPlayer::new(format!("Computer {}", side.to_char()))),
        }
    }
}
