//! Reversi rules engine.
//!
//! [`game_repr`] holds the board and the capture rules, [`agent`] the players,
//! and [`orchestrator::TurnEngine`] drives a game turn by turn. A view layer
//! only needs [`TurnEngine::initialize_game`], [`TurnEngine::submit_move`] and
//! [`TurnEngine::query_tile`].

pub mod agent;
pub mod config;
pub mod error;
pub mod game_repr;
pub mod orchestrator;

pub use config::{GameConfig, GameMode, PlayerConfig};
pub use error::GameError;
pub use orchestrator::{AgentTurn, MoveResult, TurnEngine};

/// Install `env_logger` as the `log` backend, honouring `RUST_LOG`.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logger() {
    let _ = env_logger::builder().format_timestamp_millis().try_init();
}
