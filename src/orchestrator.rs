//! Turn management and game flow.
//!
//! This module contains the [`TurnEngine`] component, which drives one game
//! from the opening position to the final score. It manages:
//! - The board and the two [`Player`] instances for the game
//! - Whose turn it is and whether the game has passed or ended
//! - Forced passes and double-pass termination
//! - Optional background computation of an agent's move
//!
//! # Architecture
//!
//! The engine is the only writer of game state:
//! - [`Board`] is owned exclusively by the engine; players receive `&mut Board`
//!   only for the duration of [`Player::attempt_move`]
//! - [`GameState`] lives inside the engine, one per game, so any number of
//!   games can run side by side
//! - The view layer learns about changes only through returned [`MoveResult`]s
//!
//! # Example Flow
//!
//! ```text
//! [initialize_game] -> [advance] -> active player stuck? -> opponent stuck too? -> [Terminated]
//!                          |                 |                      |
//!                          |                 |                      +-> [Passed] -> [advance] ...
//!                          v                 |
//!                 [Player::attempt_move] <---+ no
//!                          |
//!          Rejected -> same player  /  Applied -> switch player -> [advance] ...
//! ```
//!
//! # Examples
//!
//! ```rust
//! use reversi_engine::config::GameConfig;
//! use reversi_engine::orchestrator::{MoveResult, TurnEngine};
//! use reversi_engine::game_repr::PlayerId;
//!
//! let mut engine = TurnEngine::new(&GameConfig::pvp());
//! let snapshot = engine.initialize_game();
//! assert_eq!(snapshot.active, PlayerId::A);
//!
//! // occupied cell: rejected, still A's turn
//! assert_eq!(engine.submit_move(3, 3).unwrap(), MoveResult::Rejected);
//!
//! match engine.submit_move(2, 4).unwrap() {
//!     MoveResult::Applied { flipped, next, .. } => {
//!         assert_eq!(flipped.len(), 1);
//!         assert_eq!(next, PlayerId::B);
//!     }
//!     other => panic!("unexpected {other:?}"),
//! }
//! ```

use crate::agent::{MoveOutcome, Player, PlayerKind};
use crate::config::GameConfig;
use crate::error::GameError;
use crate::game_repr::{Board, ChangeSet, Coord, Occupant, PlayerId, Score, Winner, BOARD_WIDTH};
use parking_lot::Mutex;
use smallvec::SmallVec;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;

/// Coordinates flipped by one placement.
pub type FlipList = SmallVec<[Coord; 24]>;

/// Player shared between the engine and a background worker.
type SharedPlayer = Arc<Mutex<Box<dyn Player>>>;

/// Phase of the turn state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Normal play
    InProgress,
    /// The previous player had no legal move and the turn was skipped
    Passed,
    /// Neither player can move; absorbing
    Terminated(Score),
}

/// Whose turn it is and where the game stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameState {
    pub active: PlayerId,
    pub phase: Phase,
}

impl GameState {
    fn opening() -> Self {
        Self {
            active: PlayerId::A,
            phase: Phase::InProgress,
        }
    }

    pub fn is_terminated(&self) -> bool {
        matches!(self.phase, Phase::Terminated(_))
    }
}

/// Full occupancy of the board plus the player to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardSnapshot {
    /// Occupants indexed `[row][col]`
    pub occupants: [[Occupant; BOARD_WIDTH]; BOARD_WIDTH],
    pub active: PlayerId,
}

/// Result of one turn, returned to the view layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveResult {
    /// A tile was placed; `flipped` excludes the placed cell
    Applied {
        placed: Coord,
        flipped: FlipList,
        next: PlayerId,
    },
    /// The human's choice was illegal; nothing changed, same player to move
    Rejected,
    /// The active player could not move; `next` moves now
    Passed { next: PlayerId },
    /// Neither player can move
    Terminated { score: Score, winner: Winner },
}

impl MoveResult {
    fn terminated(score: Score) -> Self {
        MoveResult::Terminated {
            score,
            winner: score.winner(),
        }
    }
}

/// One entry of the game history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveRecord {
    Placed { player: PlayerId, coord: Coord, flipped: usize },
    Passed { player: PlayerId },
}

/// What [`TurnEngine::spawn_agent_turn`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentTurn {
    /// The agent is computing on a background worker
    Thinking,
    /// No computation was needed: the turn passed or the game is over
    Resolved(MoveResult),
}

/// An outstanding background computation.
struct PendingTurn {
    player: PlayerId,
    cancelled: Arc<AtomicBool>,
    receiver: Receiver<MoveOutcome>,
}

/// Drives the turn state machine for one game.
///
/// # Turn Flow
///
/// Each call to [`advance`](TurnEngine::advance):
/// 1. Returns the final result again if the game has terminated
/// 2. If the active player has no legal move, switches player and either
///    reports a pass or, when the opponent is stuck too, terminates
/// 3. Otherwise asks the active player to move; a rejection keeps the turn,
///    an applied move hands it to the opponent
///
/// A pass does not trigger another advance on its own; callers driving an
/// agent call `advance` again.
///
/// # Background Turns
///
/// [`spawn_agent_turn`](TurnEngine::spawn_agent_turn) runs an agent's move on
/// a rayon worker against a scratch copy of the board. At most one such
/// computation is outstanding; until it is collected with
/// [`poll_agent_turn`](TurnEngine::poll_agent_turn) or
/// [`wait_agent_turn`](TurnEngine::wait_agent_turn), `advance` returns
/// [`GameError::AgentBusy`]. The chosen coordinate is re-validated and applied
/// to the real board on the caller's thread.
pub struct TurnEngine {
    /// The game board, exclusively owned
    board: Board,

    /// Players indexed by [`slot`]
    players: [SharedPlayer; 2],

    /// Cached so queries never wait on a worker holding a player lock
    kinds: [PlayerKind; 2],
    names: [String; 2],

    /// Whose turn it is and the current phase
    state: GameState,

    /// Every placement and pass since the game started
    history: Vec<MoveRecord>,

    /// Background agent computation, if any
    pending: Option<PendingTurn>,
}

fn slot(player: PlayerId) -> usize {
    match player {
        PlayerId::A => 0,
        PlayerId::B => 1,
    }
}

impl TurnEngine {
    /// Create an engine with players built from `config`.
    ///
    /// The board starts in the opening position with player A to move.
    pub fn new(config: &GameConfig) -> Self {
        Self::with_players(config.build_player(PlayerId::A), config.build_player(PlayerId::B))
    }

    /// Create an engine for two arbitrary players.
    ///
    /// # Arguments
    ///
    /// * `player_a` - Moves first
    /// * `player_b` - Moves second
    pub fn with_players(player_a: Box<dyn Player>, player_b: Box<dyn Player>) -> Self {
        let kinds = [player_a.kind(), player_b.kind()];
        let names = [player_a.name().to_string(), player_b.name().to_string()];

        log::debug!("Engine created: {} ({}) vs {} ({})", names[0], kinds[0], names[1], kinds[1]);

        Self {
            board: Board::new(),
            players: [Arc::new(Mutex::new(player_a)), Arc::new(Mutex::new(player_b))],
            kinds,
            names,
            state: GameState::opening(),
            history: Vec::new(),
            pending: None,
        }
    }

    /// Replace the board with a synthesized position.
    pub fn with_board(mut self, board: Board) -> Self {
        self.board = board;
        self
    }

    /// Set the player to move.
    pub fn with_active(mut self, active: PlayerId) -> Self {
        self.state.active = active;
        self
    }

    /// Start a new game on a fresh board.
    ///
    /// Cancels any outstanding agent computation, resets the board to the
    /// opening position, clears the history and gives the turn to player A.
    pub fn initialize_game(&mut self) -> BoardSnapshot {
        self.cancel_agent_turn();

        self.board = Board::new();
        self.state = GameState::opening();
        self.history.clear();

        log::info!("New game: {} vs {}", self.names[0], self.names[1]);
        self.snapshot()
    }

    /// Current occupancy and player to move.
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            occupants: self.board.occupants(),
            active: self.state.active,
        }
    }

    /// Deliver a click from the view layer.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is outside `0..8`.
    pub fn submit_move(&mut self, row: usize, col: usize) -> Result<MoveResult, GameError> {
        self.advance(Some(Coord::new(row, col)))
    }

    /// Read one cell. Never mutates anything.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is outside `0..8`.
    pub fn query_tile(&self, row: usize, col: usize) -> Occupant {
        self.board.occupant(Coord::new(row, col))
    }

    /// Run one step of the turn state machine.
    ///
    /// `requested` is the human's chosen cell; agents ignore it.
    ///
    /// # Errors
    ///
    /// - [`GameError::AgentBusy`] while a background turn is outstanding
    /// - [`GameError::NoMovesContradiction`] if the active player claims to be
    ///   stuck while the board says otherwise; the state is left unchanged
    pub fn advance(&mut self, requested: Option<Coord>) -> Result<MoveResult, GameError> {
        if self.pending.is_some() {
            return Err(GameError::AgentBusy);
        }
        if let Phase::Terminated(score) = self.state.phase {
            return Ok(MoveResult::terminated(score));
        }

        let active = self.state.active;
        if !self.board.has_any_legal_move(active) {
            return Ok(self.pass_or_terminate());
        }

        let outcome = {
            let mut player = self.players[slot(active)].lock();
            player.attempt_move(&mut self.board, active, requested)
        }; // Release the player before touching state

        self.resolve(active, outcome)
    }

    /// Advance with no coordinate until the game ends.
    ///
    /// Intended for agent-vs-agent games.
    ///
    /// # Errors
    ///
    /// - [`GameError::HumanToMove`] when a human player has a move to make
    /// - [`GameError::TurnLimit`] if the game is still running after `max_turns` steps
    pub fn run_to_completion(&mut self, max_turns: usize) -> Result<Score, GameError> {
        for _ in 0..max_turns {
            if let Phase::Terminated(score) = self.state.phase {
                return Ok(score);
            }

            let active = self.state.active;
            if self.kinds[slot(active)] == PlayerKind::Human && self.board.has_any_legal_move(active) {
                return Err(GameError::HumanToMove { player: active });
            }

            self.advance(None)?;
        }

        match self.state.phase {
            Phase::Terminated(score) => Ok(score),
            _ => Err(GameError::TurnLimit { turns: max_turns }),
        }
    }

    /// Handle the active player having no legal move.
    fn pass_or_terminate(&mut self) -> MoveResult {
        let stuck = self.state.active;
        let next = stuck.opponent();
        self.state.active = next;

        if !self.board.has_any_legal_move(next) {
            let score = self.board.score();
            self.state.phase = Phase::Terminated(score);
            log::info!("Game over: {score}, winner {:?}", score.winner());
            return MoveResult::terminated(score);
        }

        self.state.phase = Phase::Passed;
        self.history.push(MoveRecord::Passed { player: stuck });
        log::info!("{stuck} has no legal move, {next} plays");
        MoveResult::Passed { next }
    }

    /// Turn a player's outcome into a state transition.
    fn resolve(&mut self, player: PlayerId, outcome: MoveOutcome) -> Result<MoveResult, GameError> {
        match outcome {
            MoveOutcome::Applied { coord, changes } => Ok(self.finish_placement(player, coord, &changes)),
            MoveOutcome::Rejected => Ok(MoveResult::Rejected),
            MoveOutcome::NoLegalMoves => {
                log::error!(
                    "[{}] reported no legal moves but the board has at least one",
                    self.names[slot(player)]
                );
                Err(GameError::NoMovesContradiction { player })
            }
        }
    }

    fn finish_placement(&mut self, player: PlayerId, coord: Coord, changes: &ChangeSet) -> MoveResult {
        let flipped: FlipList = changes.iter().skip(1).map(|change| change.coord).collect();

        self.history.push(MoveRecord::Placed {
            player,
            coord,
            flipped: flipped.len(),
        });

        let next = player.opponent();
        self.state = GameState {
            active: next,
            phase: Phase::InProgress,
        };

        MoveResult::Applied {
            placed: coord,
            flipped,
            next,
        }
    }

    /// Start the active agent's turn on a background worker.
    ///
    /// Passes and termination need no computation and are resolved
    /// immediately, exactly as [`advance`](Self::advance) would.
    ///
    /// # Errors
    ///
    /// - [`GameError::AgentBusy`] if a computation is already outstanding
    /// - [`GameError::HumanToMove`] if the active player is human
    pub fn spawn_agent_turn(&mut self) -> Result<AgentTurn, GameError> {
        if self.pending.is_some() {
            return Err(GameError::AgentBusy);
        }

        let active = self.state.active;
        if self.state.is_terminated() || !self.board.has_any_legal_move(active) {
            return self.advance(None).map(AgentTurn::Resolved);
        }
        if self.kinds[slot(active)] == PlayerKind::Human {
            return Err(GameError::HumanToMove { player: active });
        }

        let player = Arc::clone(&self.players[slot(active)]);
        let mut scratch = self.board.clone();
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancelled);
        let (sender, receiver) = mpsc::channel();

        rayon::spawn(move || {
            if flag.load(Ordering::Acquire) {
                return;
            }
            let mut guard = player.lock();
            // cancelled while waiting for the player
            if flag.load(Ordering::Acquire) {
                return;
            }

            // a panicking player drops the sender, surfacing as AgentDisconnected
            let outcome = match panic::catch_unwind(AssertUnwindSafe(|| guard.attempt_move(&mut scratch, active, None))) {
                Ok(outcome) => outcome,
                Err(_) => {
                    log::error!("[{}] background turn panicked", guard.name());
                    return;
                }
            };
            drop(guard);

            if !flag.load(Ordering::Acquire) {
                // receiver may be gone if the game was abandoned
                let _ = sender.send(outcome);
            }
        });

        log::debug!("[{}] thinking in background", self.names[slot(active)]);
        self.pending = Some(PendingTurn {
            player: active,
            cancelled,
            receiver,
        });
        Ok(AgentTurn::Thinking)
    }

    /// Collect a finished background turn without blocking.
    ///
    /// Returns `Ok(None)` when nothing is outstanding or the worker is still
    /// computing.
    pub fn poll_agent_turn(&mut self) -> Result<Option<MoveResult>, GameError> {
        let received = match &self.pending {
            Some(pending) => pending.receiver.try_recv(),
            None => return Ok(None),
        };

        match received {
            Ok(outcome) => self.complete_agent_turn(outcome).map(Some),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => {
                self.pending = None;
                Err(GameError::AgentDisconnected)
            }
        }
    }

    /// Block until the outstanding background turn finishes and apply it.
    ///
    /// # Errors
    ///
    /// [`GameError::NoPendingTurn`] if nothing was spawned.
    pub fn wait_agent_turn(&mut self) -> Result<MoveResult, GameError> {
        let received = match &self.pending {
            Some(pending) => pending.receiver.recv(),
            None => return Err(GameError::NoPendingTurn),
        };

        match received {
            Ok(outcome) => self.complete_agent_turn(outcome),
            Err(_) => {
                self.pending = None;
                Err(GameError::AgentDisconnected)
            }
        }
    }

    /// Apply a background result to the real board.
    fn complete_agent_turn(&mut self, outcome: MoveOutcome) -> Result<MoveResult, GameError> {
        let player = match self.pending.take() {
            Some(pending) => pending.player,
            None => return Err(GameError::NoPendingTurn),
        };

        match outcome {
            MoveOutcome::Applied { coord, .. } => {
                // the worker only touched a scratch copy
                let changes = self.board.apply_move(coord, player).map_err(|err| {
                    log::error!("[{}] background move no longer applies: {err}", self.names[slot(player)]);
                    err
                })?;
                Ok(self.finish_placement(player, coord, &changes))
            }
            other => self.resolve(player, other),
        }
    }

    /// Abandon the outstanding background turn, if any.
    ///
    /// The worker's result is discarded; the board is untouched. Returns
    /// whether a computation was cancelled.
    pub fn cancel_agent_turn(&mut self) -> bool {
        match self.pending.take() {
            Some(pending) => {
                pending.cancelled.store(true, Ordering::Release);
                log::warn!("[{}] background turn cancelled", self.names[slot(pending.player)]);
                true
            }
            None => false,
        }
    }

    /// Whether a background computation is outstanding.
    pub fn is_thinking(&self) -> bool {
        self.pending.is_some()
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn player_kind(&self, player: PlayerId) -> PlayerKind {
        self.kinds[slot(player)]
    }

    pub fn player_name(&self, player: PlayerId) -> &str {
        &self.names[slot(player)]
    }

    /// Kind of the player to move; shells use this to decide whether to
    /// wait for a click or drive the agent.
    pub fn active_kind(&self) -> PlayerKind {
        self.player_kind(self.state.active)
    }
}

impl Drop for TurnEngine {
    fn drop(&mut self) {
        self.cancel_agent_turn();
    }
}
