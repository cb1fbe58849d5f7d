//! End-to-end games driven through the public engine API
//!
//! This test suite covers:
//! - Agent-vs-agent games running to termination
//! - Determinism of seeded games
//! - Rule invariants observed after every turn
//! - Human-vs-agent flows with rejected input and background turns

use reversi_engine::agent::PlayerKind;
use reversi_engine::game_repr::{Board, Coord, Occupant, PlayerId, Winner};
use reversi_engine::orchestrator::{AgentTurn, MoveRecord, MoveResult, Phase, TurnEngine};
use reversi_engine::{GameConfig, GameError};

const MAX_TURNS: usize = 200;

fn init_logging() {
    reversi_engine::init_logger();
}

/// Step an agent-vs-agent game one `advance` at a time, checking invariants
/// after each turn. Returns every result in order.
fn play_checked(engine: &mut TurnEngine) -> Vec<MoveResult> {
    let mut results = Vec::new();

    for _ in 0..MAX_TURNS {
        let before = engine.board().clone();
        let mover = engine.state().active;
        let result = engine.advance(None).expect("agents never error");

        match &result {
            MoveResult::Applied { placed, flipped, next } => {
                assert_eq!(*next, mover.opponent());
                assert!(before.occupant(*placed).is_empty(), "placed on occupied cell {placed}");
                assert!(!flipped.is_empty(), "zero-flip move at {placed}");

                // only the placed cell and the flipped cells changed
                for coord in Coord::all() {
                    let changed = before.occupant(coord) != engine.board().occupant(coord);
                    let expected = coord == *placed || flipped.contains(&coord);
                    assert_eq!(changed, expected, "unexpected change at {coord}");
                }
                for coord in flipped {
                    assert_eq!(before.occupant(*coord), Occupant::Player(mover.opponent()));
                }
            }
            MoveResult::Passed { next } => {
                assert_eq!(*next, mover.opponent());
                assert!(!before.has_any_legal_move(mover));
                assert_eq!(*engine.board(), before);
            }
            MoveResult::Terminated { score, winner } => {
                assert_eq!(*score, engine.board().score());
                assert_eq!(*winner, score.winner());
                results.push(result);
                return results;
            }
            MoveResult::Rejected => panic!("agent move rejected"),
        }

        results.push(result);
    }

    panic!("game did not finish in {MAX_TURNS} turns");
}

#[test]
fn test_agent_game_reaches_terminal_state() {
    init_logging();

    for seed in 0..10 {
        let mut engine = TurnEngine::new(&GameConfig::aivai().with_seed(seed));
        engine.initialize_game();
        let results = play_checked(&mut engine);

        let board = engine.board();
        assert!(!board.has_any_legal_move(PlayerId::A));
        assert!(!board.has_any_legal_move(PlayerId::B));
        assert!(matches!(engine.state().phase, Phase::Terminated(_)));

        let placements = results
            .iter()
            .filter(|result| matches!(result, MoveResult::Applied { .. }))
            .count();
        let score = board.score();
        assert_eq!(usize::from(score.a) + usize::from(score.b), 4 + placements);
        assert_eq!(usize::from(board.empty_count()), 60 - placements);
    }
}

#[test]
fn test_seeded_games_are_deterministic() {
    init_logging();

    let mut first = TurnEngine::new(&GameConfig::aivai().with_seed(31337));
    let mut second = TurnEngine::new(&GameConfig::aivai().with_seed(31337));

    let score_first = first.run_to_completion(MAX_TURNS).unwrap();
    let score_second = second.run_to_completion(MAX_TURNS).unwrap();

    assert_eq!(score_first, score_second);
    assert_eq!(first.history(), second.history());
    assert_eq!(first.board(), second.board());
}

#[test]
fn test_background_game_matches_foreground_game() {
    init_logging();

    let mut background = TurnEngine::new(&GameConfig::aivai().with_seed(12));
    let mut foreground = TurnEngine::new(&GameConfig::aivai().with_seed(12));

    loop {
        let result = match background.spawn_agent_turn().unwrap() {
            AgentTurn::Thinking => background.wait_agent_turn().unwrap(),
            AgentTurn::Resolved(result) => result,
        };
        assert_eq!(result, foreground.advance(None).unwrap());

        if matches!(result, MoveResult::Terminated { .. }) {
            break;
        }
    }

    assert_eq!(background.history(), foreground.history());
    assert_eq!(background.board(), foreground.board());
}

#[test]
fn test_human_vs_agent_flow() {
    init_logging();

    let mut engine = TurnEngine::new(&GameConfig::pvai(PlayerId::A).with_seed(3));
    let snapshot = engine.initialize_game();
    assert_eq!(snapshot.active, PlayerId::A);
    assert_eq!(engine.active_kind(), PlayerKind::Human);

    // occupied and non-capturing cells are rejected without side effects
    assert_eq!(engine.submit_move(3, 3).unwrap(), MoveResult::Rejected);
    assert_eq!(engine.submit_move(0, 0).unwrap(), MoveResult::Rejected);
    assert_eq!(*engine.board(), Board::new());

    // an agent turn cannot be spawned for the human
    assert_eq!(
        engine.spawn_agent_turn().unwrap_err(),
        GameError::HumanToMove { player: PlayerId::A }
    );

    let result = engine.submit_move(3, 5).unwrap();
    assert!(matches!(result, MoveResult::Applied { next: PlayerId::B, .. }));
    assert_eq!(engine.query_tile(3, 4), Occupant::Player(PlayerId::A));
    assert_eq!(engine.active_kind(), PlayerKind::Agent);

    assert_eq!(engine.spawn_agent_turn().unwrap(), AgentTurn::Thinking);
    assert_eq!(engine.submit_move(2, 2).unwrap_err(), GameError::AgentBusy);

    let reply = engine.wait_agent_turn().unwrap();
    assert!(matches!(reply, MoveResult::Applied { next: PlayerId::A, .. }));
    assert_eq!(engine.board().score().a + engine.board().score().b, 6);
    assert_eq!(engine.history().len(), 2);
}

#[test]
fn test_forced_pass_then_play() {
    init_logging();

    // B sits in the corner where A cannot flank it; B captures at (7,2)
    let board = Board::from_layout(
        "........ / ........ / ........ / ........ / ........ / ........ / ........ / BA......",
    )
    .unwrap();
    let mut engine = TurnEngine::new(&GameConfig::pvp()).with_board(board.clone());

    assert_eq!(engine.advance(None).unwrap(), MoveResult::Passed { next: PlayerId::B });
    assert_eq!(*engine.board(), board);
    assert_eq!(engine.history(), &[MoveRecord::Passed { player: PlayerId::A }]);

    let result = engine.submit_move(7, 2).unwrap();
    assert!(matches!(result, MoveResult::Applied { next: PlayerId::A, .. }));

    // every tile is now B, so both sides are stuck
    match engine.advance(None).unwrap() {
        MoveResult::Terminated { score, winner } => {
            assert_eq!((score.a, score.b), (0, 3));
            assert_eq!(winner, Winner::Player(PlayerId::B));
        }
        other => panic!("expected termination, got {other:?}"),
    }
}

#[test]
fn test_new_game_after_finished_game() {
    init_logging();

    let mut engine = TurnEngine::new(&GameConfig::aivai().with_seed(8));
    engine.run_to_completion(MAX_TURNS).unwrap();

    let snapshot = engine.initialize_game();
    assert_eq!(snapshot.occupants, Board::new().occupants());
    assert_eq!(engine.state().phase, Phase::InProgress);
    assert!(engine.history().is_empty());

    engine.run_to_completion(MAX_TURNS).unwrap();
    assert!(matches!(engine.state().phase, Phase::Terminated(_)));
}
