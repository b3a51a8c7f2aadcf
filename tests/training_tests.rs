//! Integration tests for encoders, self-play and the example history.

use std::io::Write;

use rust_tafl::board::{Board, Ruleset};
use rust_tafl::core::Side;
use rust_tafl::mcts::SearchError;
use rust_tafl::nn::{
    EncodedState, FlatBoardEncoder, MeanPolicyOracle, Oracle, OracleError, PlaneEncoder,
    Prediction, StateEncoder, TrainableOracle, UniformOracle,
};
use rust_tafl::training::{
    Arena, Coach, ExampleHistory, HistoryError, SelfPlayConfig, SelfPlayWorker, TrainingError,
    TrainingExample,
};

/// Defenders to move with the king one slide from two corners.
fn escape_board() -> Board {
    Board::from_template_with_turn(&[[0u8, 0, 0], [1, 0, 0], [1, 0, 3], [0, 1, 0]], Side::Defender)
        .with_ruleset(Ruleset::default().with_min_attackers(0))
}

/// Mean-policy oracle that only accepts plane encodings, at prediction and
/// training time alike.
#[derive(Clone)]
struct PlaneOnlyOracle {
    inner: MeanPolicyOracle,
}

impl PlaneOnlyOracle {
    fn new(action_size: usize) -> Self {
        Self {
            inner: MeanPolicyOracle::new(action_size),
        }
    }

    fn check(shape: &[usize]) -> Result<(), OracleError> {
        if shape.first() == Some(&PlaneEncoder::PLANES) {
            Ok(())
        } else {
            Err(OracleError::Prediction(format!("oracle got shape {:?}", shape)))
        }
    }
}

impl Oracle for PlaneOnlyOracle {
    fn predict(&self, encoded: &EncodedState) -> Result<Prediction, OracleError> {
        Self::check(&encoded.shape)?;
        self.inner.predict(encoded)
    }
}

impl TrainableOracle for PlaneOnlyOracle {
    fn train(&mut self, examples: &[TrainingExample]) -> Result<(), OracleError> {
        for example in examples {
            Self::check(&example.state.shape)?;
        }
        self.inner.train(examples)
    }
}

fn quick_config() -> SelfPlayConfig {
    SelfPlayConfig::default()
        .with_mcts_iterations(24)
        .with_max_moves(12)
        .with_episodes(2)
        .with_arena_games(2)
        .with_history_games(8)
}

// =============================================================================
// Encoder Tests
// =============================================================================

#[test]
fn test_plane_encoder_turn_plane() {
    let attacker_turn = PlaneEncoder.encode(&Board::new());
    let mut board = Board::new();
    let first = board.legal_actions()[0];
    assert!(board.apply_action(first));
    let defender_turn = PlaneEncoder.encode(&board);

    let plane = 11 * 11;
    assert_eq!(attacker_turn.shape, vec![PlaneEncoder::PLANES, 11, 11]);
    assert!(attacker_turn.tensor[5 * plane..].iter().all(|&v| v == 0.0));
    assert!(defender_turn.tensor[5 * plane..].iter().all(|&v| v == 1.0));

    let attackers: f32 = attacker_turn.tensor[..plane].iter().sum();
    assert_eq!(attackers, 24.0);
}

// =============================================================================
// Self-Play Tests
// =============================================================================

#[test]
fn test_episode_is_reproducible() {
    let worker = SelfPlayWorker::new(quick_config()).with_start(escape_board());
    let a = worker.play_episode(None, 99).unwrap();
    let b = worker.play_episode(None, 99).unwrap();

    assert_eq!(a.moves, b.moves);
    assert_eq!(a.winner, b.winner);
    assert_eq!(a.examples, b.examples);
}

#[test]
fn test_episode_examples_replay_the_game() {
    let start = escape_board();
    let worker = SelfPlayWorker::new(quick_config()).with_start(start.clone());
    let record = worker.play_episode(None, 3).unwrap();

    let mut board = start;
    for (example, &action) in record.examples.iter().zip(&record.moves) {
        assert_eq!(example.player, board.turn());
        assert_eq!(example.state, FlatBoardEncoder.encode(&board));
        assert!(example.dense_policy()[action] > 0.0);
        assert!(example.policy.iter().any(|&(id, share)| id == action && share > 0.0));
        assert!(board.apply_action(action));
    }
    assert_eq!(board.check_for_winner(), record.winner);
}

#[test]
fn test_episode_with_plane_encoder() {
    let worker = SelfPlayWorker::new(quick_config())
        .with_start(escape_board())
        .with_encoder(PlaneEncoder);
    let oracle = PlaneOnlyOracle::new(escape_board().action_size());
    let record = worker.play_episode(Some(&oracle as &dyn Oracle), 1).unwrap();

    assert!(!record.is_empty());
    assert_eq!(record.examples[0].state.shape, vec![PlaneEncoder::PLANES, 4, 3]);

    let flat = SelfPlayWorker::new(quick_config()).with_start(escape_board());
    let result = flat.play_episode(Some(&oracle as &dyn Oracle), 1);
    assert!(matches!(
        result,
        Err(TrainingError::Search(SearchError::Oracle(OracleError::Prediction(_))))
    ));
}

#[test]
fn test_greedy_play_escapes_immediately() {
    let config = quick_config().with_temperature_threshold(1).with_temperature(0.0);
    let worker = SelfPlayWorker::new(config).with_start(escape_board());
    let record = worker.play_episode(None, 5).unwrap();

    assert_eq!(record.len(), 1);
    assert_eq!(record.winner, Some(Side::Defender));
    assert_eq!(record.examples[0].value, 1.0);
}

// =============================================================================
// Arena and Coach Tests
// =============================================================================

#[test]
fn test_dual_fight_counts_every_game() {
    let board = escape_board();
    let current = MeanPolicyOracle::new(board.action_size());
    let previous = UniformOracle::new(board.action_size());
    let arena = Arena::new(quick_config()).with_start(board);

    let result = arena.dual_fight(&current, &previous, 5).unwrap();
    assert_eq!(result.games(), 5);
}

#[test]
fn test_dual_fight_with_plane_encoder() {
    let board = escape_board();
    let current = PlaneOnlyOracle::new(board.action_size());
    let previous = PlaneOnlyOracle::new(board.action_size());

    let arena = Arena::new(quick_config())
        .with_start(board.clone())
        .with_encoder(PlaneEncoder);
    let result = arena.dual_fight(&current, &previous, 2).unwrap();
    assert_eq!(result.games(), 2);

    let flat = Arena::new(quick_config()).with_start(board);
    assert!(matches!(
        flat.dual_fight(&current, &previous, 2),
        Err(TrainingError::Search(SearchError::Oracle(_)))
    ));
}

#[test]
fn test_coach_with_plane_encoder() {
    let board = escape_board();
    let mut coach = Coach::new(PlaneOnlyOracle::new(board.action_size()), quick_config())
        .with_start(board)
        .with_encoder(PlaneEncoder);

    let report = coach.run_iteration().unwrap();
    assert_eq!(report.arena.games(), 2);
    assert!(coach
        .history()
        .iter()
        .flat_map(|game| &game.examples)
        .all(|example| example.state.shape == vec![PlaneEncoder::PLANES, 4, 3]));
}

#[test]
fn test_mean_policy_oracle_learns_from_history() {
    let board = escape_board();
    let worker = SelfPlayWorker::new(quick_config()).with_start(board.clone());
    let mut history = ExampleHistory::new(4);
    for seed in 0..3 {
        history.push(worker.play_episode(None, seed).unwrap());
    }

    let mut oracle = MeanPolicyOracle::new(board.action_size());
    oracle.train(&history.examples()).unwrap();

    let mass: f32 = oracle.policy().iter().sum();
    assert!((mass - 1.0).abs() < 1e-4);
    // Each game's first example is the start position.
    let start_legal = board.valid_action_mask();
    let start_mass: f32 = oracle
        .policy()
        .iter()
        .enumerate()
        .filter(|&(id, _)| start_legal[id])
        .map(|(_, &p)| p)
        .sum();
    assert!(start_mass > 0.0);
}

#[test]
fn test_coach_resumes_from_saved_history() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.bin");
    let board = escape_board();

    let mut coach = Coach::new(MeanPolicyOracle::new(board.action_size()), quick_config())
        .with_start(board.clone());
    coach.run_iteration().unwrap();
    coach.history().save(&path).unwrap();

    let loaded = ExampleHistory::load(&path).unwrap();
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded.examples(), coach.history().examples());

    let mut resumed = Coach::new(MeanPolicyOracle::new(board.action_size()), quick_config())
        .with_start(board)
        .with_history(loaded);
    let report = resumed.run_iteration().unwrap();
    assert_eq!(resumed.history().len(), 4);
    assert_eq!(report.examples, resumed.history().total_examples());
}

// =============================================================================
// History Persistence Tests
// =============================================================================

#[test]
fn test_load_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = ExampleHistory::load(dir.path().join("missing.bin"));
    assert!(matches!(result, Err(HistoryError::Io(_))));
}

#[test]
fn test_load_garbage_is_codec_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&[0xff; 3]).unwrap();
    file.flush().unwrap();

    let result = ExampleHistory::load(file.path());
    assert!(matches!(result, Err(HistoryError::Codec(_))));
}
