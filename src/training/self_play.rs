//! Self-play loop for generating training data.
//!
//! Runs games with MCTS to produce game records, pits oracle generations
//! against each other, and drives the train/evaluate/accept cycle.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::board::{ActionId, Board};
use crate::core::{GameRng, Side};
use crate::mcts::{MCTSConfig, SearchError, SearchTree, TreeSearch};
use crate::nn::{FlatBoardEncoder, Oracle, OracleError, StateEncoder, TrainableOracle};

use super::trajectory::{ExampleHistory, GameRecord, TrainingExample};

/// Errors that abort an episode, arena game or training iteration.
#[derive(Debug, Error)]
pub enum TrainingError {
    #[error("oracle error: {0}")]
    Oracle(#[from] OracleError),

    #[error("search error: {0}")]
    Search(#[from] SearchError),
}

/// Configuration for self-play.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SelfPlayConfig {
    /// Number of MCTS iterations per move.
    pub mcts_iterations: u32,

    /// Temperature for move sampling in the opening.
    /// Higher = more exploration.
    pub temperature: f64,

    /// Move number from which moves are chosen greedily.
    /// 0 = always use temperature.
    pub temperature_threshold: usize,

    /// Maximum moves per game; a game cut off here is a draw.
    pub max_moves: usize,

    /// Exploration weight handed to the search.
    pub c_puct: f64,

    /// Self-play games per training iteration.
    pub episodes_per_iteration: usize,

    /// Games kept in the rolling history.
    pub history_games: usize,

    /// Games per dual fight.
    pub arena_games: usize,

    /// Win rate the retrained oracle needs to replace the old one.
    pub accept_threshold: f64,

    /// Root seed for episode sampling.
    pub seed: u64,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        Self {
            mcts_iterations: 800,
            temperature: 1.0,
            temperature_threshold: 20,
            max_moves: 500,
            c_puct: 1.0,
            episodes_per_iteration: 30,
            history_games: 600,
            arena_games: 100,
            accept_threshold: 0.55,
            seed: 42,
        }
    }
}

impl SelfPlayConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mcts_iterations(mut self, iterations: u32) -> Self {
        self.mcts_iterations = iterations;
        self
    }

    pub fn with_temperature(mut self, temp: f64) -> Self {
        self.temperature = temp;
        self
    }

    pub fn with_temperature_threshold(mut self, threshold: usize) -> Self {
        self.temperature_threshold = threshold;
        self
    }

    pub fn with_max_moves(mut self, max: usize) -> Self {
        self.max_moves = max;
        self
    }

    pub fn with_c_puct(mut self, c: f64) -> Self {
        self.c_puct = c;
        self
    }

    pub fn with_episodes(mut self, episodes: usize) -> Self {
        self.episodes_per_iteration = episodes;
        self
    }

    pub fn with_history_games(mut self, games: usize) -> Self {
        self.history_games = games;
        self
    }

    pub fn with_arena_games(mut self, games: usize) -> Self {
        self.arena_games = games;
        self
    }

    pub fn with_accept_threshold(mut self, threshold: f64) -> Self {
        self.accept_threshold = threshold;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Get the temperature for a given move number.
    pub fn effective_temperature(&self, move_number: usize) -> f64 {
        if self.temperature_threshold > 0 && move_number >= self.temperature_threshold {
            0.0
        } else {
            self.temperature
        }
    }

    /// Search settings used for every move.
    pub fn mcts_config(&self) -> MCTSConfig {
        MCTSConfig::default()
            .with_iterations(self.mcts_iterations)
            .with_c_puct(self.c_puct)
    }
}

/// Pick a root action from visit counts.
///
/// Temperature 0 takes the most visited move. Otherwise counts are raised
/// to `1/temperature` and sampled.
pub fn choose_action(tree: &SearchTree, temperature: f64, rng: &mut GameRng) -> Option<ActionId> {
    if temperature <= 0.0 {
        return tree.best_action();
    }
    let counts = tree.visit_counts();
    let max = counts.iter().map(|&(_, v)| v).max().unwrap_or(0);
    if max == 0 {
        return tree.best_action();
    }
    let weights: Vec<f32> = counts
        .iter()
        .map(|&(_, v)| (f64::from(v) / f64::from(max)).powf(1.0 / temperature) as f32)
        .collect();
    rng.choose_weighted(&weights)
        .map(|i| counts[i].0)
        .or_else(|| tree.best_action())
}

// =============================================================================
// Episodes
// =============================================================================

/// Plays self-play games from a fixed starting board.
pub struct SelfPlayWorker {
    config: SelfPlayConfig,
    start: Board,
    encoder: Arc<dyn StateEncoder>,
}

impl SelfPlayWorker {
    /// Worker starting from the standard layout.
    pub fn new(config: SelfPlayConfig) -> Self {
        Self {
            config,
            start: Board::new(),
            encoder: Arc::new(FlatBoardEncoder),
        }
    }

    /// Start games from `board` instead.
    pub fn with_start(mut self, board: Board) -> Self {
        self.start = board;
        self
    }

    /// Encoder used for recorded states and for the boards the search
    /// hands to the oracle.
    pub fn with_encoder<E: StateEncoder + 'static>(mut self, encoder: E) -> Self {
        self.encoder = Arc::new(encoder);
        self
    }

    fn with_shared_encoder(mut self, encoder: Arc<dyn StateEncoder>) -> Self {
        self.encoder = encoder;
        self
    }

    pub fn config(&self) -> &SelfPlayConfig {
        &self.config
    }

    pub fn start(&self) -> &Board {
        &self.start
    }

    /// Play one game, recording an example per ply and back-filling values
    /// once the result is known.
    pub fn play_episode(&self, oracle: Option<&dyn Oracle>, seed: u64) -> Result<GameRecord, TrainingError> {
        let mut board = self.start.clone();
        let mut rng = GameRng::new(seed);
        let mut record = GameRecord::new(seed);
        let mut search =
            TreeSearch::new(self.config.mcts_config()).with_encoder(Arc::clone(&self.encoder));

        for move_number in 0..self.config.max_moves {
            if board.check_for_winner().is_some() {
                break;
            }
            let tree = match search.run(&board, self.config.mcts_iterations, oracle) {
                Ok(tree) => tree,
                Err(SearchError::NoLegalMoves) => break,
                Err(e) => return Err(e.into()),
            };

            let temperature = self.config.effective_temperature(move_number);
            let Some(action) = choose_action(&tree, temperature, &mut rng) else {
                break;
            };

            let example = TrainingExample {
                state: self.encoder.encode(&board),
                policy: tree.visit_targets(),
                action_size: board.action_size(),
                value: 0.0,
                player: board.turn(),
            };
            if !board.apply_action(action) {
                warn!(action, move_number, "search picked an unplayable move");
                break;
            }
            record.push(example, action);
        }

        let winner = board.check_for_winner();
        record.finish(winner);
        info!(seed, moves = record.len(), winner = ?winner, "episode finished");
        Ok(record)
    }
}

// =============================================================================
// Arena
// =============================================================================

/// Tally of a dual fight from the current oracle's point of view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArenaResult {
    pub current_wins: usize,
    pub previous_wins: usize,
    pub draws: usize,
}

impl ArenaResult {
    pub fn games(&self) -> usize {
        self.current_wins + self.previous_wins + self.draws
    }

    /// Share of all games the current oracle won; 0 if none were played.
    pub fn win_rate(&self) -> f64 {
        match self.games() {
            0 => 0.0,
            n => self.current_wins as f64 / n as f64,
        }
    }
}

/// Greedy head-to-head games between two oracles.
pub struct Arena {
    config: SelfPlayConfig,
    start: Board,
    encoder: Arc<dyn StateEncoder>,
}

impl Arena {
    pub fn new(config: SelfPlayConfig) -> Self {
        Self {
            config,
            start: Board::new(),
            encoder: Arc::new(FlatBoardEncoder),
        }
    }

    pub fn with_start(mut self, board: Board) -> Self {
        self.start = board;
        self
    }

    /// Encoder both oracles are queried with.
    pub fn with_encoder<E: StateEncoder + 'static>(mut self, encoder: E) -> Self {
        self.encoder = Arc::new(encoder);
        self
    }

    fn with_shared_encoder(mut self, encoder: Arc<dyn StateEncoder>) -> Self {
        self.encoder = encoder;
        self
    }

    /// Play one game, each side searching with its own oracle and always
    /// taking its most visited move. Returns the winner, None on the move cap.
    pub fn play_game(&self, attacker: &dyn Oracle, defender: &dyn Oracle) -> Result<Option<Side>, TrainingError> {
        let mut board = self.start.clone();
        let mut search =
            TreeSearch::new(self.config.mcts_config()).with_encoder(Arc::clone(&self.encoder));

        for _ in 0..self.config.max_moves {
            if board.check_for_winner().is_some() {
                break;
            }
            let oracle = match board.turn() {
                Side::Attacker => attacker,
                Side::Defender => defender,
            };
            let tree = match search.run(&board, self.config.mcts_iterations, Some(oracle)) {
                Ok(tree) => tree,
                Err(SearchError::NoLegalMoves) => break,
                Err(e) => return Err(e.into()),
            };
            let Some(action) = tree.best_action() else {
                break;
            };
            if !board.apply_action(action) {
                warn!(action, "search picked an unplayable move");
                break;
            }
        }

        Ok(board.check_for_winner())
    }

    /// Play `games` games: the current oracle attacks in the first half and
    /// defends in the rest.
    pub fn dual_fight(
        &self,
        current: &dyn Oracle,
        previous: &dyn Oracle,
        games: usize,
    ) -> Result<ArenaResult, TrainingError> {
        let mut result = ArenaResult::default();
        let half = games / 2;

        for game in 0..games {
            let current_side = if game < half { Side::Attacker } else { Side::Defender };
            let winner = match current_side {
                Side::Attacker => self.play_game(current, previous)?,
                Side::Defender => self.play_game(previous, current)?,
            };
            match winner {
                Some(side) if side == current_side => result.current_wins += 1,
                Some(_) => result.previous_wins += 1,
                None => result.draws += 1,
            }
            debug!(game, ?current_side, ?winner, "arena game finished");
        }

        info!(
            current = result.current_wins,
            previous = result.previous_wins,
            draws = result.draws,
            win_rate = result.win_rate(),
            "dual fight finished"
        );
        Ok(result)
    }
}

// =============================================================================
// Coach
// =============================================================================

/// Outcome of one training iteration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IterationReport {
    pub iteration: usize,
    pub games: usize,
    pub examples: usize,
    pub arena: ArenaResult,
    pub accepted: bool,
}

/// Self-play, retrain, and keep the new oracle only if it wins the arena.
pub struct Coach<O: TrainableOracle> {
    config: SelfPlayConfig,
    worker: SelfPlayWorker,
    arena: Arena,
    history: ExampleHistory,
    oracle: O,
    rng: GameRng,
    iteration: usize,
}

impl<O: TrainableOracle> Coach<O> {
    pub fn new(oracle: O, config: SelfPlayConfig) -> Self {
        Self {
            worker: SelfPlayWorker::new(config.clone()),
            arena: Arena::new(config.clone()),
            history: ExampleHistory::new(config.history_games),
            rng: GameRng::new(config.seed),
            oracle,
            config,
            iteration: 0,
        }
    }

    /// Play and evaluate from `board` instead of the standard layout.
    pub fn with_start(mut self, board: Board) -> Self {
        self.worker = self.worker.with_start(board.clone());
        self.arena = self.arena.with_start(board);
        self
    }

    /// Encode boards with `encoder` in self-play records, self-play search
    /// and the arena alike.
    pub fn with_encoder<E: StateEncoder + 'static>(mut self, encoder: E) -> Self {
        let shared: Arc<dyn StateEncoder> = Arc::new(encoder);
        self.worker = self.worker.with_shared_encoder(Arc::clone(&shared));
        self.arena = self.arena.with_shared_encoder(shared);
        self
    }

    /// Continue from a saved history.
    pub fn with_history(mut self, history: ExampleHistory) -> Self {
        self.history = history;
        self
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    pub fn history(&self) -> &ExampleHistory {
        &self.history
    }

    /// Iterations completed so far.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// One cycle: play episodes, retrain on the shuffled history, then fight
    /// the pre-training snapshot and roll back if the new oracle is not good
    /// enough. Zero arena games accept unconditionally.
    pub fn run_iteration(&mut self) -> Result<IterationReport, TrainingError> {
        self.iteration += 1;
        info!(iteration = self.iteration, "starting training iteration");

        for _ in 0..self.config.episodes_per_iteration {
            let seed = self.rng.fork().seed();
            let game = self.worker.play_episode(Some(&self.oracle as &dyn Oracle), seed)?;
            self.history.push(game);
        }

        let examples = self.history.shuffled(&mut self.rng);
        let previous = self.oracle.clone();
        self.oracle.train(&examples)?;

        let arena = self
            .arena
            .dual_fight(&self.oracle, &previous, self.config.arena_games)?;
        let accepted = arena.games() == 0 || arena.win_rate() >= self.config.accept_threshold;
        if accepted {
            info!(iteration = self.iteration, win_rate = arena.win_rate(), "accepted new oracle");
        } else {
            info!(iteration = self.iteration, win_rate = arena.win_rate(), "rejected new oracle");
            self.oracle = previous;
        }

        Ok(IterationReport {
            iteration: self.iteration,
            games: self.config.episodes_per_iteration,
            examples: examples.len(),
            arena,
            accepted,
        })
    }

    /// Run `iterations` cycles, stopping at the first error.
    pub fn learn(&mut self, iterations: usize) -> Result<Vec<IterationReport>, TrainingError> {
        (0..iterations).map(|_| self.run_iteration()).collect()
    }
}
