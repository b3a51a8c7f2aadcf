//! Game records and the rolling example history.
//!
//! A game record holds one training example per ply:
//! - the encoded board before the move
//! - the search's visit shares for the moves it tried (the policy target)
//! - the final outcome from the mover's perspective (the value target)

use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::board::ActionId;
use crate::core::{GameRng, Side};
use crate::nn::EncodedState;

/// Failures reading or writing a saved history.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("history i/o failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("history encoding failed: {0}")]
    Codec(#[from] bincode::Error),
}

/// One (board, policy, value) training tuple.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrainingExample {
    /// Encoded board before the move.
    pub state: EncodedState,

    /// Visit share per visited action, ascending by action. Unlisted
    /// actions have zero mass.
    pub policy: Vec<(ActionId, f32)>,

    /// Size of the dense action space `policy` is drawn from.
    pub action_size: usize,

    /// Outcome for `player`: +1 win, -1 loss, 0 unfinished.
    /// Zero until the game ends.
    pub value: f32,

    /// Side to move on `state`.
    pub player: Side,
}

impl TrainingExample {
    /// Policy target expanded over the full action space.
    ///
    /// Ids outside the action space are dropped.
    #[must_use]
    pub fn dense_policy(&self) -> Vec<f32> {
        let mut dense = vec![0.0f32; self.action_size];
        for &(action, share) in &self.policy {
            if let Some(slot) = dense.get_mut(action) {
                *slot = share;
            }
        }
        dense
    }
}

/// A complete self-play game.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameRecord {
    pub examples: Vec<TrainingExample>,

    /// Action ids in the order they were played.
    pub moves: Vec<ActionId>,

    /// None if the game hit the move cap.
    pub winner: Option<Side>,

    /// Seed the game's sampling RNG started from.
    pub seed: u64,
}

impl GameRecord {
    pub fn new(seed: u64) -> Self {
        Self {
            examples: Vec::new(),
            moves: Vec::new(),
            winner: None,
            seed,
        }
    }

    /// Record a ply: the example for the position and the action played.
    pub fn push(&mut self, example: TrainingExample, action: ActionId) {
        self.examples.push(example);
        self.moves.push(action);
    }

    /// Set the result and back-fill every example's value target.
    pub fn finish(&mut self, winner: Option<Side>) {
        self.winner = winner;
        for example in &mut self.examples {
            example.value = example.player.outcome_for(winner);
        }
    }

    /// Number of plies played.
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Examples recorded for one side.
    pub fn examples_for(&self, player: Side) -> impl Iterator<Item = &TrainingExample> {
        self.examples.iter().filter(move |e| e.player == player)
    }
}

/// Rolling window of recent games.
///
/// Uses a FIFO strategy: when full, the oldest game is dropped.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExampleHistory {
    games: VecDeque<GameRecord>,
    max_games: usize,
}

impl ExampleHistory {
    pub fn new(max_games: usize) -> Self {
        Self {
            games: VecDeque::with_capacity(max_games.min(1024)),
            max_games,
        }
    }

    /// Add a game, evicting the oldest if the window is full.
    pub fn push(&mut self, game: GameRecord) {
        if self.max_games == 0 {
            return;
        }
        while self.games.len() >= self.max_games {
            self.games.pop_front();
        }
        self.games.push_back(game);
    }

    /// Number of games held.
    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.max_games
    }

    pub fn clear(&mut self) {
        self.games.clear();
    }

    /// Games from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &GameRecord> {
        self.games.iter()
    }

    /// Total examples across all games.
    pub fn total_examples(&self) -> usize {
        self.games.iter().map(|g| g.examples.len()).sum()
    }

    /// All examples, oldest game first.
    pub fn examples(&self) -> Vec<TrainingExample> {
        self.games
            .iter()
            .flat_map(|g| g.examples.iter().cloned())
            .collect()
    }

    /// Every example in random order.
    pub fn shuffled(&self, rng: &mut GameRng) -> Vec<TrainingExample> {
        let mut examples = self.examples();
        rng.shuffle(&mut examples);
        examples
    }

    /// Up to `batch_size` examples drawn without replacement.
    pub fn sample(&self, batch_size: usize, rng: &mut GameRng) -> Vec<TrainingExample> {
        let mut examples = self.shuffled(rng);
        examples.truncate(batch_size);
        examples
    }

    /// Write the history to `path` with bincode.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), HistoryError> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        bincode::serialize_into(&mut writer, self)?;
        writer.flush()?;
        debug!(games = self.len(), path = %path.display(), "saved example history");
        Ok(())
    }

    /// Read a history written by [`ExampleHistory::save`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, HistoryError> {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path)?);
        let history: Self = bincode::deserialize_from(reader)?;
        debug!(games = history.len(), path = %path.display(), "loaded example history");
        Ok(history)
    }
}

impl Default for ExampleHistory {
    fn default() -> Self {
        Self::new(600)
    }
}
