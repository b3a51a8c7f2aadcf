//! Self-play training pipeline.
//!
//! ## Overview
//!
//! - **GameRecord**: one self-play game with a training example per ply
//! - **ExampleHistory**: rolling window of recent games, saved with bincode
//! - **SelfPlayWorker**: plays games with MCTS to produce records
//! - **Arena**: greedy games between two oracles (the "dual fight")
//! - **Coach**: self-play, retrain, evaluate, accept or roll back
//!
//! ## Usage
//!
//! ```rust
//! use rust_tafl::board::Board;
//! use rust_tafl::nn::MeanPolicyOracle;
//! use rust_tafl::training::{Coach, SelfPlayConfig};
//!
//! let config = SelfPlayConfig::default()
//!     .with_mcts_iterations(4)
//!     .with_max_moves(2)
//!     .with_episodes(1)
//!     .with_arena_games(0);
//!
//! let oracle = MeanPolicyOracle::new(Board::new().action_size());
//! let mut coach = Coach::new(oracle, config);
//! let report = coach.run_iteration().unwrap();
//! assert!(report.accepted);
//! assert_eq!(coach.history().len(), 1);
//! ```

pub mod self_play;
pub mod trajectory;

// Re-export main types
pub use self_play::{
    choose_action, Arena, ArenaResult, Coach, IterationReport, SelfPlayConfig, SelfPlayWorker,
    TrainingError,
};
pub use trajectory::{ExampleHistory, GameRecord, HistoryError, TrainingExample};
