//! # rust-tafl
//!
//! An 11x11 Tafl rules engine with Monte Carlo Tree Search and an
//! AlphaZero-style self-play pipeline.
//!
//! ## Design Principles
//!
//! 1. **Rejections Are Values**: illegal moves, unknown action ids and
//!    malformed templates come back as `false`, `None` or an invalid-board
//!    flag. Typed errors are reserved for the oracle boundary and for
//!    broken search invariants.
//!
//! 2. **Owned Snapshots**: every search node owns its board. Boards index
//!    their pieces in an `im::OrdMap`, so cloning one is cheap and never
//!    shares mutable state with the source.
//!
//! 3. **Dense Action Ids**: a move `(r1, c1) -> (r2, c2)` is the integer
//!    `r1 + c1*n + r2*n^2 + c2*n^3`; oracles see a policy over all `n^4` ids.
//!
//! ## Modules
//!
//! - `core`: sides and the seeded RNG
//! - `board`: board state, move rules, captures, win detection, encoding
//! - `mcts`: PUCT tree search over boards
//! - `nn`: board encoders and the oracle interface
//! - `training`: self-play episodes, example history, arena and coach

pub mod core;
pub mod board;
pub mod mcts;
pub mod nn;
pub mod training;

// Re-export commonly used types
pub use crate::core::{GameRng, Side};

pub use crate::board::{
    decode_action, encode_action, ActionId, Board, Move, MoveDiff, MoveOutcome, Owner, Piece,
    Position, Ruleset,
};

pub use crate::mcts::{MCTSConfig, SearchError, SearchStats, SearchTree, TreeSearch};

pub use crate::nn::{
    EncodedState, FlatBoardEncoder, Oracle, OracleError, PlaneEncoder, Prediction, StateEncoder,
    TrainableOracle, UniformOracle,
};

pub use crate::training::{
    Arena, ArenaResult, Coach, ExampleHistory, GameRecord, SelfPlayConfig, SelfPlayWorker,
    TrainingError, TrainingExample,
};
