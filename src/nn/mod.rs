//! Oracle integration.
//!
//! ## Overview
//!
//! - **Traits**: `Oracle` (predict) and `TrainableOracle` (predict + train)
//! - **Encoding**: `StateEncoder` with `FlatBoardEncoder` and `PlaneEncoder`
//! - **Baselines**: `UniformOracle`, `MeanPolicyOracle`
//!
//! ## Usage
//!
//! ```
//! use rust_tafl::board::Board;
//! use rust_tafl::nn::{FlatBoardEncoder, Oracle, StateEncoder, UniformOracle};
//!
//! let board = Board::new();
//! let oracle = UniformOracle::new(board.action_size());
//!
//! let encoded = FlatBoardEncoder.encode(&board);
//! let prediction = oracle.predict(&encoded).unwrap();
//! assert_eq!(prediction.policy.len(), board.action_size());
//! ```

pub mod encoder;
pub mod traits;

pub use encoder::{FlatBoardEncoder, PlaneEncoder, StateEncoder};
pub use traits::{
    EncodedState, MeanPolicyOracle, Oracle, OracleError, Prediction, TrainableOracle,
    UniformOracle,
};
