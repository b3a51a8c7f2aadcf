//! Monte Carlo Tree Search over Tafl boards.
//!
//! ## Overview
//!
//! - **Arena tree**: nodes live in a flat vector and refer to each other
//!   by `NodeId`; every node owns its own board.
//! - **Lazy activation**: a child is created as a stub holding its
//!   parent's board and plays its move only when first selected.
//! - **Oracle priors**: expansion asks an optional [`crate::nn::Oracle`]
//!   for a policy, masks it to the legal moves and renormalizes; without
//!   one the prior is uniform.
//! - **Negamax backup**: values are stored from each node's side-to-move
//!   perspective and flip sign between plies.
//!
//! ## Usage
//!
//! ```rust
//! use rust_tafl::board::Board;
//! use rust_tafl::mcts::{MCTSConfig, TreeSearch};
//!
//! let board = Board::new();
//! let mut search = TreeSearch::new(MCTSConfig::default());
//! let tree = search.run(&board, 64, None).unwrap();
//!
//! let visits: u32 = tree.visit_counts().iter().map(|&(_, v)| v).sum();
//! assert_eq!(visits, 64);
//!
//! // Training target and greedy choice
//! let policy = tree.visit_distribution();
//! assert_eq!(policy.len(), board.action_size());
//! let best = tree.best_action().unwrap();
//! assert!(board.legal_actions().contains(&best));
//! ```

pub mod config;
pub mod node;
pub mod policy;
pub mod search;
pub mod stats;
pub mod tree;

// Re-export main types
pub use config::MCTSConfig;
pub use node::{NodeId, SearchNode};
pub use policy::{select_child, Puct, SelectionPolicy};
pub use search::{SearchError, TreeSearch};
pub use stats::SearchStats;
pub use tree::{SearchTree, TreeStats};
