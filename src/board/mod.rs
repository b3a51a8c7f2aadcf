//! Tafl rules engine.
//!
//! ## Overview
//!
//! - **Board**: position index plus occupancy grid, cheap to clone
//! - **Rules**: sliding moves, custodian and shield-wall capture, win checks
//! - **Actions**: dense `(from, to)` integer encoding and legality mask
//! - **Helpers**: square notation and renderer diffs
//!
//! ## Usage
//!
//! ```
//! use rust_tafl::board::{Board, Owner, Position};
//! use rust_tafl::core::Side;
//!
//! let mut board = Board::new();
//! assert!(board.is_valid());
//! assert_eq!(board.get_owner_pieces(Owner::Attacker).len(), 24);
//!
//! // Attackers open by sliding a piece two squares down
//! assert!(board.move_piece(Position::new(0, 3), Position::new(2, 3)));
//! assert_eq!(board.turn(), Side::Defender);
//! assert_eq!(board.check_for_winner(), None);
//! ```

pub mod action;
pub mod diff;
pub mod notation;
pub mod piece;
pub mod position;
pub mod rules;
pub mod ruleset;
pub mod state;
pub mod template;

pub use action::{action_space_size, decode_action, encode_action, ActionId, Move, MoveDiff};
pub use diff::removed_cells;
pub use piece::{CaptureFlags, Owner, Piece};
pub use position::{Direction, Position};
pub use rules::{MoveList, MoveOutcome};
pub use ruleset::Ruleset;
pub use state::Board;
pub use template::STANDARD_LAYOUT;
