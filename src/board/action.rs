//! Dense integer encoding of moves.
//!
//! A move `(row1, col1) -> (row2, col2)` on a board of dimension `n` packs
//! into `row1 + col1*n + row2*n^2 + col2*n^3`. The id space has `n^4`
//! entries; only a small, position-dependent subset is legal at any time,
//! which [`Board::valid_action_mask`] reports.

use serde::{Deserialize, Serialize};

use super::diff::removed_cells;
use super::position::Position;
use super::rules::MoveOutcome;
use super::state::Board;

/// Flat index into the action space.
pub type ActionId = usize;

/// A from/to pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Position,
    pub to: Position,
}

impl Move {
    #[must_use]
    pub const fn new(from: Position, to: Position) -> Self {
        Self { from, to }
    }
}

/// What a renderer needs after a move: the move itself and the squares
/// whose occupancy dropped by one or two (a piece left or was taken).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveDiff {
    pub mv: Move,
    pub removed: Vec<Position>,
    pub outcome: MoveOutcome,
}

/// Number of action ids for a board of dimension `n`.
#[must_use]
pub const fn action_space_size(n: usize) -> usize {
    n * n * n * n
}

/// Pack a move. Coordinates must be below `n`.
#[must_use]
pub const fn encode_action(mv: Move, n: usize) -> ActionId {
    mv.from.row + mv.from.col * n + mv.to.row * n * n + mv.to.col * n * n * n
}

/// Unpack an action id, or `None` if it lies outside the action space.
#[must_use]
pub fn decode_action(id: ActionId, n: usize) -> Option<Move> {
    if n == 0 || id >= action_space_size(n) {
        return None;
    }
    let row1 = id % n;
    let col1 = (id / n) % n;
    let row2 = (id / (n * n)) % n;
    let col2 = id / (n * n * n);
    Some(Move::new(Position::new(row1, col1), Position::new(row2, col2)))
}

impl Board {
    /// Radix of the action encoding: the larger board dimension, so
    /// non-square test boards still encode without collisions.
    #[must_use]
    pub fn action_radix(&self) -> usize {
        self.rows().max(self.cols())
    }

    /// Size of the dense action space (and of every policy vector).
    #[must_use]
    pub fn action_size(&self) -> usize {
        action_space_size(self.action_radix())
    }

    /// Encode a move on this board, or `None` if either square is off it.
    #[must_use]
    pub fn encode_move(&self, mv: Move) -> Option<ActionId> {
        (self.in_bounds(mv.from) && self.in_bounds(mv.to))
            .then(|| encode_action(mv, self.action_radix()))
    }

    /// Decode an action id into a move on this board. Fails closed for ids
    /// outside the space or squares off a non-square board.
    #[must_use]
    pub fn decode_move(&self, id: ActionId) -> Option<Move> {
        decode_action(id, self.action_radix())
            .filter(|mv| self.in_bounds(mv.from) && self.in_bounds(mv.to))
    }

    /// Legal action ids for the side to move, ascending.
    #[must_use]
    pub fn legal_actions(&self) -> Vec<ActionId> {
        let n = self.action_radix();
        let own = self.turn();
        let mut actions: Vec<ActionId> = self
            .pieces()
            .filter(|p| p.owner.side() == Some(own))
            .flat_map(|p| {
                let from = p.position();
                self.get_valid_moves(from)
                    .into_iter()
                    .map(move |to| encode_action(Move::new(from, to), n))
            })
            .collect();
        actions.sort_unstable();
        actions
    }

    /// Boolean legality mask over the whole action space.
    #[must_use]
    pub fn valid_action_mask(&self) -> Vec<bool> {
        let mut mask = vec![false; self.action_size()];
        for id in self.legal_actions() {
            mask[id] = true;
        }
        mask
    }

    /// Play the move an action id encodes. Returns `false` (board untouched)
    /// for undecodable ids and illegal moves.
    pub fn apply_action(&mut self, id: ActionId) -> bool {
        match self.decode_move(id) {
            Some(mv) => self.move_piece(mv.from, mv.to),
            None => false,
        }
    }

    /// Play an action and report the renderer diff.
    pub fn apply_action_with_diff(&mut self, id: ActionId) -> Option<MoveDiff> {
        let mv = self.decode_move(id)?;
        let before = self.to_flat_array();
        let outcome = self.try_move(mv.from, mv.to)?;
        let removed = removed_cells(&before, self.grid(), self.cols());
        Some(MoveDiff { mv, removed, outcome })
    }
}
