//! The board: position index, occupancy grid, turn and king lookup.
//!
//! Pieces live in a persistent `im::OrdMap` keyed by [`Position`], so
//! cloning a board for a search node is O(1) and later edits on either copy
//! never show through to the other. The flat occupancy grid mirrors the
//! index and is what collaborators (encoders, renderers) consume.

use std::hash::{Hash, Hasher};

use im::OrdMap;
use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::piece::{Owner, Piece, EMPTY};
use super::position::Position;
use super::ruleset::Ruleset;
use super::template::STANDARD_LAYOUT;
use crate::core::Side;

/// A Tafl board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    rows: usize,
    cols: usize,

    /// Row-major occupancy codes; always agrees with `pieces`.
    grid: Vec<u8>,

    /// Position index. Each piece's own row/col matches its key.
    pieces: OrdMap<Position, Piece>,

    /// Cached king square (the king itself lives in `pieces`).
    king: Option<Position>,

    turn: Side,
    valid: bool,

    /// The king stands on a throne square and leaves a marker when it moves.
    pub(super) king_on_throne: bool,

    ruleset: Ruleset,
}

impl Board {
    /// The standard 11x11 layout, attackers to move.
    #[must_use]
    pub fn new() -> Self {
        Self::from_template(&STANDARD_LAYOUT)
    }

    /// Build a board from a rectangular template of occupancy codes.
    ///
    /// Pieces are registered without resolving captures. Malformed templates
    /// (empty, ragged, unknown codes, no king or several kings) still produce
    /// a board, flagged invalid.
    pub fn from_template<R: AsRef<[u8]>>(template: &[R]) -> Self {
        Self::from_template_with_turn(template, Side::Attacker)
    }

    /// Like [`Board::from_template`] with an explicit side to move.
    pub fn from_template_with_turn<R: AsRef<[u8]>>(template: &[R], turn: Side) -> Self {
        let rows = template.len();
        let cols = template.first().map_or(0, |row| row.as_ref().len());

        let mut board = Self {
            rows,
            cols,
            grid: vec![EMPTY; rows * cols],
            pieces: OrdMap::new(),
            king: None,
            turn,
            valid: false,
            king_on_throne: false,
            ruleset: Ruleset::default(),
        };

        let mut well_formed = cols > 0;
        let mut kings = 0usize;
        for (r, row) in template.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                well_formed = false;
                continue;
            }
            for (c, &code) in row.iter().enumerate() {
                if code == EMPTY {
                    continue;
                }
                match Piece::from_code(code, r, c) {
                    Some(piece) => {
                        kings += usize::from(piece.is_king);
                        board.place(piece);
                    }
                    None => well_formed = false,
                }
            }
        }

        board.king_on_throne = board.king.is_some();
        board.valid = well_formed && kings == 1 && board.validate_board();
        if !board.valid {
            debug!(rows, cols, kings, "board template rejected");
        }
        board
    }

    /// Replace the rule variants in effect.
    #[must_use]
    pub fn with_ruleset(mut self, ruleset: Ruleset) -> Self {
        self.ruleset = ruleset;
        self
    }

    /// Check structural invariants: at least one row, exactly one king, and
    /// a grid that agrees with the position index.
    #[must_use]
    pub fn validate_board(&self) -> bool {
        if self.rows == 0 || self.cols == 0 {
            return false;
        }
        let kings = self.pieces.values().filter(|p| p.is_king).count();
        if kings != 1 || self.king.is_none() {
            return false;
        }
        let occupied = self.grid.iter().filter(|&&code| code != EMPTY).count();
        occupied == self.pieces.len()
            && self.pieces.iter().all(|(pos, piece)| {
                *pos == piece.position() && self.grid[pos.index(self.cols)] == piece.code()
            })
    }

    /// Validity as determined at construction.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Side to move.
    #[must_use]
    pub fn turn(&self) -> Side {
        self.turn
    }

    #[must_use]
    pub fn ruleset(&self) -> &Ruleset {
        &self.ruleset
    }

    #[must_use]
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    /// True for the four corner squares.
    #[must_use]
    pub fn is_corner(&self, pos: Position) -> bool {
        self.in_bounds(pos)
            && (pos.row == 0 || pos.row + 1 == self.rows)
            && (pos.col == 0 || pos.col + 1 == self.cols)
    }

    /// True for squares on the outermost ring.
    #[must_use]
    pub fn is_edge(&self, pos: Position) -> bool {
        self.in_bounds(pos)
            && (pos.row == 0 || pos.col == 0 || pos.row + 1 == self.rows || pos.col + 1 == self.cols)
    }

    #[must_use]
    pub fn get_piece(&self, pos: Position) -> Option<&Piece> {
        self.pieces.get(&pos)
    }

    /// Occupancy code at `pos` (0 when empty or off the board).
    #[must_use]
    pub fn code_at(&self, pos: Position) -> u8 {
        if self.in_bounds(pos) {
            self.grid[pos.index(self.cols)]
        } else {
            EMPTY
        }
    }

    #[must_use]
    pub fn king(&self) -> Option<&Piece> {
        self.king.and_then(|pos| self.pieces.get(&pos))
    }

    #[must_use]
    pub fn king_position(&self) -> Option<Position> {
        self.king
    }

    /// All pieces in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.values()
    }

    /// Pieces owned by `owner`, in row-major order. Defender pieces
    /// include the king.
    #[must_use]
    pub fn get_owner_pieces(&self, owner: Owner) -> Vec<Piece> {
        self.pieces.values().filter(|p| p.owner == owner).copied().collect()
    }

    #[must_use]
    pub fn count(&self, owner: Owner) -> usize {
        self.pieces.values().filter(|p| p.owner == owner).count()
    }

    /// Row-major copy of the occupancy grid.
    #[must_use]
    pub fn to_flat_array(&self) -> Vec<u8> {
        self.grid.clone()
    }

    /// Row-major occupancy grid without copying.
    #[must_use]
    pub fn grid(&self) -> &[u8] {
        &self.grid
    }

    /// Hash of the grid and side to move, for deduplicating positions.
    #[must_use]
    pub fn board_hash(&self) -> u64 {
        let mut hasher = FxHasher::default();
        self.rows.hash(&mut hasher);
        self.grid.hash(&mut hasher);
        self.turn.hash(&mut hasher);
        hasher.finish()
    }

    pub(super) fn set_turn(&mut self, turn: Side) {
        self.turn = turn;
    }

    /// Register a piece at its own position without resolving captures.
    /// Replaces whatever was there.
    pub(super) fn place(&mut self, piece: Piece) {
        let pos = piece.position();
        if let Some(old) = self.pieces.insert(pos, piece) {
            if old.is_king && self.king == Some(pos) {
                self.king = None;
            }
        }
        self.grid[pos.index(self.cols)] = piece.code();
        if piece.is_king {
            self.king = Some(pos);
        }
    }

    /// Remove and return the piece at `pos`.
    pub(super) fn remove_at(&mut self, pos: Position) -> Option<Piece> {
        let piece = self.pieces.remove(&pos)?;
        self.grid[pos.index(self.cols)] = EMPTY;
        if piece.is_king && self.king == Some(pos) {
            self.king = None;
        }
        Some(piece)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.grid.chunks(self.cols.max(1)) {
            let line: String = row
                .iter()
                .map(|&code| match code {
                    1 => 'A',
                    2 => 'D',
                    3 => 'K',
                    4 => 'X',
                    5 => 'T',
                    _ => '.',
                })
                .collect();
            writeln!(f, "{}", line)?;
        }
        write!(f, "{} to move", self.turn)
    }
}
