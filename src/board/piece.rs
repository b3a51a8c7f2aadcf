//! Pieces and the occupancy codes they map to.

use serde::{Deserialize, Serialize};

use super::position::Position;
use crate::core::Side;

/// Occupancy code of an empty square.
pub const EMPTY: u8 = 0;
/// Occupancy code of an attacker.
pub const ATTACKER: u8 = 1;
/// Occupancy code of a defender soldier.
pub const DEFENDER: u8 = 2;
/// Occupancy code of the king.
pub const KING: u8 = 3;
/// Occupancy code of a corner marker.
pub const CORNER: u8 = 4;
/// Occupancy code of a throne marker.
pub const THRONE: u8 = 5;

/// Who a piece belongs to.
///
/// Corner and throne markers are neutral structures: they never move, are
/// never captured, and count as hostile to both sides when flanking.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Owner {
    Attacker,
    Defender,
    Neutral,
}

impl Owner {
    /// The playing side, or `None` for neutral structures.
    #[must_use]
    pub const fn side(self) -> Option<Side> {
        match self {
            Owner::Attacker => Some(Side::Attacker),
            Owner::Defender => Some(Side::Defender),
            Owner::Neutral => None,
        }
    }
}

impl From<Side> for Owner {
    fn from(side: Side) -> Self {
        match side {
            Side::Attacker => Owner::Attacker,
            Side::Defender => Owner::Defender,
        }
    }
}

/// A single token on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub owner: Owner,
    pub row: usize,
    pub col: usize,
    pub is_king: bool,
    pub is_throne: bool,
}

impl Piece {
    /// Build a piece from a template code, or `None` for empty / unknown codes.
    #[must_use]
    pub fn from_code(code: u8, row: usize, col: usize) -> Option<Piece> {
        let (owner, is_king, is_throne) = match code {
            ATTACKER => (Owner::Attacker, false, false),
            DEFENDER => (Owner::Defender, false, false),
            KING => (Owner::Defender, true, false),
            CORNER => (Owner::Neutral, false, false),
            THRONE => (Owner::Neutral, false, true),
            _ => return None,
        };
        Some(Piece { owner, row, col, is_king, is_throne })
    }

    /// A throne marker at `pos`.
    #[must_use]
    pub fn throne(pos: Position) -> Piece {
        Piece {
            owner: Owner::Neutral,
            row: pos.row,
            col: pos.col,
            is_king: false,
            is_throne: true,
        }
    }

    /// Occupancy code for this piece.
    #[must_use]
    pub const fn code(&self) -> u8 {
        match self.owner {
            Owner::Attacker => ATTACKER,
            Owner::Defender if self.is_king => KING,
            Owner::Defender => DEFENDER,
            Owner::Neutral if self.is_throne => THRONE,
            Owner::Neutral => CORNER,
        }
    }

    #[must_use]
    pub const fn position(&self) -> Position {
        Position::new(self.row, self.col)
    }

    #[must_use]
    pub const fn is_neutral(&self) -> bool {
        matches!(self.owner, Owner::Neutral)
    }

    /// True if this piece counts as a flanking enemy of `other`.
    #[must_use]
    pub fn is_hostile_to(&self, other: &Piece) -> bool {
        self.owner != other.owner
    }
}

/// Which sides of a piece are flanked by a hostile neighbor.
///
/// Recomputed from the position index on demand rather than stored, so a
/// piece never carries stale adjacency after a neighbor moves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CaptureFlags {
    pub north: bool,
    pub south: bool,
    pub east: bool,
    pub west: bool,
}

impl CaptureFlags {
    /// Whether these flags remove a piece: soldiers fall to a flank on one
    /// full axis, the king only when enclosed on all four sides.
    #[must_use]
    pub const fn is_captured(&self, is_king: bool) -> bool {
        if is_king {
            self.north && self.south && self.east && self.west
        } else {
            (self.north && self.south) || (self.east && self.west)
        }
    }
}
