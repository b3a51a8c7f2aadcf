//! Player identification.
//!
//! ## Side
//!
//! Tafl is a two-player asymmetric game: the attackers surround the board
//! and move first, the defenders escort the king. The numeric ids match the
//! turn encoding used in training records (0 = attacker, 1 = defender).

use serde::{Deserialize, Serialize};

/// One of the two players.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Side {
    Attacker = 0,
    Defender = 1,
}

impl Side {
    /// Both sides, in id order.
    pub const ALL: [Side; 2] = [Side::Attacker, Side::Defender];

    /// Numeric player id (0 = attacker, 1 = defender).
    #[must_use]
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Parse a numeric player id.
    ///
    /// ```
    /// use rust_tafl::core::Side;
    ///
    /// assert_eq!(Side::from_id(0), Some(Side::Attacker));
    /// assert_eq!(Side::from_id(1), Some(Side::Defender));
    /// assert_eq!(Side::from_id(2), None);
    /// ```
    #[must_use]
    pub const fn from_id(id: u8) -> Option<Side> {
        match id {
            0 => Some(Side::Attacker),
            1 => Some(Side::Defender),
            _ => None,
        }
    }

    /// The other side.
    #[must_use]
    pub const fn opponent(self) -> Side {
        match self {
            Side::Attacker => Side::Defender,
            Side::Defender => Side::Attacker,
        }
    }

    /// Terminal reward from this side's point of view.
    #[must_use]
    pub fn outcome_for(self, winner: Option<Side>) -> f32 {
        match winner {
            Some(w) if w == self => 1.0,
            Some(_) => -1.0,
            None => 0.0,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Attacker => write!(f, "Attacker"),
            Side::Defender => write!(f, "Defender"),
        }
    }
}
