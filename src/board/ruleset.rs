//! Rule variants that differ between Tafl traditions.

use serde::{Deserialize, Serialize};

/// Optional rules layered on top of custodian capture.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ruleset {
    /// Defenders win once the attacker count drops below this.
    pub min_attackers: usize,

    /// The king leaves a throne marker on the square it starts from (and on
    /// any throne square it later vacates).
    pub leave_throne: bool,

    /// Enable mass capture of enemy rows pinned against an edge.
    pub shield_wall: bool,

    /// Enable the edge-fort victory for the defenders.
    pub fort_victory: bool,

    /// A side with no legal move on its turn loses. Off leaves a blocked
    /// side without a winner until the move cap.
    pub stalemate_loses: bool,
}

impl Default for Ruleset {
    fn default() -> Self {
        Self {
            min_attackers: 4,
            leave_throne: true,
            shield_wall: true,
            fort_victory: true,
            stalemate_loses: true,
        }
    }
}

impl Ruleset {
    /// Plain custodian rules: no shield wall, fort or throne marker.
    #[must_use]
    pub fn basic() -> Self {
        Self {
            leave_throne: false,
            shield_wall: false,
            fort_victory: false,
            ..Self::default()
        }
    }

    pub fn with_min_attackers(mut self, min: usize) -> Self {
        self.min_attackers = min;
        self
    }

    pub fn with_leave_throne(mut self, enabled: bool) -> Self {
        self.leave_throne = enabled;
        self
    }

    pub fn with_shield_wall(mut self, enabled: bool) -> Self {
        self.shield_wall = enabled;
        self
    }

    pub fn with_fort_victory(mut self, enabled: bool) -> Self {
        self.fort_victory = enabled;
        self
    }

    pub fn with_stalemate_loses(mut self, enabled: bool) -> Self {
        self.stalemate_loses = enabled;
        self
    }
}
