//! Search statistics for diagnostics and tuning.

use serde::{Deserialize, Serialize};

/// Statistics collected during one search.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SearchStats {
    /// Total iterations performed.
    pub iterations: u32,

    /// Nodes expanded (children created).
    pub nodes_expanded: u32,

    /// Iterations that ended on a decided position.
    pub terminal_visits: u32,

    /// Oracle calls made.
    pub oracle_calls: u32,

    /// Maximum depth reached during search.
    pub max_depth: u16,

    /// Total time spent searching (microseconds).
    pub time_us: u64,

    /// Search stopped early on the time budget or node cap.
    pub truncated: bool,
}

impl SearchStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all statistics to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Calculate iterations per second.
    #[must_use]
    pub fn iterations_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            f64::from(self.iterations) / (self.time_us as f64 / 1_000_000.0)
        }
    }

    /// Share of iterations that reached a decided position.
    #[must_use]
    pub fn terminal_ratio(&self) -> f64 {
        if self.iterations == 0 {
            0.0
        } else {
            f64::from(self.terminal_visits) / f64::from(self.iterations)
        }
    }
}
