//! MCTS configuration parameters.

use serde::{Deserialize, Serialize};

/// MCTS configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MCTSConfig {
    /// Iterations per search when the caller does not pass a count.
    pub iterations: u32,

    /// Weight of the prior-driven exploration term (default: 1.0).
    pub c_puct: f64,

    /// Back up the oracle's value on expansion instead of 0.
    pub use_oracle_value: bool,

    /// Optional wall-clock cap, checked between iterations.
    pub time_budget_ms: Option<u64>,

    /// Maximum nodes to allocate in the tree.
    /// Prevents memory exhaustion on large searches.
    pub max_nodes: usize,
}

impl Default for MCTSConfig {
    fn default() -> Self {
        Self {
            iterations: 800,
            c_puct: 1.0,
            use_oracle_value: false,
            time_budget_ms: None,
            max_nodes: 2_000_000,
        }
    }
}

impl MCTSConfig {
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_c_puct(mut self, c: f64) -> Self {
        self.c_puct = c;
        self
    }

    pub fn with_oracle_value(mut self, enabled: bool) -> Self {
        self.use_oracle_value = enabled;
        self
    }

    pub fn with_time_budget_ms(mut self, budget: u64) -> Self {
        self.time_budget_ms = Some(budget);
        self
    }

    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }
}
