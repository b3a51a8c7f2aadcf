//! Child selection for tree descent.

use super::config::MCTSConfig;
use super::node::{NodeId, SearchNode};
use super::tree::SearchTree;

// =============================================================================
// Selection Policy
// =============================================================================

/// Scores a child of a node during descent; the highest score wins.
pub trait SelectionPolicy: Send + Sync {
    fn score(&self, parent_visits: u32, child: &SearchNode, config: &MCTSConfig) -> f64;
}

/// Prior-weighted upper confidence bound with the value negated.
///
/// `score = -Q(c) + c_puct * P(c) * sqrt(N(n)) / (1 + N(c))`
///
/// A child's mean value is stored from the child's side-to-move
/// perspective, i.e. the opponent of the player choosing, hence the
/// negation.
#[derive(Clone, Debug, Default)]
pub struct Puct;

impl SelectionPolicy for Puct {
    fn score(&self, parent_visits: u32, child: &SearchNode, config: &MCTSConfig) -> f64 {
        let exploration = config.c_puct
            * f64::from(child.prior)
            * f64::from(parent_visits).sqrt()
            / (1.0 + f64::from(child.visit_count));
        -child.mean_value() + exploration
    }
}

/// Pick the best-scoring child of `node`, scanning children in ascending
/// action order. Ties keep the first child found.
pub fn select_child(
    tree: &SearchTree,
    node: NodeId,
    policy: &dyn SelectionPolicy,
    config: &MCTSConfig,
) -> Option<NodeId> {
    let parent = tree.get(node);
    let mut best: Option<(NodeId, f64)> = None;
    for &(_, child_id) in &parent.children {
        let score = policy.score(parent.visit_count, tree.get(child_id), config);
        if best.map_or(true, |(_, s)| score > s) {
            best = Some((child_id, score));
        }
    }
    best.map(|(id, _)| id)
}
