//! Arena-based search tree.
//!
//! Uses a flat `Vec<SearchNode>` with index-based references for efficiency,
//! cache-friendliness, and serializability.

use serde::{Deserialize, Serialize};

use super::node::{NodeId, SearchNode};
use crate::board::{ActionId, Board};

/// Arena-based search tree.
///
/// Nodes are stored in a flat vector and referenced by `NodeId` indices.
/// The tree only ever grows; a new search starts a new tree.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchTree {
    /// All nodes in the tree.
    nodes: Vec<SearchNode>,

    /// The root node ID (always 0).
    root: NodeId,
}

impl SearchTree {
    /// Create a tree whose activated root holds `board`.
    pub fn new(board: Board) -> Self {
        Self::with_capacity(board, 1024)
    }

    /// Create a tree with custom initial capacity.
    pub fn with_capacity(board: Board, capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity.max(1));
        nodes.push(SearchNode::root(board));
        Self {
            nodes,
            root: NodeId::new(0),
        }
    }

    /// Get the root node ID.
    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a node by ID.
    #[inline]
    #[must_use]
    pub fn get(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.0 as usize]
    }

    /// Get a mutable node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut SearchNode {
        &mut self.nodes[id.0 as usize]
    }

    /// Allocate a new node, returning its ID.
    pub fn alloc(&mut self, node: SearchNode) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Number of nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get the root node.
    #[must_use]
    pub fn root_node(&self) -> &SearchNode {
        self.get(self.root)
    }

    /// Children of a node as (action, node) pairs, ascending by action.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = (ActionId, &SearchNode)> + '_ {
        self.get(id).children.iter().map(move |&(action, child)| (action, self.get(child)))
    }

    /// Visit count per root action, ascending by action.
    #[must_use]
    pub fn visit_counts(&self) -> Vec<(ActionId, u32)> {
        self.children(self.root)
            .map(|(action, child)| (action, child.visit_count))
            .collect()
    }

    /// Visit shares of the root actions that were visited at least once,
    /// ascending by action. Empty if nothing was visited.
    #[must_use]
    pub fn visit_targets(&self) -> Vec<(ActionId, f32)> {
        let counts = self.visit_counts();
        let total: u32 = counts.iter().map(|&(_, v)| v).sum();
        if total == 0 {
            return Vec::new();
        }
        counts
            .into_iter()
            .filter(|&(_, v)| v > 0)
            .map(|(action, v)| (action, v as f32 / total as f32))
            .collect()
    }

    /// Empirical policy: root visit counts normalized over the full action
    /// space, indexed by action id. All zeros if nothing was visited.
    #[must_use]
    pub fn visit_distribution(&self) -> Vec<f32> {
        let mut policy = vec![0.0f32; self.root_node().board.action_size()];
        for (action, share) in self.visit_targets() {
            policy[action] = share;
        }
        policy
    }

    /// Most visited root action; ties go to the lowest action id.
    #[must_use]
    pub fn best_action(&self) -> Option<ActionId> {
        let mut best: Option<(ActionId, u32)> = None;
        for (action, visits) in self.visit_counts() {
            if best.map_or(true, |(_, v)| visits > v) {
                best = Some((action, visits));
            }
        }
        best.map(|(action, _)| action)
    }

    /// Get statistics about the tree.
    #[must_use]
    pub fn stats(&self) -> TreeStats {
        TreeStats {
            node_count: self.nodes.len(),
            max_depth: self.nodes.iter().map(|n| n.depth).max().unwrap_or(0),
            activated_count: self.nodes.iter().filter(|n| n.activated).count(),
            expanded_count: self.nodes.iter().filter(|n| n.expanded).count(),
            terminal_count: self.nodes.iter().filter(|n| n.is_terminal()).count(),
        }
    }

    /// Iterate over all nodes.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SearchNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeId::new(i as u32), n))
    }
}

/// Statistics about the search tree.
#[derive(Clone, Debug, Default)]
pub struct TreeStats {
    /// Total number of nodes.
    pub node_count: usize,

    /// Maximum depth reached.
    pub max_depth: u16,

    /// Nodes whose action has been played.
    pub activated_count: usize,

    /// Nodes whose children have been created.
    pub expanded_count: usize,

    /// Activated nodes with a decided game.
    pub terminal_count: usize,
}

impl TreeStats {
    /// Average children per expanded node.
    #[must_use]
    pub fn branching_factor(&self) -> f64 {
        if self.expanded_count == 0 {
            0.0
        } else {
            (self.node_count - 1) as f64 / self.expanded_count as f64
        }
    }

    /// Share of allocated nodes that have been activated.
    #[must_use]
    pub fn activation_ratio(&self) -> f64 {
        if self.node_count == 0 {
            0.0
        } else {
            self.activated_count as f64 / self.node_count as f64
        }
    }
}
