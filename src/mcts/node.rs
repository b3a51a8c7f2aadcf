//! Search node structures.
//!
//! Nodes live in an arena ([`super::tree::SearchTree`]) and refer to each
//! other through `NodeId` indices.

use serde::{Deserialize, Serialize};

use crate::board::{ActionId, Board};
use crate::core::Side;

/// Index into the search tree's node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Sentinel value representing no node.
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Create a new node ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Check if this is the NONE sentinel.
    #[inline]
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    /// Get the raw index value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_none() {
            write!(f, "NodeId(NONE)")
        } else {
            write!(f, "NodeId({})", self.0)
        }
    }
}

/// A node in the search tree.
///
/// Each node owns its board. A child starts as a stub holding a copy of
/// its parent's board and the action that leads to it; the action is only
/// played on activation, the first time the node is selected as a leaf.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchNode {
    /// Parent node (NONE for root).
    pub parent: NodeId,

    /// Move that produced this node (None for root).
    pub action: Option<ActionId>,

    /// Prior probability from the oracle (or uniform).
    pub prior: f32,

    pub visit_count: u32,

    /// Sum of backed-up values, from this node's side-to-move perspective.
    pub value_sum: f64,

    pub board: Board,

    /// Children in ascending action-id order.
    pub children: Vec<(ActionId, NodeId)>,

    pub expanded: bool,
    pub activated: bool,

    /// Winner of the position, recorded at activation.
    pub winner: Option<Side>,

    /// Depth in tree (root = 0).
    pub depth: u16,
}

impl SearchNode {
    /// An activated root for `board`.
    pub fn root(board: Board) -> Self {
        let winner = board.check_for_winner();
        Self {
            parent: NodeId::NONE,
            action: None,
            prior: 1.0,
            visit_count: 0,
            value_sum: 0.0,
            board,
            children: Vec::new(),
            expanded: false,
            activated: true,
            winner,
            depth: 0,
        }
    }

    /// An unactivated child that will replay `action` on `parent_board`.
    pub fn stub(parent: NodeId, action: ActionId, prior: f32, parent_board: &Board, depth: u16) -> Self {
        Self {
            parent,
            action: Some(action),
            prior,
            visit_count: 0,
            value_sum: 0.0,
            board: parent_board.clone(),
            children: Vec::new(),
            expanded: false,
            activated: false,
            winner: None,
            depth,
        }
    }

    /// Average backed-up value, 0 if unvisited.
    #[must_use]
    pub fn mean_value(&self) -> f64 {
        if self.visit_count == 0 {
            0.0
        } else {
            self.value_sum / f64::from(self.visit_count)
        }
    }

    /// Side to move at this node (meaningful once activated).
    #[must_use]
    pub fn to_move(&self) -> Side {
        self.board.turn()
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.winner.is_some()
    }
}
