//! Core MCTS search algorithm.
//!
//! Each iteration descends from the root by the selection policy, plays the
//! leaf's pending move (activation), scores the leaf by its winner or by
//! expanding it through the oracle, and backs the value up the path with
//! the sign flipped for nodes whose side to move differs from the leaf's.

use std::time::Instant;

use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::board::{ActionId, Board};
use crate::core::Side;
use crate::nn::{FlatBoardEncoder, Oracle, OracleError, StateEncoder};

use super::config::MCTSConfig;
use super::node::{NodeId, SearchNode};
use super::policy::{select_child, Puct, SelectionPolicy};
use super::stats::SearchStats;
use super::tree::SearchTree;

/// Errors that can occur during search.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("game is already decided: {0} won")]
    GameOver(Side),

    #[error("no legal moves available")]
    NoLegalMoves,

    #[error("{0} expanded before activation")]
    NotActivated(NodeId),

    #[error("stored action {action} could not be played")]
    ActivationFailed { action: ActionId },

    #[error("oracle error: {0}")]
    Oracle(#[from] OracleError),
}

/// Main MCTS search context.
///
/// Owns the configuration, the board encoder handed to the oracle and the
/// selection policy. Every call to [`TreeSearch::run`] builds a fresh tree
/// and returns it.
pub struct TreeSearch {
    config: MCTSConfig,
    encoder: Box<dyn StateEncoder>,
    selection: Box<dyn SelectionPolicy>,
    stats: SearchStats,
}

impl TreeSearch {
    pub fn new(config: MCTSConfig) -> Self {
        Self {
            config,
            encoder: Box::new(FlatBoardEncoder),
            selection: Box::new(Puct),
            stats: SearchStats::default(),
        }
    }

    /// Set the encoder used to present boards to the oracle.
    pub fn with_encoder<E: StateEncoder + 'static>(mut self, encoder: E) -> Self {
        self.encoder = Box::new(encoder);
        self
    }

    /// Set a custom selection policy.
    pub fn with_selection<S: SelectionPolicy + 'static>(mut self, selection: S) -> Self {
        self.selection = Box::new(selection);
        self
    }

    #[must_use]
    pub fn config(&self) -> &MCTSConfig {
        &self.config
    }

    /// Statistics of the most recent search.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Run the configured number of iterations from `board`.
    pub fn search(&mut self, board: &Board, oracle: Option<&dyn Oracle>) -> Result<SearchTree, SearchError> {
        self.run(board, self.config.iterations, oracle)
    }

    /// Run `iterations` iterations from `board` and return the tree.
    ///
    /// Without an oracle, expansion uses a uniform prior over the legal
    /// moves. The root's children end up with `iterations` visits between
    /// them unless the time budget or node cap stops the search first.
    pub fn run(
        &mut self,
        board: &Board,
        iterations: u32,
        oracle: Option<&dyn Oracle>,
    ) -> Result<SearchTree, SearchError> {
        let start = Instant::now();
        self.stats.reset();

        let mut tree = SearchTree::new(board.clone());
        let root = tree.root();

        if let Some(winner) = tree.root_node().winner {
            return Err(SearchError::GameOver(winner));
        }

        self.expand(&mut tree, root, oracle)?;
        if tree.root_node().children.is_empty() {
            return Err(SearchError::NoLegalMoves);
        }

        for _ in 0..iterations {
            if self.budget_exhausted(start, &tree) {
                self.stats.truncated = true;
                break;
            }
            self.iteration(&mut tree, oracle)?;
            self.stats.iterations += 1;
        }

        self.stats.time_us = start.elapsed().as_micros() as u64;
        debug!(
            iterations = self.stats.iterations,
            nodes = tree.len(),
            max_depth = self.stats.max_depth,
            time_us = self.stats.time_us,
            "search finished"
        );

        Ok(tree)
    }

    fn budget_exhausted(&self, start: Instant, tree: &SearchTree) -> bool {
        if tree.len() >= self.config.max_nodes {
            return true;
        }
        self.config
            .time_budget_ms
            .is_some_and(|budget| start.elapsed().as_millis() >= u128::from(budget))
    }

    /// Single iteration: select, activate, evaluate, backpropagate.
    fn iteration(&mut self, tree: &mut SearchTree, oracle: Option<&dyn Oracle>) -> Result<(), SearchError> {
        // === SELECTION ===
        let mut current = tree.root();
        let mut path = vec![current];
        loop {
            let node = tree.get(current);
            if !node.expanded || node.children.is_empty() {
                break;
            }
            match select_child(tree, current, self.selection.as_ref(), &self.config) {
                Some(child) => {
                    current = child;
                    path.push(child);
                }
                None => break,
            }
        }

        // === ACTIVATION ===
        if !tree.get(current).activated {
            self.activate(tree, current)?;
        }

        // === EVALUATION ===
        let (leaf_turn, winner, expanded) = {
            let leaf = tree.get(current);
            (leaf.to_move(), leaf.winner, leaf.expanded)
        };
        let value = if let Some(winner) = winner {
            self.stats.terminal_visits += 1;
            if winner == leaf_turn {
                1.0
            } else {
                -1.0
            }
        } else if expanded {
            // Expanded with no children: the side to move is stuck.
            -1.0
        } else {
            self.expand(tree, current, oracle)?
        };

        trace!(leaf = %current, depth = path.len() - 1, value, "iteration");

        // === BACKPROPAGATION ===
        for &id in &path {
            let node = tree.get_mut(id);
            node.visit_count += 1;
            if node.to_move() == leaf_turn {
                node.value_sum += value;
            } else {
                node.value_sum -= value;
            }
        }

        Ok(())
    }

    /// Play the node's stored action on its board copy.
    fn activate(&mut self, tree: &mut SearchTree, id: NodeId) -> Result<(), SearchError> {
        let node = tree.get_mut(id);
        if let Some(action) = node.action {
            if !node.board.apply_action(action) {
                return Err(SearchError::ActivationFailed { action });
            }
        }
        node.activated = true;
        node.winner = node.board.check_for_winner();
        self.stats.max_depth = self.stats.max_depth.max(node.depth);
        Ok(())
    }

    /// Create one child per legal action and return the value to back up.
    fn expand(
        &mut self,
        tree: &mut SearchTree,
        id: NodeId,
        oracle: Option<&dyn Oracle>,
    ) -> Result<f64, SearchError> {
        let node = tree.get(id);
        debug_assert!(node.activated, "{id} expanded before activation");
        if !node.activated {
            return Err(SearchError::NotActivated(id));
        }

        let legal = node.board.legal_actions();
        let (mut priors, value) = match oracle {
            Some(oracle) => {
                let prediction = oracle.predict(&self.encoder.encode(&node.board))?;
                self.stats.oracle_calls += 1;
                let expected = node.board.action_size();
                if prediction.policy.len() != expected {
                    return Err(OracleError::ShapeMismatch {
                        expected,
                        actual: prediction.policy.len(),
                    }
                    .into());
                }
                let priors: Vec<f32> = legal
                    .iter()
                    .map(|&action| sanitize(prediction.policy[action]))
                    .collect();
                let value = if prediction.value.is_finite() {
                    f64::from(prediction.value.clamp(-1.0, 1.0))
                } else {
                    0.0
                };
                (priors, value)
            }
            None => (vec![1.0; legal.len()], 0.0),
        };

        let total: f32 = priors.iter().sum();
        if total > 0.0 && total.is_finite() {
            for p in &mut priors {
                *p /= total;
            }
        } else if !legal.is_empty() {
            warn!(node = %id, legal = legal.len(), "oracle gave no mass to legal moves, using uniform prior");
            priors.fill(1.0 / legal.len() as f32);
        }

        let depth = node.depth + 1;
        let stubs: Vec<SearchNode> = legal
            .iter()
            .zip(&priors)
            .map(|(&action, &prior)| SearchNode::stub(id, action, prior, &node.board, depth))
            .collect();

        let mut children = Vec::with_capacity(stubs.len());
        for (&action, stub) in legal.iter().zip(stubs) {
            children.push((action, tree.alloc(stub)));
        }

        let node = tree.get_mut(id);
        node.children = children;
        node.expanded = true;
        self.stats.nodes_expanded += 1;

        Ok(if self.config.use_oracle_value { value } else { 0.0 })
    }
}

fn sanitize(p: f32) -> f32 {
    if p.is_finite() {
        p.max(0.0)
    } else {
        0.0
    }
}
