//! Oracle traits for policy and value prediction.
//!
//! The oracle is an external collaborator: the search only needs a dense
//! policy over the action space and a scalar value for an encoded board.
//! How it is computed, trained or checkpointed is opaque here.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::training::TrainingExample;

/// Encoded board as a flat tensor for oracle input.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EncodedState {
    /// Flattened tensor data (row-major order).
    pub tensor: Vec<f32>,

    /// Shape of the tensor (e.g. [planes, rows, cols] or [rows, cols]).
    pub shape: Vec<usize>,
}

impl EncodedState {
    /// Create a new encoded state.
    pub fn new(tensor: Vec<f32>, shape: Vec<usize>) -> Self {
        debug_assert_eq!(
            tensor.len(),
            shape.iter().product::<usize>(),
            "Tensor length must match shape product"
        );
        Self { tensor, shape }
    }

    /// Create a zero-filled encoded state with the given shape.
    pub fn zeros(shape: Vec<usize>) -> Self {
        let size = shape.iter().product();
        Self {
            tensor: vec![0.0; size],
            shape,
        }
    }

    /// Get the total number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tensor.len()
    }

    /// Check if the tensor is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tensor.is_empty()
    }

    /// Get element at a flat index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<f32> {
        self.tensor.get(index).copied()
    }
}

/// Oracle output for one board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Probability per action id over the full dense action space.
    pub policy: Vec<f32>,

    /// Expected outcome for the side to move, in [-1, 1].
    pub value: f32,
}

/// Failures at the oracle boundary.
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("policy has {actual} entries, expected {expected}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("prediction failed: {0}")]
    Prediction(String),

    #[error("training failed: {0}")]
    Training(String),
}

/// Policy/value predictor consulted when the search expands a node.
pub trait Oracle: Send + Sync {
    /// Predict a dense policy and a value for an encoded board.
    fn predict(&self, encoded: &EncodedState) -> Result<Prediction, OracleError>;

    /// Batch prediction (optional optimization).
    fn predict_batch(&self, encoded: &[EncodedState]) -> Result<Vec<Prediction>, OracleError> {
        encoded.iter().map(|e| self.predict(e)).collect()
    }
}

/// An oracle that can be retrained on self-play examples.
///
/// `Clone` stands in for checkpointing: the trainer snapshots the current
/// oracle before training and restores the snapshot if the retrained one
/// loses the arena.
pub trait TrainableOracle: Oracle + Clone {
    fn train(&mut self, examples: &[TrainingExample]) -> Result<(), OracleError>;
}

/// Uniform policy and zero value (baseline and search default).
#[derive(Clone, Debug, Default)]
pub struct UniformOracle {
    action_size: usize,
}

impl UniformOracle {
    pub fn new(action_size: usize) -> Self {
        Self { action_size }
    }
}

impl Oracle for UniformOracle {
    fn predict(&self, _encoded: &EncodedState) -> Result<Prediction, OracleError> {
        let policy = if self.action_size == 0 {
            vec![]
        } else {
            vec![1.0 / self.action_size as f32; self.action_size]
        };
        Ok(Prediction { policy, value: 0.0 })
    }
}

impl TrainableOracle for UniformOracle {
    fn train(&mut self, _examples: &[TrainingExample]) -> Result<(), OracleError> {
        Ok(())
    }
}

/// Trainable baseline that ignores the board and predicts the average
/// policy and value target it was trained on.
#[derive(Clone, Debug)]
pub struct MeanPolicyOracle {
    policy: Vec<f32>,
    value: f32,
}

impl MeanPolicyOracle {
    /// Start out uniform over `action_size` actions.
    pub fn new(action_size: usize) -> Self {
        let policy = if action_size == 0 {
            vec![]
        } else {
            vec![1.0 / action_size as f32; action_size]
        };
        Self { policy, value: 0.0 }
    }

    #[must_use]
    pub fn policy(&self) -> &[f32] {
        &self.policy
    }
}

impl Oracle for MeanPolicyOracle {
    fn predict(&self, _encoded: &EncodedState) -> Result<Prediction, OracleError> {
        Ok(Prediction {
            policy: self.policy.clone(),
            value: self.value,
        })
    }
}

impl TrainableOracle for MeanPolicyOracle {
    fn train(&mut self, examples: &[TrainingExample]) -> Result<(), OracleError> {
        if examples.is_empty() {
            return Ok(());
        }
        let size = self.policy.len();
        let mut sum = vec![0.0f32; size];
        let mut value = 0.0f32;
        for example in examples {
            if example.action_size != size {
                return Err(OracleError::ShapeMismatch {
                    expected: size,
                    actual: example.action_size,
                });
            }
            for &(action, share) in &example.policy {
                if let Some(acc) = sum.get_mut(action) {
                    *acc += share;
                }
            }
            value += example.value;
        }
        let n = examples.len() as f32;
        let total: f32 = sum.iter().sum();
        if total > 0.0 {
            self.policy = sum.into_iter().map(|s| s / total).collect();
        }
        self.value = (value / n).clamp(-1.0, 1.0);
        Ok(())
    }
}
