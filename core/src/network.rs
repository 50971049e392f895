//! Small feedforward network: 5 features → H hidden (tanh) → 2 outputs (sigmoid).
//!
//! Weight layout in the flat vector: input→hidden (5×H, row per input),
//! hidden bias (H), hidden→output (H×2, row per hidden unit), output bias (2).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{ACTION_COUNT, FEATURE_COUNT};
use crate::policy::FunctionPolicy;
use crate::types::Perception;

#[derive(Debug, Error, PartialEq)]
pub enum NetworkError {
    #[error("hidden layer must have at least one unit")]
    NoHiddenUnits,
    #[error("expected {expected} weights for {hidden} hidden units, got {actual}")]
    WeightCount {
        hidden: usize,
        expected: usize,
        actual: usize,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeedForward {
    hidden: usize,
    weights: Vec<f64>,
}

impl FeedForward {
    pub fn weight_count(hidden: usize) -> usize {
        FEATURE_COUNT * hidden + hidden + hidden * ACTION_COUNT + ACTION_COUNT
    }

    pub fn from_weights(hidden: usize, weights: Vec<f64>) -> Result<Self, NetworkError> {
        if hidden == 0 {
            return Err(NetworkError::NoHiddenUnits);
        }
        let expected = Self::weight_count(hidden);
        if weights.len() != expected {
            return Err(NetworkError::WeightCount {
                hidden,
                expected,
                actual: weights.len(),
            });
        }
        Ok(FeedForward { hidden, weights })
    }

    pub fn hidden(&self) -> usize {
        self.hidden
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Forward pass. Outputs are in (0, 1); compare against 0.5 to act.
    pub fn activate(&self, input: &[f64; FEATURE_COUNT]) -> [f64; ACTION_COUNT] {
        let h = self.hidden;
        let (w_ih, rest) = self.weights.split_at(FEATURE_COUNT * h);
        let (b_h, rest) = rest.split_at(h);
        let (w_ho, b_o) = rest.split_at(h * ACTION_COUNT);

        let mut hidden = b_h.to_vec();
        for (i, &x) in input.iter().enumerate() {
            for (j, acc) in hidden.iter_mut().enumerate() {
                *acc += x * w_ih[i * h + j];
            }
        }
        for acc in &mut hidden {
            *acc = acc.tanh();
        }

        let mut output = [0.0; ACTION_COUNT];
        output.copy_from_slice(b_o);
        for (i, &x) in hidden.iter().enumerate() {
            for (j, o) in output.iter_mut().enumerate() {
                *o += x * w_ho[i * ACTION_COUNT + j];
            }
        }
        output.map(sigmoid)
    }

    /// Consume the network into a policy the harness can drive.
    pub fn into_policy(self) -> FunctionPolicy<impl FnMut(&Perception) -> [f64; ACTION_COUNT]> {
        FunctionPolicy::new(move |p: &Perception| self.activate(&p.0))
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}
