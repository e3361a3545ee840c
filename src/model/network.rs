//! Dense feed-forward network forward pass.
//!
//! Parameter dimensions are tiny (a dozen inputs, a few small hidden layers,
//! one output), so plain nalgebra dense matrices are more than fast enough
//! and keep the evaluation exactly reproducible.

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Supported layer activations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    Relu,
    Sigmoid,
    Tanh,
    Linear,
}

impl Activation {
    fn apply(self, v: &mut DVector<f64>) {
        match self {
            Activation::Relu => v.apply(|x| *x = x.max(0.0)),
            Activation::Sigmoid => v.apply(|x| *x = 1.0 / (1.0 + (-*x).exp())),
            Activation::Tanh => v.apply(|x| *x = x.tanh()),
            Activation::Linear => {}
        }
    }
}

/// One fitted dense layer: `out = activation(weights * in + bias)`.
///
/// Weights are row-major, `weights[out][in]`.
#[derive(Debug, Clone)]
pub struct DenseLayer {
    pub weights: DMatrix<f64>,
    pub bias: DVector<f64>,
    pub activation: Activation,
}

impl DenseLayer {
    pub fn new(
        weights: Vec<Vec<f64>>,
        bias: Vec<f64>,
        activation: Activation,
    ) -> Result<Self, AppError> {
        let rows = weights.len();
        if rows == 0 {
            return Err(AppError::new(2, "Model layer has an empty weight matrix."));
        }
        let cols = weights[0].len();
        if cols == 0 {
            return Err(AppError::new(2, "Model layer has zero-width weight rows."));
        }
        for (i, row) in weights.iter().enumerate() {
            if row.len() != cols {
                return Err(AppError::new(
                    2,
                    format!(
                        "Model layer weight row {i} has {} values, expected {cols}.",
                        row.len()
                    ),
                ));
            }
        }
        if bias.len() != rows {
            return Err(AppError::new(
                2,
                format!(
                    "Model layer has {rows} output rows but {} bias values.",
                    bias.len()
                ),
            ));
        }
        let flat: Vec<f64> = weights.into_iter().flatten().collect();
        if flat.iter().chain(bias.iter()).any(|v| !v.is_finite()) {
            return Err(AppError::new(2, "Model layer contains non-finite parameters."));
        }

        Ok(Self {
            weights: DMatrix::from_row_slice(rows, cols, &flat),
            bias: DVector::from_vec(bias),
            activation,
        })
    }

    pub fn input_dim(&self) -> usize {
        self.weights.ncols()
    }

    pub fn output_dim(&self) -> usize {
        self.weights.nrows()
    }
}

/// A fitted network: ordered dense layers ending in a single output.
#[derive(Debug, Clone)]
pub struct Network {
    layers: Vec<DenseLayer>,
}

impl Network {
    /// Build a network, checking that layer shapes chain and that the final
    /// layer emits exactly one value.
    pub fn new(layers: Vec<DenseLayer>, input_dim: usize) -> Result<Self, AppError> {
        let Some(first) = layers.first() else {
            return Err(AppError::new(2, "Model has no layers."));
        };
        if first.input_dim() != input_dim {
            return Err(AppError::new(
                2,
                format!(
                    "Model declares input_dim={input_dim} but the first layer takes {} inputs.",
                    first.input_dim()
                ),
            ));
        }
        for (i, pair) in layers.windows(2).enumerate() {
            if pair[1].input_dim() != pair[0].output_dim() {
                return Err(AppError::new(
                    2,
                    format!(
                        "Model layer {} takes {} inputs but layer {i} emits {} outputs.",
                        i + 1,
                        pair[1].input_dim(),
                        pair[0].output_dim()
                    ),
                ));
            }
        }
        let last = layers.last().unwrap_or(first);
        if last.output_dim() != 1 {
            return Err(AppError::new(
                2,
                format!(
                    "Model's final layer emits {} outputs; a churn classifier must emit 1.",
                    last.output_dim()
                ),
            ));
        }
        Ok(Self { layers })
    }

    pub fn input_dim(&self) -> usize {
        self.layers[0].input_dim()
    }

    pub fn layer_dims(&self) -> Vec<(usize, usize)> {
        self.layers
            .iter()
            .map(|l| (l.input_dim(), l.output_dim()))
            .collect()
    }

    /// Run the forward pass and return the single output scalar.
    ///
    /// An input-length mismatch is an internal contract violation: the
    /// artifact loader already verified the network against the scaler's
    /// column set.
    pub fn predict_proba(&self, features: &DVector<f64>) -> Result<f64, AppError> {
        if features.len() != self.input_dim() {
            return Err(AppError::new(
                4,
                format!(
                    "Feature vector has {} values but the model takes {} inputs.",
                    features.len(),
                    self.input_dim()
                ),
            ));
        }

        let mut current = features.clone();
        for layer in &self.layers {
            let mut next = &layer.weights * &current + &layer.bias;
            layer.activation.apply(&mut next);
            current = next;
        }

        let p = current[0];
        if !p.is_finite() {
            return Err(AppError::new(4, "Model produced a non-finite probability."));
        }
        Ok(p)
    }
}
