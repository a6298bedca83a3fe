//! Feed-forward classifier network
//!
//! A generic interpreter over an ordered stack of dense layers. The artifact
//! describes the topology (widths and per-layer activation tags); the
//! interpreter runs any internally consistent stack, so the reference
//! 28→128→64→128→64→128→64→128→64→5 pattern is data, not code. All
//! arithmetic is single precision to match the training-time numerics.

use serde::{Deserialize, Serialize};

use crate::error::{ClassifierError, Result};
use crate::features::FeatureVector;

/// Non-linearity applied after a layer's affine transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Activation {
    /// Rectified linear: `max(0, y)`, used after every hidden layer.
    Relu,
    /// No activation; the output layer emits raw logits.
    Identity,
}

impl Activation {
    fn apply(self, values: &mut [f32]) {
        if self == Activation::Relu {
            for v in values.iter_mut() {
                if *v < 0.0 {
                    *v = 0.0;
                }
            }
        }
    }
}

/// One dense layer: `y = W·x + b` followed by the activation tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DenseLayer {
    pub input_dim: usize,
    pub output_dim: usize,
    /// Row-major weight matrix: `weights[o * input_dim + i]`.
    pub weights: Vec<f32>,
    pub bias: Vec<f32>,
    pub activation: Activation,
}

impl DenseLayer {
    fn forward(&self, index: usize, input: &[f32]) -> Result<Vec<f32>> {
        if input.len() != self.input_dim {
            return Err(ClassifierError::DimensionMismatch {
                layer: index,
                expected: self.input_dim,
                got: input.len(),
            });
        }

        let mut output = Vec::with_capacity(self.output_dim);
        for o in 0..self.output_dim {
            let row = &self.weights[o * self.input_dim..(o + 1) * self.input_dim];
            let mut acc = self.bias[o];
            for (w, x) in row.iter().zip(input.iter()) {
                acc += w * x;
            }
            output.push(acc);
        }

        self.activation.apply(&mut output);
        Ok(output)
    }
}

/// The trained classifier: an ordered dense-layer stack, immutable after
/// load and safely shared read-only across threads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierNetwork {
    layers: Vec<DenseLayer>,
}

impl ClassifierNetwork {
    /// Build a network from a layer stack, rejecting inconsistent shapes.
    pub fn new(layers: Vec<DenseLayer>) -> Result<Self> {
        let network = Self { layers };
        network.validate()?;
        Ok(network)
    }

    /// Check internal shape consistency: weight/bias lengths per layer and
    /// the input/output chain between consecutive layers.
    pub fn validate(&self) -> Result<()> {
        if self.layers.is_empty() {
            return Err(ClassifierError::ArtifactCorrupt(
                "network has no layers".to_string(),
            ));
        }

        for (i, layer) in self.layers.iter().enumerate() {
            if layer.weights.len() != layer.input_dim * layer.output_dim {
                return Err(ClassifierError::ArtifactCorrupt(format!(
                    "layer {} weight matrix has {} entries, expected {}x{}",
                    i,
                    layer.weights.len(),
                    layer.output_dim,
                    layer.input_dim
                )));
            }
            if layer.bias.len() != layer.output_dim {
                return Err(ClassifierError::ArtifactCorrupt(format!(
                    "layer {} bias has {} entries, expected {}",
                    i,
                    layer.bias.len(),
                    layer.output_dim
                )));
            }
            if i > 0 && self.layers[i - 1].output_dim != layer.input_dim {
                return Err(ClassifierError::ArtifactCorrupt(format!(
                    "layer {} input width {} does not chain from layer {} output width {}",
                    i,
                    layer.input_dim,
                    i - 1,
                    self.layers[i - 1].output_dim
                )));
            }
        }

        Ok(())
    }

    /// Input width of the first layer.
    pub fn input_width(&self) -> usize {
        self.layers.first().map(|l| l.input_dim).unwrap_or(0)
    }

    /// Output width of the last layer.
    pub fn output_width(&self) -> usize {
        self.layers.last().map(|l| l.output_dim).unwrap_or(0)
    }

    /// Number of layers.
    pub fn depth(&self) -> usize {
        self.layers.len()
    }

    /// Widths along the stack: input width followed by each layer's output.
    pub fn topology(&self) -> Vec<usize> {
        let mut widths = Vec::with_capacity(self.layers.len() + 1);
        widths.push(self.input_width());
        widths.extend(self.layers.iter().map(|l| l.output_dim));
        widths
    }

    /// Run the normalized feature vector through the stack and return the
    /// raw score vector. Read-only; safe for concurrent callers.
    pub fn infer(&self, features: &FeatureVector) -> Result<Vec<f32>> {
        let mut activation = features.as_slice().to_vec();
        for (i, layer) in self.layers.iter().enumerate() {
            activation = layer.forward(i, &activation)?;
        }
        Ok(activation)
    }
}
