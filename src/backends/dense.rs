// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Dense autoencoder loaded from a JSON weight document.
//!
//! ```json
//! {
//!   "name": "xeno-ae-784-64",
//!   "layers": [
//!     { "weights": [[0.1, -0.2, ...], ...], "bias": [0.0, ...], "activation": "relu" },
//!     { "weights": [[...], ...], "bias": [...], "activation": "sigmoid" }
//!   ]
//! }
//! ```
//!
//! `weights` is row-major with one row per output unit, so a layer mapping
//! `n` inputs to `m` outputs has `m` rows of `n` values.

use nalgebra::{DMatrix, DVector};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::engine::{Frame, FrameShape};
use crate::errors::TransformError;
use crate::traits::Transformation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    #[default]
    Linear,
    Relu,
    Sigmoid,
    Tanh,
}

impl Activation {
    fn apply(self, x: f32) -> f32 {
        match self {
            Activation::Linear => x,
            Activation::Relu => x.max(0.0),
            Activation::Sigmoid => 1.0 / (1.0 + (-x).exp()),
            Activation::Tanh => x.tanh(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ModelDocument {
    #[serde(default)]
    name: Option<String>,
    layers: Vec<LayerDocument>,
}

#[derive(Debug, Deserialize)]
struct LayerDocument {
    weights: Vec<Vec<f32>>,
    bias: Vec<f32>,
    #[serde(default)]
    activation: Activation,
}

/// One fully connected layer: `activation(W x + b)`.
#[derive(Debug, Clone)]
pub struct DenseLayer {
    weights: DMatrix<f32>,
    bias: DVector<f32>,
    activation: Activation,
}

impl DenseLayer {
    pub fn new(
        weights: DMatrix<f32>,
        bias: DVector<f32>,
        activation: Activation,
    ) -> Result<Self, String> {
        if bias.len() != weights.nrows() {
            return Err(format!(
                "bias has {} values for {} output units",
                bias.len(),
                weights.nrows()
            ));
        }
        Ok(Self {
            weights,
            bias,
            activation,
        })
    }

    pub fn inputs(&self) -> usize {
        self.weights.ncols()
    }

    pub fn outputs(&self) -> usize {
        self.weights.nrows()
    }

    fn forward(&self, input: &DVector<f32>) -> DVector<f32> {
        let mut out = &self.weights * input + &self.bias;
        let activation = self.activation;
        out.apply(|x| *x = activation.apply(*x));
        out
    }

    fn from_document(doc: LayerDocument) -> Result<Self, String> {
        let rows = doc.weights.len();
        let cols = doc.weights.first().map(Vec::len).unwrap_or(0);
        if rows == 0 || cols == 0 {
            return Err("empty weight matrix".to_string());
        }
        if let Some(row) = doc.weights.iter().position(|r| r.len() != cols) {
            return Err(format!(
                "weight row {} has {} values, expected {}",
                row,
                doc.weights[row].len(),
                cols
            ));
        }
        let flat: Vec<f32> = doc.weights.into_iter().flatten().collect();
        DenseLayer::new(
            DMatrix::from_row_slice(rows, cols, &flat),
            DVector::from_vec(doc.bias),
            doc.activation,
        )
    }
}

/// Autoencoder evaluated layer by layer on the flattened frame.
#[derive(Debug)]
pub struct DenseAutoencoder {
    name: String,
    shape: FrameShape,
    layers: Vec<DenseLayer>,
}

impl DenseAutoencoder {
    /// Load weights from `path` for frames of `shape`.
    pub fn load<P: AsRef<Path>>(path: P, shape: FrameShape) -> Result<Self, TransformError> {
        let path = path.as_ref();
        let load_error = |reason: String| TransformError::ModelLoad {
            path: path.to_path_buf(),
            reason,
        };

        let content = fs::read_to_string(path).map_err(|e| load_error(e.to_string()))?;
        let doc: ModelDocument =
            serde_json::from_str(&content).map_err(|e| load_error(e.to_string()))?;

        let layers = doc
            .layers
            .into_iter()
            .enumerate()
            .map(|(index, layer)| {
                DenseLayer::from_document(layer)
                    .map_err(|reason| TransformError::InvalidLayer { index, reason })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let name = doc.name.unwrap_or_else(|| {
            path.file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "dense".to_string())
        });
        Self::from_layers(name, shape, layers)
    }

    /// Assemble a model, checking that layers chain and that both ends match `shape`.
    pub fn from_layers(
        name: impl Into<String>,
        shape: FrameShape,
        layers: Vec<DenseLayer>,
    ) -> Result<Self, TransformError> {
        let (first, last) = match (layers.first(), layers.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => {
                return Err(TransformError::InvalidLayer {
                    index: 0,
                    reason: "model has no layers".to_string(),
                })
            }
        };

        for (index, pair) in layers.windows(2).enumerate() {
            if pair[0].outputs() != pair[1].inputs() {
                return Err(TransformError::InvalidLayer {
                    index: index + 1,
                    reason: format!(
                        "takes {} inputs but previous layer produces {}",
                        pair[1].inputs(),
                        pair[0].outputs()
                    ),
                });
            }
        }

        for width in [first.inputs(), last.outputs()] {
            if width != shape.len() {
                return Err(TransformError::ShapeMismatch {
                    expected: shape,
                    actual: FrameShape::Flat { len: width },
                });
            }
        }

        Ok(Self {
            name: name.into(),
            shape,
            layers,
        })
    }
}

impl Transformation for DenseAutoencoder {
    fn input_shape(&self) -> FrameShape {
        self.shape
    }

    fn predict(&self, frame: &Frame) -> Result<Frame, TransformError> {
        if frame.shape() != self.shape {
            return Err(TransformError::ShapeMismatch {
                expected: self.shape,
                actual: frame.shape(),
            });
        }

        let mut activations = DVector::from_column_slice(frame.data());
        for layer in &self.layers {
            activations = layer.forward(&activations);
        }
        Frame::new(self.shape, activations.iter().copied().collect())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
