// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use rand::Rng;
use std::fmt;

use crate::errors::TransformError;

/// Layout of a frame tensor. Dense autoencoders take a flat vector, the
/// convolutional family takes a single-channel square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameShape {
    Flat { len: usize },
    Grid { side: usize, channels: usize },
}

impl FrameShape {
    pub fn flat(side: usize) -> Self {
        FrameShape::Flat { len: side * side }
    }

    pub fn grid(side: usize) -> Self {
        FrameShape::Grid { side, channels: 1 }
    }

    /// Number of values a frame of this shape holds.
    pub fn len(&self) -> usize {
        match *self {
            FrameShape::Flat { len } => len,
            FrameShape::Grid { side, channels } => side * side * channels,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for FrameShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameShape::Flat { len } => write!(f, "(1, {})", len),
            FrameShape::Grid { side, channels } => {
                write!(f, "(1, {}, {}, {})", side, side, channels)
            }
        }
    }
}

/// Canonical image tensor with values nominally in `[0, 1]`.
///
/// Frames are immutable; every transformation step produces a new one.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    shape: FrameShape,
    data: Vec<f32>,
}

impl Frame {
    pub fn new(shape: FrameShape, data: Vec<f32>) -> Result<Self, TransformError> {
        if data.len() != shape.len() {
            return Err(TransformError::DataLength {
                shape,
                actual: data.len(),
            });
        }
        Ok(Self { shape, data })
    }

    /// Uniform noise over `[0, 1)`.
    pub fn random<R: Rng + ?Sized>(shape: FrameShape, rng: &mut R) -> Self {
        let data = (0..shape.len()).map(|_| rng.gen::<f32>()).collect();
        Self { shape, data }
    }

    pub fn shape(&self) -> FrameShape {
        self.shape
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn mean(&self) -> f32 {
        if self.data.is_empty() {
            return 0.0;
        }
        self.data.iter().sum::<f32>() / self.data.len() as f32
    }
}
