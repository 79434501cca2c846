// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors for a single generation run.
//!
//! A run fails as a whole: whichever stage errors, no "step" notification is
//! sent for it, and a failure before the output is rendered leaves nothing on
//! disk. Every failure is local to its run; the session keeps serving.

use std::path::PathBuf;
use thiserror::Error;

use crate::engine::FrameShape;
use crate::errors::ConfigError;

/// Errors raised by the transformation or by frame construction.
#[derive(Error, Debug)]
pub enum TransformError {
    /// A frame's shape disagrees with the shape the model was loaded for.
    #[error("frame shape {actual} does not match model shape {expected}")]
    ShapeMismatch {
        expected: FrameShape,
        actual: FrameShape,
    },

    /// Raw data does not fill the declared shape.
    #[error("frame data has {actual} values but shape {shape} needs {}", .shape.len())]
    DataLength { shape: FrameShape, actual: usize },

    /// The model file could not be read or parsed.
    #[error("failed to load model {}: {reason}", .path.display())]
    ModelLoad { path: PathBuf, reason: String },

    /// A model layer is internally inconsistent or does not chain.
    #[error("model layer {index}: {reason}")]
    InvalidLayer { index: usize, reason: String },
}

/// Errors raised while loading, warping or saving images.
#[derive(Error, Debug)]
pub enum ImagingError {
    #[error("failed to read image {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to write image {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The quad's corners do not define a perspective mapping.
    #[error("camera quad {0} is degenerate")]
    DegenerateQuad(String),

    /// Frame length and target image size disagree.
    #[error("frame of {len} values cannot be rendered as a {side}x{side} image")]
    RenderSize { len: usize, side: u32 },
}

/// Any failure of a command dispatched by the session controller.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error(transparent)]
    Imaging(#[from] ImagingError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
