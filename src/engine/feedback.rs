// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Bounded self-referential iteration over the transformation.

use std::num::NonZeroUsize;
use std::sync::Arc;

use crate::engine::Frame;
use crate::errors::TransformError;
use crate::observability::messages::pipeline::FeedbackStep;
use crate::observability::messages::StructuredLog;
use crate::traits::Transformation;

/// Feeds the model's output back into itself.
///
/// The engine holds no state between calls: every [`FeedbackEngine::iterate`]
/// starts from the frame it is given.
#[derive(Clone)]
pub struct FeedbackEngine {
    transformation: Arc<dyn Transformation>,
}

impl FeedbackEngine {
    pub fn new(transformation: Arc<dyn Transformation>) -> Self {
        Self { transformation }
    }

    pub fn transformation(&self) -> &dyn Transformation {
        self.transformation.as_ref()
    }

    /// Fails if `frame` cannot be fed to the model.
    pub fn check_input(&self, frame: &Frame) -> Result<(), TransformError> {
        let expected = self.transformation.input_shape();
        if frame.shape() != expected {
            return Err(TransformError::ShapeMismatch {
                expected,
                actual: frame.shape(),
            });
        }
        Ok(())
    }

    /// Apply the transformation `steps` times. Step 0 consumes `initial`,
    /// step `t` consumes the output of step `t - 1`; only the last output is
    /// returned.
    pub fn iterate(&self, initial: Frame, steps: NonZeroUsize) -> Result<Frame, TransformError> {
        self.check_input(&initial)?;

        let total = steps.get();
        let mut frame = initial;
        for step in 0..total {
            FeedbackStep {
                step,
                total,
                input_mean: frame.mean(),
            }
            .log();

            let next = self.transformation.predict(&frame)?;
            if next.shape() != frame.shape() {
                return Err(TransformError::ShapeMismatch {
                    expected: frame.shape(),
                    actual: next.shape(),
                });
            }
            frame = next;
        }
        Ok(frame)
    }
}

impl std::fmt::Debug for FeedbackEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedbackEngine")
            .field("transformation", &self.transformation.name())
            .field("input_shape", &self.transformation.input_shape())
            .finish()
    }
}
