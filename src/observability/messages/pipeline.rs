// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for generation runs.
//!
//! This module contains message types for logging events related to:
//! * Run lifecycle (start, completion, failure)
//! * Individual feedback steps
//! * Artifacts written to disk

use crate::errors::PipelineError;
use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::time::Duration;
use tracing::Span;

/// Generation run started.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use std::path::Path;
/// use xeno_neurons::observability::messages::pipeline::RunStarted;
///
/// let msg = RunStarted {
///     image_path: Path::new("/captures/euglena_0042.png"),
///     start_from_random: false,
///     iteration_count: 3,
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct RunStarted<'a> {
    pub image_path: &'a Path,
    pub start_from_random: bool,
    pub iteration_count: usize,
}

impl Display for RunStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let origin = if self.start_from_random {
            "noise"
        } else {
            "rectified frame"
        };
        write!(
            f,
            "Generation run for {} started from {}: {} feedback steps",
            self.image_path.display(),
            origin,
            self.iteration_count
        )
    }
}

impl StructuredLog for RunStarted<'_> {
    fn log(&self) {
        tracing::info!(
            image_path = %self.image_path.display(),
            start_from_random = self.start_from_random,
            iteration_count = self.iteration_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "generation_run",
            span_name = name,
            image_path = %self.image_path.display(),
            start_from_random = self.start_from_random,
            iteration_count = self.iteration_count,
        )
    }
}

/// One application of the transformation.
///
/// # Log Level
/// `debug!`
pub struct FeedbackStep {
    pub step: usize,
    pub total: usize,
    pub input_mean: f32,
}

impl Display for FeedbackStep {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "t={} of {} (input mean {:.4})",
            self.step, self.total, self.input_mean
        )
    }
}

impl StructuredLog for FeedbackStep {
    fn log(&self) {
        tracing::debug!(
            step = self.step,
            total = self.total,
            input_mean = self.input_mean,
            "{}", self
        );
    }
}

/// An artifact image was written.
///
/// # Log Level
/// `debug!`
pub struct ArtifactWritten<'a> {
    pub path: &'a Path,
}

impl Display for ArtifactWritten<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Wrote {}", self.path.display())
    }
}

impl StructuredLog for ArtifactWritten<'_> {
    fn log(&self) {
        tracing::debug!(path = %self.path.display(), "{}", self);
    }
}

/// Generation run finished and its output is on disk.
///
/// # Log Level
/// `info!` - Important operational event
pub struct RunCompleted<'a> {
    pub output_path: &'a Path,
    pub iterations: usize,
    pub duration: Duration,
}

impl Display for RunCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Generated {} after {} steps in {:?}",
            self.output_path.display(),
            self.iterations,
            self.duration
        )
    }
}

impl StructuredLog for RunCompleted<'_> {
    fn log(&self) {
        tracing::info!(
            output_path = %self.output_path.display(),
            iterations = self.iterations,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }
}

/// Generation run aborted. Peers are not told; silence is the failure signal.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct RunFailed<'a> {
    pub image_path: &'a Path,
    pub error: &'a PipelineError,
}

impl Display for RunFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Generation run for {} failed: {}",
            self.image_path.display(),
            self.error
        )
    }
}

impl StructuredLog for RunFailed<'_> {
    fn log(&self) {
        tracing::error!(
            image_path = %self.image_path.display(),
            error = %self.error,
            "{}", self
        );
    }
}
