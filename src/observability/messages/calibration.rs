// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for calibration loads and reloads.

use crate::config::{CalibrationSource, Quad};
use crate::errors::ConfigError;
use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};

/// Calibration loaded (at startup or on reload).
///
/// # Log Level
/// `info!` - Important operational event
pub struct CalibrationLoaded<'a> {
    pub source: &'a CalibrationSource,
    pub quad: &'a Quad,
    pub iteration_count: usize,
    pub use_base_image: bool,
}

impl Display for CalibrationLoaded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Calibration loaded from {}: quad={}, n_feedback_steps={}, use_base_image={}",
            self.source, self.quad, self.iteration_count, self.use_base_image
        )
    }
}

impl StructuredLog for CalibrationLoaded<'_> {
    fn log(&self) {
        tracing::info!(
            source = %self.source,
            quad = %self.quad,
            iteration_count = self.iteration_count,
            use_base_image = self.use_base_image,
            "{}", self
        );
    }
}

/// Reload of the settings document failed; the previous calibration is kept.
///
/// # Log Level
/// `error!` - Failure requiring operator attention
pub struct CalibrationReloadFailed<'a> {
    pub source: &'a CalibrationSource,
    pub error: &'a ConfigError,
}

impl Display for CalibrationReloadFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Calibration reload from {} failed, keeping previous calibration: {}",
            self.source, self.error
        )
    }
}

impl StructuredLog for CalibrationReloadFailed<'_> {
    fn log(&self) {
        tracing::error!(source = %self.source, error = %self.error, "{}", self);
    }
}

/// Reload requested while the quad is pinned on the command line.
///
/// # Log Level
/// `warn!`
pub struct CalibrationReloadSkipped<'a> {
    pub quad: &'a Quad,
}

impl Display for CalibrationReloadSkipped<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Settings reload ignored: quad {} was given on the command line",
            self.quad
        )
    }
}

impl StructuredLog for CalibrationReloadSkipped<'_> {
    fn log(&self) {
        tracing::warn!(quad = %self.quad, "{}", self);
    }
}
