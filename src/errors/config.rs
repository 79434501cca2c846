// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors raised while reading the calibration settings document or parsing
//! calibration values supplied on the command line.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or validating calibration settings.
///
/// A failed load never replaces the calibration currently held by the store.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The settings document could not be read from disk.
    #[error("failed to read settings file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The settings document is not valid JSON/YAML or lacks a required field.
    #[error("failed to parse settings file {}: {reason}", .path.display())]
    Parse { path: PathBuf, reason: String },

    /// A quad must describe exactly four (x, y) points.
    #[error("camera quad needs exactly 4 points (8 numbers), got {0} numbers")]
    QuadArity(usize),

    /// A quad coordinate was not a finite number.
    #[error("invalid camera quad coordinate '{0}'")]
    QuadValue(String),

    /// The feedback loop needs at least one step.
    #[error("n_feedback_steps must be at least 1")]
    ZeroIterations,
}
