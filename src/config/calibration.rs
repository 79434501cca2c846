// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Calibration values and the store that owns them.
//!
//! The store is created once at startup, either from the settings document or
//! from an explicit quad override. Reloads replace the held [`Calibration`]
//! wholesale; a failed reload leaves it untouched.

use serde::Deserialize;
use std::fmt;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::str::FromStr;

use crate::config::settings::load_settings;
use crate::errors::ConfigError;
use crate::observability::messages::calibration::{
    CalibrationLoaded, CalibrationReloadFailed, CalibrationReloadSkipped,
};
use crate::observability::messages::StructuredLog;

/// Four (x, y) points in camera space, in top-left, top-right, bottom-right,
/// bottom-left order, that map onto the corners of the canonical square.
///
/// Deserializes from either eight flat numbers or four `[x, y]` pairs.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "QuadRepr")]
pub struct Quad([[f64; 2]; 4]);

#[derive(Deserialize)]
#[serde(untagged)]
enum QuadRepr {
    Flat(Vec<f64>),
    Pairs(Vec<[f64; 2]>),
}

impl Quad {
    pub fn new(points: [[f64; 2]; 4]) -> Self {
        Self(points)
    }

    /// Build a quad from eight numbers `x0, y0, x1, y1, ...`.
    pub fn from_values(values: &[f64]) -> Result<Self, ConfigError> {
        if values.len() != 8 {
            return Err(ConfigError::QuadArity(values.len()));
        }
        if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
            return Err(ConfigError::QuadValue(bad.to_string()));
        }

        let mut points = [[0.0; 2]; 4];
        for (point, pair) in points.iter_mut().zip(values.chunks_exact(2)) {
            *point = [pair[0], pair[1]];
        }
        Ok(Self(points))
    }

    pub fn points(&self) -> &[[f64; 2]; 4] {
        &self.0
    }
}

impl TryFrom<QuadRepr> for Quad {
    type Error = ConfigError;

    fn try_from(repr: QuadRepr) -> Result<Self, Self::Error> {
        match repr {
            QuadRepr::Flat(values) => Quad::from_values(&values),
            QuadRepr::Pairs(pairs) => {
                let values: Vec<f64> = pairs.iter().flatten().copied().collect();
                Quad::from_values(&values)
            }
        }
    }
}

/// Parses the comma-separated command line form, e.g. `0,0,10,0,10,10,0,10`.
impl FromStr for Quad {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split(',')
            .map(|part| {
                let part = part.trim();
                part.parse::<f64>()
                    .map_err(|_| ConfigError::QuadValue(part.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Quad::from_values(&values)
    }
}

impl fmt::Display for Quad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, [x, y]) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "({}, {})", x, y)?;
        }
        write!(f, "]")
    }
}

/// The calibration every generation run reads.
#[derive(Debug, Clone, PartialEq)]
pub struct Calibration {
    pub quad: Quad,
    pub iteration_count: NonZeroUsize,
    pub use_base_image: bool,
}

/// Where the store's calibration comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum CalibrationSource {
    /// Settings document, re-read on every reload.
    File(PathBuf),
    /// Quad supplied at startup; reloads are ignored for the life of the process.
    Override,
}

impl fmt::Display for CalibrationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalibrationSource::File(path) => write!(f, "{}", path.display()),
            CalibrationSource::Override => write!(f, "command line override"),
        }
    }
}

/// Holds the current calibration and knows how to reload it.
#[derive(Debug)]
pub struct CalibrationStore {
    current: Calibration,
    source: CalibrationSource,
}

impl CalibrationStore {
    /// Load the initial calibration from a settings document.
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let current = load_settings(&path)?;
        let store = Self {
            current,
            source: CalibrationSource::File(path),
        };
        store.log_loaded();
        Ok(store)
    }

    /// Pin the calibration to explicit values; the settings document is never read.
    pub fn with_override(calibration: Calibration) -> Self {
        let store = Self {
            current: calibration,
            source: CalibrationSource::Override,
        };
        store.log_loaded();
        store
    }

    /// Re-read the settings document and replace the held calibration.
    ///
    /// All or nothing: on error the previous calibration stays in place and the
    /// error is returned to the caller.
    pub fn load(&mut self) -> Result<&Calibration, ConfigError> {
        match &self.source {
            CalibrationSource::Override => {
                CalibrationReloadSkipped {
                    quad: &self.current.quad,
                }
                .log();
            }
            CalibrationSource::File(path) => match load_settings(path) {
                Ok(calibration) => {
                    self.current = calibration;
                    self.log_loaded();
                }
                Err(error) => {
                    CalibrationReloadFailed {
                        source: &self.source,
                        error: &error,
                    }
                    .log();
                    return Err(error);
                }
            },
        }
        Ok(&self.current)
    }

    pub fn current(&self) -> &Calibration {
        &self.current
    }

    pub fn current_quad(&self) -> &Quad {
        &self.current.quad
    }

    pub fn current_iteration_count(&self) -> NonZeroUsize {
        self.current.iteration_count
    }

    pub fn source(&self) -> &CalibrationSource {
        &self.source
    }

    fn log_loaded(&self) {
        CalibrationLoaded {
            source: &self.source,
            quad: &self.current.quad,
            iteration_count: self.current.iteration_count.get(),
            use_base_image: self.current.use_base_image,
        }
        .log();
    }
}
