// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Deserialize;
use std::fs;
use std::num::NonZeroUsize;
use std::path::Path;

use crate::config::calibration::{Calibration, Quad};
use crate::errors::ConfigError;

/// Calibration settings document shared with the XenoPi camera program.
///
/// The document may carry other keys (the camera program stores its own
/// settings alongside); they are ignored.
///
/// # Example
/// ```json
/// {
///   "camera_quad": [32, 18, 610, 22, 604, 460, 28, 455],
///   "n_feedback_steps": 3,
///   "use_base_image": true
/// }
/// ```
#[derive(Debug, Deserialize)]
pub struct SettingsDocument {
    #[serde(alias = "quad")]
    pub camera_quad: Quad,
    #[serde(alias = "iterationCount")]
    pub n_feedback_steps: usize,
    #[serde(alias = "useBaseImage", default = "default_use_base_image")]
    pub use_base_image: bool,
}

fn default_use_base_image() -> bool {
    true
}

impl TryFrom<SettingsDocument> for Calibration {
    type Error = ConfigError;

    fn try_from(doc: SettingsDocument) -> Result<Self, Self::Error> {
        let iteration_count =
            NonZeroUsize::new(doc.n_feedback_steps).ok_or(ConfigError::ZeroIterations)?;
        Ok(Calibration {
            quad: doc.camera_quad,
            iteration_count,
            use_base_image: doc.use_base_image,
        })
    }
}

/// Load calibration from a settings file.
///
/// `.yaml`/`.yml` files are parsed as YAML, everything else as JSON.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Calibration, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let is_yaml = matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    );
    let doc: SettingsDocument = if is_yaml {
        serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?
    } else {
        serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?
    };

    Calibration::try_from(doc)
}
