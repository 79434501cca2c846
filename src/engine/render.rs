// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Rendering frames back to images and writing the per-run artifacts.

use image::GrayImage;
use std::path::{Path, PathBuf};

use crate::backends::imaging::convert::frame_to_image;
use crate::config::consts::{
    SUFFIX_FILTERED, SUFFIX_GENERATED, SUFFIX_RESOLVED, SUFFIX_TRANSFORMED,
};
use crate::engine::Frame;
use crate::errors::ImagingError;
use crate::observability::messages::pipeline::ArtifactWritten;
use crate::observability::messages::StructuredLog;

/// The four artifact paths of one run, sharing the input's base name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub transformed: PathBuf,
    pub filtered: PathBuf,
    pub resolved: PathBuf,
    pub generated: PathBuf,
}

/// Decides where artifacts go.
///
/// Artifacts are written next to the input image. Inputs given as a bare file
/// name fall back to the configured output directory.
#[derive(Debug, Clone, Default)]
pub struct ArtifactLayout {
    output_dir: Option<PathBuf>,
}

impl ArtifactLayout {
    pub fn new(output_dir: Option<PathBuf>) -> Self {
        Self { output_dir }
    }

    pub fn paths_for(&self, image_path: &Path) -> ArtifactPaths {
        let dir = match image_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => self
                .output_dir
                .clone()
                .unwrap_or_else(|| PathBuf::from(".")),
        };
        let base = image_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();

        let named = |suffix: &str| dir.join(format!("{}{}", base, suffix));
        ArtifactPaths {
            transformed: named(SUFFIX_TRANSFORMED),
            filtered: named(SUFFIX_FILTERED),
            resolved: named(SUFFIX_RESOLVED),
            generated: named(SUFFIX_GENERATED),
        }
    }
}

/// Map a frame back to a `side x side` grayscale image.
pub fn render(frame: &Frame, side: u32) -> Result<GrayImage, ImagingError> {
    frame_to_image(frame, side)
}

/// Write `image` to `path`, replacing whatever is there.
pub fn persist(image: &GrayImage, path: &Path) -> Result<(), ImagingError> {
    image.save(path).map_err(|source| ImagingError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    ArtifactWritten { path }.log();
    Ok(())
}
