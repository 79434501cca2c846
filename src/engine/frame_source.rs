// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Produces the frame a feedback run starts from.

use std::path::PathBuf;
use std::sync::Arc;

use crate::backends::imaging::convert::image_to_frame;
use crate::config::Calibration;
use crate::engine::{Frame, FrameShape};
use crate::errors::PipelineError;
use crate::traits::{Rectified, Rectifier};

/// One invocation of the generation pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub image_path: PathBuf,
    pub base_image_path: Option<PathBuf>,
    pub start_from_random: bool,
}

/// Starting frame plus the rectified images it came from, if any.
///
/// Nothing is on disk yet; the caller persists the images once the whole run
/// has succeeded.
#[derive(Debug)]
pub struct InitialFrame {
    pub frame: Frame,
    pub rectified: Option<Rectified>,
}

pub struct FrameSource {
    rectifier: Arc<dyn Rectifier>,
    shape: FrameShape,
    side: u32,
}

impl FrameSource {
    pub fn new(rectifier: Arc<dyn Rectifier>, shape: FrameShape, side: u32) -> Self {
        Self {
            rectifier,
            shape,
            side,
        }
    }

    pub fn shape(&self) -> FrameShape {
        self.shape
    }

    pub fn side(&self) -> u32 {
        self.side
    }

    /// Noise when the request asks for it, otherwise the rectified capture.
    ///
    /// The base image is only passed on when the calibration enables it.
    pub fn initial_frame(
        &self,
        request: &GenerationRequest,
        calibration: &Calibration,
    ) -> Result<InitialFrame, PipelineError> {
        if request.start_from_random {
            return Ok(InitialFrame {
                frame: Frame::random(self.shape, &mut rand::thread_rng()),
                rectified: None,
            });
        }

        let base = if calibration.use_base_image {
            request.base_image_path.as_deref()
        } else {
            None
        };
        let rectified =
            self.rectifier
                .rectify(&request.image_path, base, &calibration.quad, self.side)?;
        let frame = image_to_frame(&rectified.resolved, self.shape)?;

        Ok(InitialFrame {
            frame,
            rectified: Some(rectified),
        })
    }
}

impl std::fmt::Debug for FrameSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameSource")
            .field("shape", &self.shape)
            .field("side", &self.side)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Quad;
    use crate::errors::{ImagingError, TransformError};
    use image::{GrayImage, Luma};
    use std::num::NonZeroUsize;
    use std::path::Path;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Returns flat gray images of a fixed size and records the base path it saw.
    struct FixedRectifier {
        resolved_side: u32,
        seen_base: Mutex<Vec<Option<PathBuf>>>,
    }

    impl FixedRectifier {
        fn new(resolved_side: u32) -> Self {
            Self {
                resolved_side,
                seen_base: Mutex::new(Vec::new()),
            }
        }
    }

    impl Rectifier for FixedRectifier {
        fn rectify(
            &self,
            _image_path: &Path,
            base_image_path: Option<&Path>,
            _quad: &Quad,
            _side: u32,
        ) -> Result<Rectified, ImagingError> {
            self.seen_base
                .lock()
                .unwrap()
                .push(base_image_path.map(Path::to_path_buf));
            Ok(Rectified {
                resolved: GrayImage::from_pixel(self.resolved_side, self.resolved_side, Luma([255])),
                filtered: GrayImage::from_pixel(16, 16, Luma([128])),
                transformed: GrayImage::from_pixel(16, 16, Luma([0])),
            })
        }
    }

    fn calibration(use_base_image: bool) -> Calibration {
        Calibration {
            quad: "0,0,10,0,10,10,0,10".parse().unwrap(),
            iteration_count: NonZeroUsize::new(1).unwrap(),
            use_base_image,
        }
    }

    fn request(dir: &TempDir, start_from_random: bool) -> GenerationRequest {
        GenerationRequest {
            image_path: dir.path().join("capture.png"),
            base_image_path: Some(dir.path().join("base.png")),
            start_from_random,
        }
    }

    #[test]
    fn test_random_start_skips_rectification() {
        let dir = TempDir::new().unwrap();
        let rectifier = Arc::new(FixedRectifier::new(4));
        let source = FrameSource::new(rectifier.clone(), FrameShape::flat(4), 4);

        let initial = source
            .initial_frame(&request(&dir, true), &calibration(true))
            .unwrap();

        assert_eq!(initial.frame.shape(), FrameShape::flat(4));
        assert!(initial.rectified.is_none());
        assert!(rectifier.seen_base.lock().unwrap().is_empty());
    }

    #[test]
    fn test_rectified_start_returns_images_without_writing() {
        let dir = TempDir::new().unwrap();
        let source = FrameSource::new(Arc::new(FixedRectifier::new(4)), FrameShape::grid(4), 4);

        let initial = source
            .initial_frame(&request(&dir, false), &calibration(true))
            .unwrap();

        assert!(initial.frame.data().iter().all(|v| *v == 1.0));
        let rectified = initial.rectified.unwrap();
        assert_eq!(rectified.resolved.dimensions(), (4, 4));
        assert_eq!(rectified.filtered.get_pixel(0, 0).0, [128]);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_base_image_only_used_when_enabled() {
        let dir = TempDir::new().unwrap();
        let rectifier = Arc::new(FixedRectifier::new(4));
        let source = FrameSource::new(rectifier.clone(), FrameShape::flat(4), 4);
        let req = request(&dir, false);

        source.initial_frame(&req, &calibration(false)).unwrap();
        source.initial_frame(&req, &calibration(true)).unwrap();

        let seen = rectifier.seen_base.lock().unwrap();
        assert_eq!(seen[0], None);
        assert_eq!(seen[1], Some(dir.path().join("base.png")));
    }

    #[test]
    fn test_wrong_resolved_size() {
        let dir = TempDir::new().unwrap();
        let source = FrameSource::new(Arc::new(FixedRectifier::new(5)), FrameShape::flat(4), 4);

        let err = source
            .initial_frame(&request(&dir, false), &calibration(true))
            .unwrap_err();

        assert!(matches!(
            err,
            PipelineError::Transform(TransformError::DataLength { .. })
        ));
    }
}
