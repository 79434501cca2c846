use image::GrayImage;
use std::path::Path;

use crate::config::Quad;
use crate::errors::ImagingError;

/// Images produced by rectifying one camera capture.
#[derive(Debug, Clone)]
pub struct Rectified {
    /// Starting point for the feedback run, `side x side`.
    pub resolved: GrayImage,
    /// Filtered intermediate (difference against the base image when one is used).
    pub filtered: GrayImage,
    /// Perspective-corrected capture.
    pub transformed: GrayImage,
}

/// Maps a camera capture into canonical space using the calibration quad.
pub trait Rectifier: Send + Sync {
    fn rectify(
        &self,
        image_path: &Path,
        base_image_path: Option<&Path>,
        quad: &Quad,
        side: u32,
    ) -> Result<Rectified, ImagingError>;
}
