// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Conversions between 8-bit grayscale images and frames.

use image::GrayImage;

use crate::engine::{Frame, FrameShape};
use crate::errors::{ImagingError, TransformError};

/// Pixels scaled to `[0, 1]`, row-major.
pub fn image_to_frame(image: &GrayImage, shape: FrameShape) -> Result<Frame, TransformError> {
    let data = image.as_raw().iter().map(|&p| p as f32 / 255.0).collect();
    Frame::new(shape, data)
}

/// Inverse of [`image_to_frame`]; values outside `[0, 1]` are clamped.
pub fn frame_to_image(frame: &Frame, side: u32) -> Result<GrayImage, ImagingError> {
    let render_size = || ImagingError::RenderSize {
        len: frame.data().len(),
        side,
    };
    if frame.data().len() != (side as usize) * (side as usize) {
        return Err(render_size());
    }

    let bytes = frame
        .data()
        .iter()
        .map(|v| (v.clamp(0.0, 1.0) * 255.0).round() as u8)
        .collect();
    GrayImage::from_raw(side, side, bytes).ok_or_else(render_size)
}
