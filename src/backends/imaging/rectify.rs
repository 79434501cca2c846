// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Perspective rectification of camera captures.
//!
//! The capture is warped so that the calibration quad fills a square of
//! `working_side` pixels (the transformed image). When a base image is given
//! it is warped the same way and the absolute difference is taken; the result
//! is contrast stretched (the filtered image) and downsampled to the canonical
//! side (the resolved image).

use image::imageops::{self, FilterType};
use image::{GrayImage, Luma};
use nalgebra::Matrix3;
use std::path::Path;

use crate::backends::imaging::homography::{homography_from_quads, project};
use crate::config::consts::DEFAULT_WORKING_SIDE;
use crate::config::Quad;
use crate::errors::ImagingError;
use crate::traits::{Rectified, Rectifier};

#[derive(Debug, Clone)]
pub struct PerspectiveRectifier {
    working_side: u32,
}

impl PerspectiveRectifier {
    pub fn new(working_side: u32) -> Self {
        Self {
            working_side: working_side.max(2),
        }
    }

    /// Maps working-square pixel coordinates into camera coordinates.
    fn square_to_camera(&self, quad: &Quad) -> Result<Matrix3<f64>, ImagingError> {
        let edge = (self.working_side - 1) as f64;
        let square = [[0.0, 0.0], [edge, 0.0], [edge, edge], [0.0, edge]];
        homography_from_quads(&square, quad.points())
            .ok_or_else(|| ImagingError::DegenerateQuad(quad.to_string()))
    }
}

impl Default for PerspectiveRectifier {
    fn default() -> Self {
        Self::new(DEFAULT_WORKING_SIDE)
    }
}

impl Rectifier for PerspectiveRectifier {
    fn rectify(
        &self,
        image_path: &Path,
        base_image_path: Option<&Path>,
        quad: &Quad,
        side: u32,
    ) -> Result<Rectified, ImagingError> {
        let h = self.square_to_camera(quad)?;

        let transformed = warp(&load_gray(image_path)?, &h, self.working_side);
        let mut filtered = match base_image_path {
            Some(base_path) => {
                let base = warp(&load_gray(base_path)?, &h, self.working_side);
                absolute_difference(&transformed, &base)
            }
            None => transformed.clone(),
        };
        stretch_contrast(&mut filtered);
        let resolved = imageops::resize(&filtered, side, side, FilterType::Triangle);

        Ok(Rectified {
            resolved,
            filtered,
            transformed,
        })
    }
}

fn load_gray(path: &Path) -> Result<GrayImage, ImagingError> {
    image::open(path)
        .map(|img| img.to_luma8())
        .map_err(|source| ImagingError::Read {
            path: path.to_path_buf(),
            source,
        })
}

fn warp(src: &GrayImage, square_to_camera: &Matrix3<f64>, side: u32) -> GrayImage {
    GrayImage::from_fn(side, side, |u, v| {
        let [x, y] = project(square_to_camera, u as f64, v as f64);
        Luma([sample_bilinear(src, x, y)])
    })
}

/// Bilinear sample; black outside the image.
fn sample_bilinear(img: &GrayImage, x: f64, y: f64) -> u8 {
    let (w, h) = img.dimensions();
    if !x.is_finite() || !y.is_finite() {
        return 0;
    }
    // half-pixel slack so corners that land on the border still sample it
    if x < -0.5 || y < -0.5 || x > w as f64 - 0.5 || y > h as f64 - 0.5 {
        return 0;
    }
    let x = x.clamp(0.0, (w - 1) as f64);
    let y = y.clamp(0.0, (h - 1) as f64);

    let (x0, y0) = (x.floor() as u32, y.floor() as u32);
    let (x1, y1) = ((x0 + 1).min(w - 1), (y0 + 1).min(h - 1));
    let (fx, fy) = (x - x0 as f64, y - y0 as f64);

    let px = |xx: u32, yy: u32| img.get_pixel(xx, yy).0[0] as f64;
    let top = px(x0, y0) * (1.0 - fx) + px(x1, y0) * fx;
    let bottom = px(x0, y1) * (1.0 - fx) + px(x1, y1) * fx;
    (top * (1.0 - fy) + bottom * fy).round().clamp(0.0, 255.0) as u8
}

fn absolute_difference(a: &GrayImage, b: &GrayImage) -> GrayImage {
    GrayImage::from_fn(a.width(), a.height(), |x, y| {
        Luma([a.get_pixel(x, y).0[0].abs_diff(b.get_pixel(x, y).0[0])])
    })
}

/// Stretch the occupied gray range to the full `[0, 255]`. Flat images are left alone.
fn stretch_contrast(img: &mut GrayImage) {
    let (lo, hi) = img
        .pixels()
        .fold((u8::MAX, u8::MIN), |(lo, hi), p| (lo.min(p.0[0]), hi.max(p.0[0])));
    if hi <= lo {
        return;
    }
    let range = (hi - lo) as f32;
    for p in img.pixels_mut() {
        p.0[0] = (((p.0[0] - lo) as f32 / range) * 255.0).round() as u8;
    }
}
