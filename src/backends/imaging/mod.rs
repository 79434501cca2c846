// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod convert;
pub mod homography;
pub mod rectify;

pub use rectify::PerspectiveRectifier;
