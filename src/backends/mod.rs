// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Concrete implementations of the collaborator traits in [`crate::traits`].
//!
//! # Available Backends
//!
//! ## Dense autoencoder
//! A [`crate::traits::Transformation`] evaluated with `nalgebra`:
//! - **Format**: JSON document of dense layers (weights, bias, activation)
//! - **Validation**: layer chaining and frame shape are checked once, at load
//!
//! ## Imaging
//! A [`crate::traits::Rectifier`] plus the tensor conversions:
//! - **Rectification**: DLT homography from the calibration quad, bilinear warp
//! - **Filtering**: difference against an optional base image, contrast stretch
//! - **Conversion**: 8-bit grayscale <-> `[0, 1]` frames
//!
//! ## Stub Backend (Test-Only)
//! In-memory `RecordingTransport` and a deterministic `InvertModel` for
//! exercising the session without sockets or weight files.
//!
//! ## OSC over UDP
//! A [`crate::traits::Transport`] and the inbound receive socket, using `rosc`
//! for the wire format and `tokio` sockets.
//!
//! # Architecture
//!
//! ```text
//! Cli → backend constructors → trait objects → SessionContext
//! ```

pub mod dense;
pub mod imaging;
pub mod osc;
#[cfg(test)]
pub mod stub;

pub use dense::{Activation, DenseAutoencoder, DenseLayer};
pub use imaging::PerspectiveRectifier;
pub use osc::{OscServer, UdpTransport};
