// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use clap::Parser;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::num::NonZeroUsize;
use std::path::PathBuf;

use crate::broadcast::{Peer, PeerSet};
use crate::config::calibration::{Calibration, CalibrationStore, Quad};
use crate::config::consts::{
    DEFAULT_IMAGE_SIDE, DEFAULT_ORBITER_PORT, DEFAULT_RECEIVE_PORT, DEFAULT_SETTINGS_FILE,
    DEFAULT_WORKING_SIDE, DEFAULT_XENOPI_PORT,
};
use crate::engine::FrameShape;
use crate::errors::ConfigError;

/// Startup parameters.
#[derive(Debug, Parser)]
#[command(
    name = "xeno-neurons",
    version,
    about = "Feeds rectified camera frames through an autoencoder and reports back over OSC"
)]
pub struct Cli {
    /// Model weights file (JSON dense autoencoder)
    pub model_file: PathBuf,

    /// Use the convolutional frame shape (side x side x 1) instead of a flat vector
    #[arg(short = 'c', long)]
    pub convolutional: bool,

    /// Settings document containing the camera input quad
    #[arg(short = 'C', long, default_value = DEFAULT_SETTINGS_FILE)]
    pub configuration_file: PathBuf,

    /// Comma-separated list of 8 numbers defining the input quad (overrides the settings document)
    #[arg(short = 'q', long)]
    pub input_quad: Option<Quad>,

    /// Number of self-loop steps for each image
    #[arg(short = 'n', long, default_value = "1")]
    pub n_feedback_steps: NonZeroUsize,

    /// Output directory for generated images when the input path has no directory
    #[arg(short = 'D', long, default_value = ".")]
    pub output_directory: PathBuf,

    /// IP address of the XenoPi program
    #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    pub xenopi_ip: IpAddr,

    /// Port used to send data to XenoPi
    #[arg(long, default_value_t = DEFAULT_XENOPI_PORT)]
    pub xenopi_send_port: u16,

    /// IP address of the orbiter program
    #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    pub orbiter_ip: IpAddr,

    /// Port used to send data to the orbiter
    #[arg(long, default_value_t = DEFAULT_ORBITER_PORT)]
    pub orbiter_send_port: u16,

    /// Only talk to XenoPi
    #[arg(long)]
    pub no_orbiter: bool,

    /// Port to listen on
    #[arg(short = 'r', long, default_value_t = DEFAULT_RECEIVE_PORT)]
    pub receive_port: u16,

    /// Side length of the canonical frame
    #[arg(long, default_value_t = DEFAULT_IMAGE_SIDE)]
    pub image_side: u32,

    /// Side length of the warped image before downsampling
    #[arg(long, default_value_t = DEFAULT_WORKING_SIDE)]
    pub working_side: u32,

    /// Start "begin" runs from noise instead of the rectified camera frame
    #[arg(long)]
    pub begin_from_random: bool,
}

impl Cli {
    pub fn frame_shape(&self) -> FrameShape {
        if self.convolutional {
            FrameShape::grid(self.image_side as usize)
        } else {
            FrameShape::flat(self.image_side as usize)
        }
    }

    /// XenoPi is the control peer; the orbiter only receives broadcasts.
    pub fn peer_set(&self) -> PeerSet {
        let xenopi = Peer::new("xenopi", SocketAddr::new(self.xenopi_ip, self.xenopi_send_port));
        let others = if self.no_orbiter {
            Vec::new()
        } else {
            vec![Peer::new(
                "orbiter",
                SocketAddr::new(self.orbiter_ip, self.orbiter_send_port),
            )]
        };
        PeerSet::new(Some(xenopi), others)
    }

    /// The quad override wins over the settings document and pins the store.
    pub fn calibration_store(&self) -> Result<CalibrationStore, ConfigError> {
        match self.input_quad {
            Some(quad) => Ok(CalibrationStore::with_override(Calibration {
                quad,
                iteration_count: self.n_feedback_steps,
                use_base_image: true,
            })),
            None => CalibrationStore::from_file(&self.configuration_file),
        }
    }

    pub fn receive_addr(&self) -> SocketAddr {
        SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), self.receive_port)
    }
}
