// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod calibration;
mod cli;
mod settings;

pub mod consts;

pub use calibration::{Calibration, CalibrationSource, CalibrationStore, Quad};
pub use cli::Cli;
pub use settings::{load_settings, SettingsDocument};
