// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod broadcast;
mod command;
mod config;
mod pipeline;

pub use broadcast::BroadcastError;
pub use command::CommandError;
pub use config::ConfigError;
pub use pipeline::{ImagingError, PipelineError, TransformError};
