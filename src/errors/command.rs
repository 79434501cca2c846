// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Reasons an inbound OSC message is rejected before dispatch.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommandError {
    #[error("unrecognized command address '{0}'")]
    UnknownAddress(String),

    #[error("command '{address}' is missing argument {index} ({name})")]
    MissingArgument {
        address: String,
        index: usize,
        name: &'static str,
    },

    #[error("command '{address}' image path '{path}' has no file name")]
    NoFileName { address: String, path: String },

    #[error("command '{address}' argument {index} must be a string, got {found}")]
    WrongType {
        address: String,
        index: usize,
        found: String,
    },
}
