// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use rosc::{OscMessage, OscType};
use std::path::{Path, PathBuf};

use crate::config::consts::COMMAND_PREFIX;
use crate::errors::CommandError;

/// Inbound commands, one variant per `/xeno/euglenas/*` address.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Start a new session.
    New,
    /// First generation run of a session.
    Begin {
        image_path: PathBuf,
        base_image_path: Option<PathBuf>,
    },
    /// Any later generation run.
    Step {
        image_path: PathBuf,
        base_image_path: Option<PathBuf>,
    },
    /// Liveness probe from the control peer.
    Handshake,
    /// The settings document changed on disk.
    SettingsUpdated,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::New => "new",
            Command::Begin { .. } => "begin",
            Command::Step { .. } => "step",
            Command::Handshake => "handshake",
            Command::SettingsUpdated => "settings-updated",
        }
    }
}

impl TryFrom<&OscMessage> for Command {
    type Error = CommandError;

    fn try_from(message: &OscMessage) -> Result<Self, Self::Error> {
        let topic = message
            .addr
            .strip_prefix(COMMAND_PREFIX)
            .and_then(|rest| rest.strip_prefix('/'))
            .ok_or_else(|| CommandError::UnknownAddress(message.addr.clone()))?;

        match topic {
            "new" => Ok(Command::New),
            "handshake" => Ok(Command::Handshake),
            "settings-updated" => Ok(Command::SettingsUpdated),
            "begin" => {
                let (image_path, base_image_path) = image_arguments(message)?;
                Ok(Command::Begin {
                    image_path,
                    base_image_path,
                })
            }
            "step" => {
                let (image_path, base_image_path) = image_arguments(message)?;
                Ok(Command::Step {
                    image_path,
                    base_image_path,
                })
            }
            _ => Err(CommandError::UnknownAddress(message.addr.clone())),
        }
    }
}

/// `(imagePath, basePath)`. The base path may be omitted or empty.
///
/// Artifact names derive from the image's file stem, so an image path without
/// one (`..`, `/`) is rejected here.
fn image_arguments(message: &OscMessage) -> Result<(PathBuf, Option<PathBuf>), CommandError> {
    let image_path = match string_argument(message, 0)? {
        Some(path) if !path.is_empty() => path,
        _ => {
            return Err(CommandError::MissingArgument {
                address: message.addr.clone(),
                index: 0,
                name: "imagePath",
            })
        }
    };
    if Path::new(image_path).file_stem().is_none() {
        return Err(CommandError::NoFileName {
            address: message.addr.clone(),
            path: image_path.to_string(),
        });
    }
    let image_path = PathBuf::from(image_path);
    let base_image_path = string_argument(message, 1)?
        .filter(|path| !path.is_empty())
        .map(PathBuf::from);
    Ok((image_path, base_image_path))
}

fn string_argument<'a>(
    message: &'a OscMessage,
    index: usize,
) -> Result<Option<&'a str>, CommandError> {
    match message.args.get(index) {
        None => Ok(None),
        Some(OscType::String(value)) => Ok(Some(value.as_str())),
        Some(other) => Err(CommandError::WrongType {
            address: message.addr.clone(),
            index,
            found: type_name(other).to_string(),
        }),
    }
}

fn type_name(arg: &OscType) -> &'static str {
    match arg {
        OscType::Int(_) => "int",
        OscType::Float(_) => "float",
        OscType::String(_) => "string",
        OscType::Blob(_) => "blob",
        OscType::Long(_) => "long",
        OscType::Double(_) => "double",
        OscType::Bool(_) => "bool",
        OscType::Nil => "nil",
        _ => "other",
    }
}
