// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use rosc::{OscMessage, OscPacket, OscType};
use std::path::PathBuf;

use crate::config::consts::NOTIFICATION_PREFIX;

/// Outbound notifications, one variant per `/xeno/neurons/*` address.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    /// Receive socket is bound and commands may be sent.
    Begin,
    /// A new session started.
    New,
    /// A generation run finished; carries the generated image path.
    Step { output_path: PathBuf },
    /// Reply to a handshake from the control peer.
    Handshake,
    /// The process is shutting down.
    End,
}

impl Notification {
    pub fn address(&self) -> String {
        let topic = match self {
            Notification::Begin => "begin",
            Notification::New => "new",
            Notification::Step { .. } => "step",
            Notification::Handshake => "handshake",
            Notification::End => "end",
        };
        format!("{}/{}", NOTIFICATION_PREFIX, topic)
    }

    pub fn args(&self) -> Vec<OscType> {
        match self {
            Notification::Step { output_path } => {
                vec![OscType::String(output_path.to_string_lossy().into_owned())]
            }
            _ => Vec::new(),
        }
    }

    pub fn to_packet(&self) -> OscPacket {
        OscPacket::Message(OscMessage {
            addr: self.address(),
            args: self.args(),
        })
    }
}
