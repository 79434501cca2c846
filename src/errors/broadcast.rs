// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Failures while delivering a notification to a single peer.
///
/// These are logged by the gateway and never fail the run that produced the
/// notification.
#[derive(Error, Debug)]
pub enum BroadcastError {
    /// The OSC packet could not be encoded.
    #[error("failed to encode OSC packet for '{address}': {reason}")]
    Encode { address: String, reason: String },

    /// The datagram could not be handed to the socket.
    #[error("failed to send to peer '{peer}': {source}")]
    Send {
        peer: String,
        #[source]
        source: std::io::Error,
    },
}
