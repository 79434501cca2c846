// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for outbound notifications.

use crate::errors::BroadcastError;
use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};

/// Notification handed to the transport for one peer.
///
/// # Log Level
/// `debug!` - Emitted once per peer per notification
pub struct NotificationSent<'a> {
    pub address: &'a str,
    pub peer: &'a str,
}

impl Display for NotificationSent<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Sent {} to {}", self.address, self.peer)
    }
}

impl StructuredLog for NotificationSent<'_> {
    fn log(&self) {
        tracing::debug!(address = self.address, peer = self.peer, "{}", self);
    }
}

/// Notification could not be delivered to a peer. Delivery is best effort,
/// so this is the only trace a dropped notification leaves.
///
/// # Log Level
/// `warn!`
pub struct NotificationFailed<'a> {
    pub address: &'a str,
    pub peer: &'a str,
    pub error: &'a BroadcastError,
}

impl Display for NotificationFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Dropped {} for {}: {}",
            self.address, self.peer, self.error
        )
    }
}

impl StructuredLog for NotificationFailed<'_> {
    fn log(&self) {
        tracing::warn!(
            address = self.address,
            peer = self.peer,
            error = %self.error,
            "{}", self
        );
    }
}

/// Handshake requested but no control peer is configured.
///
/// # Log Level
/// `warn!`
pub struct NoControlPeer<'a> {
    pub address: &'a str,
}

impl Display for NoControlPeer<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "No control peer configured, {} not sent", self.address)
    }
}

impl StructuredLog for NoControlPeer<'_> {
    fn log(&self) {
        tracing::warn!(address = self.address, "{}", self);
    }
}
