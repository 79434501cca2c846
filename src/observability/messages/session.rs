// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for the receive loop and command dispatch.

use crate::errors::CommandError;
use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use std::time::Duration;

/// Receive socket bound, downstream programs may start sending commands.
///
/// # Log Level
/// `info!`
pub struct ServerReady {
    pub local_addr: SocketAddr,
    pub peer_count: usize,
}

impl Display for ServerReady {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Serving on {}. Program ready, {} peers notified. You can now start XenoPi generative mode.",
            self.local_addr, self.peer_count
        )
    }
}

impl StructuredLog for ServerReady {
    fn log(&self) {
        tracing::info!(
            local_addr = %self.local_addr,
            peer_count = self.peer_count,
            "{}", self
        );
    }
}

/// Command accepted for dispatch.
///
/// # Log Level
/// `debug!`
pub struct CommandReceived<'a> {
    pub command: &'a str,
}

impl Display for CommandReceived<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Received {}", self.command)
    }
}

impl StructuredLog for CommandReceived<'_> {
    fn log(&self) {
        tracing::debug!(command = self.command, "{}", self);
    }
}

/// Inbound message that does not map to a command.
///
/// # Log Level
/// `warn!`
pub struct CommandRejected<'a> {
    pub error: &'a CommandError,
}

impl Display for CommandRejected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Ignoring message: {}", self.error)
    }
}

impl StructuredLog for CommandRejected<'_> {
    fn log(&self) {
        tracing::warn!(error = %self.error, "{}", self);
    }
}

/// Datagram that is not a valid OSC packet.
///
/// # Log Level
/// `warn!`
pub struct PacketDecodeFailed<'a> {
    pub from: SocketAddr,
    pub reason: &'a str,
}

impl Display for PacketDecodeFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Undecodable packet from {}: {}", self.from, self.reason)
    }
}

impl StructuredLog for PacketDecodeFailed<'_> {
    fn log(&self) {
        tracing::warn!(from = %self.from, reason = self.reason, "{}", self);
    }
}

/// Receive socket returned an error; the loop keeps waiting.
///
/// # Log Level
/// `warn!`
pub struct ReceiveFailed<'a> {
    pub error: &'a std::io::Error,
}

impl Display for ReceiveFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Receive failed: {}", self.error)
    }
}

impl StructuredLog for ReceiveFailed<'_> {
    fn log(&self) {
        tracing::warn!(error = %self.error, "{}", self);
    }
}

/// A "new" command reset the per-session counters.
///
/// # Log Level
/// `info!`
pub struct SessionReset {
    pub previous_runs: u64,
}

impl Display for SessionReset {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "New session (previous session had {} runs)",
            self.previous_runs
        )
    }
}

impl StructuredLog for SessionReset {
    fn log(&self) {
        tracing::info!(previous_runs = self.previous_runs, "{}", self);
    }
}

/// Shutdown observed between commands.
///
/// # Log Level
/// `info!`
pub struct SessionEnded {
    pub total_runs: u64,
    pub mean_run_duration: Option<Duration>,
}

impl Display for SessionEnded {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self.mean_run_duration {
            Some(mean) => write!(
                f,
                "Exiting program after {} runs (mean run time {:?})",
                self.total_runs, mean
            ),
            None => write!(f, "Exiting program, no runs completed"),
        }
    }
}

impl StructuredLog for SessionEnded {
    fn log(&self) {
        tracing::info!(
            total_runs = self.total_runs,
            mean_run_ms = self.mean_run_duration.map(|d| d.as_millis() as u64),
            "{}", self
        );
    }
}
