// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use rosc::{OscPacket, OscType};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::broadcast::Peer;
use crate::engine::{Frame, FrameShape};
use crate::errors::{BroadcastError, TransformError};
use crate::traits::{Transformation, Transport};

/// One packet handed to a [`RecordingTransport`]
#[derive(Debug, Clone, PartialEq)]
pub struct SentPacket {
    pub peer: String,
    pub addr: String,
    pub args: Vec<OscType>,
}

/// Transport that records every send instead of touching the network
#[derive(Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<SentPacket>>,
    unreachable: Vec<String>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sends to the named peers fail as if the host were down
    pub fn with_unreachable(peers: &[&str]) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            unreachable: peers.iter().map(|p| p.to_string()).collect(),
        }
    }

    pub fn sent(&self) -> Vec<SentPacket> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_to(&self, addr: &str) -> Vec<SentPacket> {
        self.sent().into_iter().filter(|p| p.addr == addr).collect()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, peer: &Peer, packet: &OscPacket) -> Result<(), BroadcastError> {
        if self.unreachable.contains(&peer.name) {
            return Err(BroadcastError::Send {
                peer: peer.name.clone(),
                source: std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "unreachable"),
            });
        }
        let OscPacket::Message(message) = packet else {
            panic!("gateway only sends plain messages");
        };
        self.sent.lock().unwrap().push(SentPacket {
            peer: peer.name.clone(),
            addr: message.addr.clone(),
            args: message.args.clone(),
        });
        Ok(())
    }
}

/// Deterministic model: x -> 1 - x, counting calls
pub struct InvertModel {
    shape: FrameShape,
    calls: AtomicUsize,
}

impl InvertModel {
    pub fn new(shape: FrameShape) -> Self {
        Self {
            shape,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Transformation for InvertModel {
    fn input_shape(&self) -> FrameShape {
        self.shape
    }

    fn predict(&self, frame: &Frame) -> Result<Frame, TransformError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Frame::new(self.shape, frame.data().iter().map(|v| 1.0 - v).collect())
    }

    fn name(&self) -> &str {
        "invert"
    }
}
