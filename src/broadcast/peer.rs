// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use std::net::SocketAddr;

/// A remote program receiving notifications.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Peer {
    pub name: String,
    pub addr: SocketAddr,
}

impl Peer {
    pub fn new(name: impl Into<String>, addr: SocketAddr) -> Self {
        Self {
            name: name.into(),
            addr,
        }
    }
}

impl fmt::Display for Peer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.addr)
    }
}

/// The fixed set of peers established at startup.
///
/// The control peer (XenoPi) receives point-to-point replies such as the
/// handshake; every peer, control included, receives broadcasts.
#[derive(Debug, Clone, Default)]
pub struct PeerSet {
    peers: Vec<Peer>,
    has_control: bool,
}

impl PeerSet {
    pub fn new(control: Option<Peer>, others: Vec<Peer>) -> Self {
        let has_control = control.is_some();
        let peers = control.into_iter().chain(others).collect();
        Self { peers, has_control }
    }

    pub fn control(&self) -> Option<&Peer> {
        if self.has_control {
            self.peers.first()
        } else {
            None
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Peer> {
        self.peers.iter()
    }

    pub fn len(&self) -> usize {
        self.peers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }
}
