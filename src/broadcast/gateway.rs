// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::broadcast::{Notification, Peer, PeerSet};
use crate::observability::messages::broadcast::{
    NoControlPeer, NotificationFailed, NotificationSent,
};
use crate::observability::messages::StructuredLog;
use crate::traits::Transport;

/// Who a notification is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    /// Every configured peer.
    All,
    /// Only the control peer.
    Control,
}

/// Best-effort fan-out of notifications to the configured peers.
///
/// One datagram per peer, no acknowledgement, no retry, no queue. A failed
/// send is logged and the remaining peers are still tried.
pub struct BroadcastGateway {
    transport: Arc<dyn Transport>,
    peers: PeerSet,
}

impl BroadcastGateway {
    pub fn new(transport: Arc<dyn Transport>, peers: PeerSet) -> Self {
        Self { transport, peers }
    }

    pub fn peers(&self) -> &PeerSet {
        &self.peers
    }

    /// Returns how many peers the transport accepted the notification for.
    pub async fn notify(&self, notification: &Notification, audience: Audience) -> usize {
        let address = notification.address();
        let targets: Vec<&Peer> = match audience {
            Audience::All => self.peers.iter().collect(),
            Audience::Control => match self.peers.control() {
                Some(control) => vec![control],
                None => {
                    NoControlPeer { address: &address }.log();
                    Vec::new()
                }
            },
        };

        let packet = notification.to_packet();
        let mut delivered = 0;
        for peer in targets {
            match self.transport.send(peer, &packet).await {
                Ok(()) => {
                    NotificationSent {
                        address: &address,
                        peer: &peer.name,
                    }
                    .log();
                    delivered += 1;
                }
                Err(error) => NotificationFailed {
                    address: &address,
                    peer: &peer.name,
                    error: &error,
                }
                .log(),
            }
        }
        delivered
    }

    pub async fn broadcast(&self, notification: &Notification) -> usize {
        self.notify(notification, Audience::All).await
    }

    pub async fn reply_to_control(&self, notification: &Notification) -> usize {
        self.notify(notification, Audience::Control).await
    }
}

impl std::fmt::Debug for BroadcastGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BroadcastGateway")
            .field("peers", &self.peers)
            .finish()
    }
}
