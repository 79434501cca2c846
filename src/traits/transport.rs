use async_trait::async_trait;
use rosc::OscPacket;

use crate::broadcast::Peer;
use crate::errors::BroadcastError;

/// Outbound datagram transport. One call sends one packet to one peer, with
/// no acknowledgement and no retry.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, peer: &Peer, packet: &OscPacket) -> Result<(), BroadcastError>;
}
