// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! OSC 1.0 over UDP.
//!
//! [`UdpTransport`] sends notifications from an ephemeral socket;
//! [`OscServer`] owns the bound receive socket and decodes inbound
//! datagrams into messages.

use async_trait::async_trait;
use rosc::{decoder, encoder, OscMessage, OscPacket};
use std::io;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use tokio::net::UdpSocket;

use crate::broadcast::Peer;
use crate::config::consts::RECEIVE_BUFFER_SIZE;
use crate::errors::BroadcastError;
use crate::observability::messages::session::PacketDecodeFailed;
use crate::observability::messages::StructuredLog;
use crate::traits::Transport;

/// Fire-and-forget sender shared by all peers.
#[derive(Debug)]
pub struct UdpTransport {
    socket: UdpSocket,
}

impl UdpTransport {
    pub async fn bind(addr: SocketAddr) -> io::Result<Self> {
        Ok(Self {
            socket: UdpSocket::bind(addr).await?,
        })
    }

    /// Bind to any free port on all interfaces.
    pub async fn bind_ephemeral() -> io::Result<Self> {
        Self::bind(SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 0)).await
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }
}

#[async_trait]
impl Transport for UdpTransport {
    async fn send(&self, peer: &Peer, packet: &OscPacket) -> Result<(), BroadcastError> {
        let bytes = encoder::encode(packet).map_err(|e| BroadcastError::Encode {
            address: packet_address(packet),
            reason: format!("{:?}", e),
        })?;
        self.socket
            .send_to(&bytes, peer.addr)
            .await
            .map_err(|source| BroadcastError::Send {
                peer: peer.name.clone(),
                source,
            })?;
        Ok(())
    }
}

/// Bound receive socket for inbound commands.
#[derive(Debug)]
pub struct OscServer {
    socket: UdpSocket,
}

impl OscServer {
    pub async fn bind(addr: SocketAddr) -> io::Result<Self> {
        Ok(Self {
            socket: UdpSocket::bind(addr).await?,
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    /// Wait for the next datagram and return the messages it carries, in
    /// order. Undecodable datagrams are logged and yield no messages.
    pub async fn recv(&self) -> io::Result<Vec<OscMessage>> {
        let mut buf = vec![0u8; RECEIVE_BUFFER_SIZE];
        let (len, from) = self.socket.recv_from(&mut buf).await?;

        match decoder::decode_udp(&buf[..len]) {
            Ok((_, packet)) => Ok(flatten(packet)),
            Err(e) => {
                PacketDecodeFailed {
                    from,
                    reason: &format!("{:?}", e),
                }
                .log();
                Ok(Vec::new())
            }
        }
    }
}

/// Messages of a packet in bundle order, nested bundles included.
pub fn flatten(packet: OscPacket) -> Vec<OscMessage> {
    match packet {
        OscPacket::Message(message) => vec![message],
        OscPacket::Bundle(bundle) => bundle.content.into_iter().flat_map(flatten).collect(),
    }
}

fn packet_address(packet: &OscPacket) -> String {
    match packet {
        OscPacket::Message(message) => message.addr.clone(),
        OscPacket::Bundle(_) => "#bundle".to_string(),
    }
}
