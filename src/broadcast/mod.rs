// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod gateway;
mod notification;
mod peer;

pub use gateway::{Audience, BroadcastGateway};
pub use notification::Notification;
pub use peer::{Peer, PeerSet};
