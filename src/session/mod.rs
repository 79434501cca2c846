// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! # Session Control
//!
//! Turns inbound OSC messages into [`Command`]s and drives them through a
//! [`SessionController`], one at a time and in arrival order.
//!
//! | Command            | Effect                         | Notification            |
//! |--------------------|--------------------------------|-------------------------|
//! | `new`              | reset session counters         | `new` to all peers      |
//! | `begin(img, base)` | generation run                 | `step(path)` to all     |
//! | `step(img, base)`  | generation run                 | `step(path)` to all     |
//! | `handshake`        | none                           | `handshake` to control  |
//! | `settings-updated` | reload calibration             | none                    |
//!
//! Startup sends `begin` to all peers once the receive socket is bound;
//! shutdown sends `end`.

mod command;
mod controller;
mod server;

#[cfg(test)]
mod integration_tests;

pub use command::Command;
pub use controller::{SessionContext, SessionController, SessionOptions, SessionState};
pub use server::serve;
