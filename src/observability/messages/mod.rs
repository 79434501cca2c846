// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Messages are organized by subsystem:
//!
//! * `calibration` - settings loads and reloads
//! * `pipeline` - generation runs and feedback steps
//! * `broadcast` - outbound notifications
//! * `session` - receive loop and command dispatch

use tracing::Span;

pub mod broadcast;
pub mod calibration;
pub mod pipeline;
pub mod session;

/// Emits a message as a `tracing` event with its fields attached.
pub trait StructuredLog {
    /// Log the message at its designated level.
    fn log(&self);

    /// Span carrying the message's fields, for work done on its behalf.
    fn span(&self, _name: &str) -> Span {
        Span::none()
    }
}
