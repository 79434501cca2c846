// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! Every diagnostic line the crate emits is a message struct with a `Display`
//! implementation and a [`messages::StructuredLog`] implementation that attaches
//! the message's fields to the `tracing` event. Call sites never build log
//! strings inline.
//!
//! # Usage
//!
//! ```rust
//! use xeno_neurons::observability::messages::broadcast::NotificationSent;
//! use xeno_neurons::observability::messages::StructuredLog;
//!
//! NotificationSent {
//!     address: "/xeno/neurons/begin",
//!     peer: "xenopi",
//! }
//! .log();
//! ```

pub mod messages;
