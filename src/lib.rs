// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod backends;   // model, imaging and OSC backends
pub mod broadcast;  // peer notifications
pub mod config;     // settings, calibration, CLI
pub mod engine;     // frame source, feedback loop, render
pub mod errors;     // error handling
pub mod observability;
pub mod session;    // command dispatch + receive loop
pub mod traits;     // seams for the black-box collaborators
