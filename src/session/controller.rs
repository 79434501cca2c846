// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Command dispatch and the generation run.
//!
//! The controller owns the whole session context. Dispatch takes `&mut self`,
//! so a settings reload can never overlap a run: each run copies the
//! calibration it starts with and finishes on that copy.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::broadcast::{BroadcastGateway, Notification};
use crate::config::{Calibration, CalibrationStore};
use crate::engine::{persist, render, ArtifactLayout, FeedbackEngine, FrameSource, GenerationRequest};
use crate::errors::{PipelineError, TransformError};
use crate::observability::messages::pipeline::{RunCompleted, RunFailed, RunStarted};
use crate::observability::messages::session::{CommandReceived, SessionEnded, SessionReset};
use crate::observability::messages::StructuredLog;
use crate::session::Command;

/// Everything a session needs, built once at startup.
#[derive(Debug)]
pub struct SessionContext {
    pub calibration: CalibrationStore,
    pub frame_source: FrameSource,
    pub engine: FeedbackEngine,
    pub layout: ArtifactLayout,
    pub gateway: BroadcastGateway,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionOptions {
    /// "begin" starts from noise instead of the rectified capture.
    pub begin_from_random: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Processing,
}

pub struct SessionController {
    ctx: SessionContext,
    options: SessionOptions,
    state: SessionState,
    session_runs: u64,
    total_runs: u64,
    total_run_time: Duration,
}

impl SessionController {
    /// Fails when the model was loaded for a different frame shape than the
    /// frame source produces.
    pub fn new(ctx: SessionContext, options: SessionOptions) -> Result<Self, TransformError> {
        let expected = ctx.engine.transformation().input_shape();
        let actual = ctx.frame_source.shape();
        if expected != actual {
            return Err(TransformError::ShapeMismatch { expected, actual });
        }

        Ok(Self {
            ctx,
            options,
            state: SessionState::Idle,
            session_runs: 0,
            total_runs: 0,
            total_run_time: Duration::ZERO,
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn calibration(&self) -> &Calibration {
        self.ctx.calibration.current()
    }

    pub fn total_runs(&self) -> u64 {
        self.total_runs
    }

    /// Tell every peer that commands may be sent. Returns the number reached.
    pub async fn announce_ready(&self) -> usize {
        self.ctx.gateway.broadcast(&Notification::Begin).await
    }

    /// Handle one command to completion.
    ///
    /// Errors are logged before they are returned; the caller only needs them
    /// to decide whether to keep going.
    pub async fn dispatch(&mut self, command: Command) -> Result<(), PipelineError> {
        CommandReceived {
            command: command.name(),
        }
        .log();

        match command {
            Command::New => {
                SessionReset {
                    previous_runs: self.session_runs,
                }
                .log();
                self.session_runs = 0;
                self.ctx.gateway.broadcast(&Notification::New).await;
                Ok(())
            }
            Command::Begin {
                image_path,
                base_image_path,
            } => {
                let request = GenerationRequest {
                    image_path,
                    base_image_path,
                    start_from_random: self.options.begin_from_random,
                };
                self.run(request).await.map(|_| ())
            }
            Command::Step {
                image_path,
                base_image_path,
            } => {
                let request = GenerationRequest {
                    image_path,
                    base_image_path,
                    start_from_random: false,
                };
                self.run(request).await.map(|_| ())
            }
            Command::Handshake => {
                self.ctx
                    .gateway
                    .reply_to_control(&Notification::Handshake)
                    .await;
                Ok(())
            }
            Command::SettingsUpdated => {
                self.ctx.calibration.load()?;
                Ok(())
            }
        }
    }

    /// Rectify or sample, iterate, render, persist, then announce the output.
    ///
    /// A failed run sends nothing.
    pub async fn run(&mut self, request: GenerationRequest) -> Result<PathBuf, PipelineError> {
        let calibration = self.ctx.calibration.current().clone();
        let started = RunStarted {
            image_path: &request.image_path,
            start_from_random: request.start_from_random,
            iteration_count: calibration.iteration_count.get(),
        };
        started.log();
        let span = started.span("run");

        self.state = SessionState::Processing;
        let clock = Instant::now();
        let result = {
            let _entered = span.enter();
            self.generate(&request, &calibration)
        };
        self.state = SessionState::Idle;

        let output_path = match result {
            Ok(path) => path,
            Err(error) => {
                RunFailed {
                    image_path: &request.image_path,
                    error: &error,
                }
                .log();
                return Err(error);
            }
        };

        let duration = clock.elapsed();
        self.session_runs += 1;
        self.total_runs += 1;
        self.total_run_time += duration;
        RunCompleted {
            output_path: &output_path,
            iterations: calibration.iteration_count.get(),
            duration,
        }
        .log();

        self.ctx
            .gateway
            .broadcast(&Notification::Step {
                output_path: output_path.clone(),
            })
            .await;
        Ok(output_path)
    }

    fn generate(
        &self,
        request: &GenerationRequest,
        calibration: &Calibration,
    ) -> Result<PathBuf, PipelineError> {
        let initial = self.ctx.frame_source.initial_frame(request, calibration)?;
        let last = self
            .ctx
            .engine
            .iterate(initial.frame, calibration.iteration_count)?;
        let image = render(&last, self.ctx.frame_source.side())?;

        // nothing touches the disk until the run has produced its output
        let paths = self.ctx.layout.paths_for(&request.image_path);
        if let Some(rectified) = &initial.rectified {
            persist(&rectified.transformed, &paths.transformed)?;
            persist(&rectified.filtered, &paths.filtered)?;
            persist(&rectified.resolved, &paths.resolved)?;
        }
        persist(&image, &paths.generated)?;
        Ok(paths.generated)
    }

    /// Announce the end of the session and log the run summary.
    pub async fn shutdown(&mut self) {
        self.ctx.gateway.broadcast(&Notification::End).await;
        SessionEnded {
            total_runs: self.total_runs,
            mean_run_duration: self.mean_run_duration(),
        }
        .log();
    }

    fn mean_run_duration(&self) -> Option<Duration> {
        if self.total_runs == 0 {
            return None;
        }
        let runs = u32::try_from(self.total_runs).unwrap_or(u32::MAX);
        Some(self.total_run_time / runs)
    }
}

impl std::fmt::Debug for SessionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionController")
            .field("state", &self.state)
            .field("options", &self.options)
            .field("session_runs", &self.session_runs)
            .field("total_runs", &self.total_runs)
            .finish()
    }
}
