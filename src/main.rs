// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use xeno_neurons::backends::{DenseAutoencoder, OscServer, PerspectiveRectifier, UdpTransport};
use xeno_neurons::broadcast::BroadcastGateway;
use xeno_neurons::config::Cli;
use xeno_neurons::engine::{ArtifactLayout, FeedbackEngine, FrameSource};
use xeno_neurons::session::{serve, SessionContext, SessionController, SessionOptions};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    std::fs::create_dir_all(&cli.output_directory).with_context(|| {
        format!(
            "failed to create output directory {}",
            cli.output_directory.display()
        )
    })?;

    let calibration = cli
        .calibration_store()
        .context("failed to load calibration")?;

    let shape = cli.frame_shape();
    let model = DenseAutoencoder::load(&cli.model_file, shape).context("failed to load model")?;

    let transport = UdpTransport::bind_ephemeral()
        .await
        .context("failed to bind send socket")?;

    let ctx = SessionContext {
        calibration,
        frame_source: FrameSource::new(
            Arc::new(PerspectiveRectifier::new(cli.working_side)),
            shape,
            cli.image_side,
        ),
        engine: FeedbackEngine::new(Arc::new(model)),
        layout: ArtifactLayout::new(Some(cli.output_directory.clone())),
        gateway: BroadcastGateway::new(Arc::new(transport), cli.peer_set()),
    };
    let options = SessionOptions {
        begin_from_random: cli.begin_from_random,
    };
    let mut controller =
        SessionController::new(ctx, options).context("model does not fit the frame shape")?;

    let receive_addr = cli.receive_addr();
    let server = OscServer::bind(receive_addr)
        .await
        .with_context(|| format!("failed to bind receive socket {}", receive_addr))?;

    let shutdown = CancellationToken::new();
    let signal = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            signal.cancel();
        }
    });

    serve(&mut controller, server, shutdown)
        .await
        .context("receive loop failed")?;
    Ok(())
}
