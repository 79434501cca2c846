// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::io;
use tokio_util::sync::CancellationToken;

use crate::backends::OscServer;
use crate::observability::messages::session::{CommandRejected, ReceiveFailed, ServerReady};
use crate::observability::messages::StructuredLog;
use crate::session::{Command, SessionController};

/// Receive loop: announce, then dispatch commands in arrival order until
/// `shutdown` is cancelled.
///
/// Cancellation is only observed while waiting for a datagram or between the
/// messages of a bundle, so a run that has started always finishes and sends
/// its notification. The receive socket is released before "end" goes out.
pub async fn serve(
    controller: &mut SessionController,
    server: OscServer,
    shutdown: CancellationToken,
) -> io::Result<()> {
    let local_addr = server.local_addr()?;
    let peer_count = controller.announce_ready().await;
    ServerReady {
        local_addr,
        peer_count,
    }
    .log();

    'receive: loop {
        let received = tokio::select! {
            biased;
            _ = shutdown.cancelled() => break,
            received = server.recv() => received,
        };

        let messages = match received {
            Ok(messages) => messages,
            Err(error) => {
                ReceiveFailed { error: &error }.log();
                continue;
            }
        };

        for message in messages {
            if shutdown.is_cancelled() {
                break 'receive;
            }
            match Command::try_from(&message) {
                // a failed command is logged by the controller and ends only itself
                Ok(command) => {
                    let _ = controller.dispatch(command).await;
                }
                Err(error) => CommandRejected { error: &error }.log(),
            }
        }
    }

    drop(server);
    controller.shutdown().await;
    Ok(())
}
