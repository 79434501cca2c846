use image::{GrayImage, Luma};
use rosc::{encoder, OscMessage, OscPacket, OscType};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::net::UdpSocket;
use tokio_util::sync::CancellationToken;

use crate::backends::stub::{InvertModel, RecordingTransport};
use crate::backends::{OscServer, PerspectiveRectifier};
use crate::broadcast::{BroadcastGateway, Peer, PeerSet};
use crate::config::CalibrationStore;
use crate::engine::{ArtifactLayout, FeedbackEngine, Frame, FrameShape, FrameSource};
use crate::errors::{ImagingError, PipelineError, TransformError};
use crate::traits::Transformation;
use crate::session::{serve, Command, SessionContext, SessionController, SessionOptions, SessionState};

/// Integration tests for the session controller with the real rectifier and
/// an in-memory transport.
#[cfg(test)]
mod tests {
    use super::*;

    const SIDE: u32 = 28;

    struct Harness {
        dir: TempDir,
        settings: PathBuf,
        model: Arc<InvertModel>,
        transport: Arc<RecordingTransport>,
    }

    impl Harness {
        fn new() -> Self {
            let dir = TempDir::new().unwrap();
            let settings = dir.path().join("settings.json");
            write_settings(&settings, 1);
            Self {
                dir,
                settings,
                model: Arc::new(InvertModel::new(FrameShape::flat(SIDE as usize))),
                transport: Arc::new(RecordingTransport::new()),
            }
        }

        fn controller(&self, peers: PeerSet, options: SessionOptions) -> SessionController {
            self.controller_with(self.model.clone(), peers, options)
        }

        fn controller_with(
            &self,
            model: Arc<dyn Transformation>,
            peers: PeerSet,
            options: SessionOptions,
        ) -> SessionController {
            let ctx = SessionContext {
                calibration: CalibrationStore::from_file(&self.settings).unwrap(),
                frame_source: FrameSource::new(
                    Arc::new(PerspectiveRectifier::new(32)),
                    FrameShape::flat(SIDE as usize),
                    SIDE,
                ),
                engine: FeedbackEngine::new(model),
                layout: ArtifactLayout::default(),
                gateway: BroadcastGateway::new(self.transport.clone(), peers),
            };
            SessionController::new(ctx, options).unwrap()
        }

        fn capture(&self, name: &str) -> PathBuf {
            let path = self.dir.path().join(name);
            GrayImage::from_fn(16, 16, |x, y| Luma([((x + y) * 8) as u8]))
                .save(&path)
                .unwrap();
            path
        }

        fn artifacts(&self) -> Vec<String> {
            let mut names: Vec<String> = std::fs::read_dir(self.dir.path())
                .unwrap()
                .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
                .filter(|name| {
                    ["_0trn", "_1fil", "_2res", "_3ann"]
                        .iter()
                        .any(|suffix| name.contains(suffix))
                })
                .collect();
            names.sort();
            names
        }
    }

    /// Accepts the flat frame but answers with a grid of the same length.
    struct ReshapingModel;

    impl Transformation for ReshapingModel {
        fn input_shape(&self) -> FrameShape {
            FrameShape::flat(SIDE as usize)
        }

        fn predict(&self, frame: &Frame) -> Result<Frame, TransformError> {
            Frame::new(FrameShape::grid(SIDE as usize), frame.data().to_vec())
        }

        fn name(&self) -> &str {
            "reshaping"
        }
    }

    /// Identity model that requests shutdown while it is running.
    struct CancellingModel {
        shutdown: CancellationToken,
    }

    impl Transformation for CancellingModel {
        fn input_shape(&self) -> FrameShape {
            FrameShape::flat(SIDE as usize)
        }

        fn predict(&self, frame: &Frame) -> Result<Frame, TransformError> {
            self.shutdown.cancel();
            Ok(frame.clone())
        }

        fn name(&self) -> &str {
            "cancelling"
        }
    }

    async fn send_command(client: &UdpSocket, to: SocketAddr, addr: &str, args: Vec<OscType>) {
        let packet = OscPacket::Message(OscMessage {
            addr: addr.to_string(),
            args,
        });
        client
            .send_to(&encoder::encode(&packet).unwrap(), to)
            .await
            .unwrap();
    }

    fn write_settings(path: &Path, iteration_count: usize) {
        std::fs::write(
            path,
            format!(
                r#"{{"quad": [0, 0, 10, 0, 10, 10, 0, 10], "iterationCount": {}, "useBaseImage": true}}"#,
                iteration_count
            ),
        )
        .unwrap();
    }

    fn xenopi() -> Peer {
        Peer::new("xenopi", SocketAddr::from(([127, 0, 0, 1], 7001)))
    }

    fn orbiter() -> Peer {
        Peer::new("orbiter", SocketAddr::from(([127, 0, 0, 1], 8001)))
    }

    fn both_peers() -> PeerSet {
        PeerSet::new(Some(xenopi()), vec![orbiter()])
    }

    fn step(image_path: &Path) -> Command {
        Command::Step {
            image_path: image_path.to_path_buf(),
            base_image_path: None,
        }
    }

    #[tokio::test]
    async fn test_rectified_run_writes_four_artifacts_and_one_step() {
        let harness = Harness::new();
        let mut controller =
            harness.controller(PeerSet::new(Some(xenopi()), Vec::new()), SessionOptions::default());
        let capture = harness.capture("euglena_0042.png");

        controller
            .dispatch(Command::Begin {
                image_path: capture.clone(),
                base_image_path: None,
            })
            .await
            .unwrap();

        assert_eq!(
            harness.artifacts(),
            vec![
                "euglena_0042_0trn.png",
                "euglena_0042_1fil.png",
                "euglena_0042_2res.png",
                "euglena_0042_3ann.png",
            ]
        );

        let steps = harness.transport.sent_to("/xeno/neurons/step");
        assert_eq!(steps.len(), 1);
        let expected = harness.dir.path().join("euglena_0042_3ann.png");
        assert_eq!(
            steps[0].args,
            vec![OscType::String(expected.to_string_lossy().into_owned())]
        );

        let generated = image::open(&expected).unwrap().to_luma8();
        assert_eq!(generated.dimensions(), (SIDE, SIDE));
        assert_eq!(harness.model.calls(), 1);
        assert_eq!(controller.state(), SessionState::Idle);
        assert_eq!(controller.total_runs(), 1);
    }

    #[tokio::test]
    async fn test_random_begin_writes_only_generated_image() {
        let harness = Harness::new();
        let mut controller = harness.controller(
            both_peers(),
            SessionOptions {
                begin_from_random: true,
            },
        );
        let capture = harness.capture("noise.png");

        controller
            .dispatch(Command::Begin {
                image_path: capture,
                base_image_path: None,
            })
            .await
            .unwrap();

        assert_eq!(harness.artifacts(), vec!["noise_3ann.png"]);
        let peers: Vec<String> = harness
            .transport
            .sent_to("/xeno/neurons/step")
            .into_iter()
            .map(|p| p.peer)
            .collect();
        assert_eq!(peers, vec!["xenopi", "orbiter"]);
    }

    #[tokio::test]
    async fn test_step_ignores_random_begin_option() {
        let harness = Harness::new();
        let mut controller = harness.controller(
            both_peers(),
            SessionOptions {
                begin_from_random: true,
            },
        );
        let capture = harness.capture("e.png");

        controller.dispatch(step(&capture)).await.unwrap();

        assert_eq!(harness.artifacts().len(), 4);
    }

    #[tokio::test]
    async fn test_handshake_only_reaches_control_peer() {
        let harness = Harness::new();
        let mut controller = harness.controller(both_peers(), SessionOptions::default());

        controller.dispatch(Command::Handshake).await.unwrap();

        let sent = harness.transport.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].peer, "xenopi");
        assert_eq!(sent[0].addr, "/xeno/neurons/handshake");
        assert_eq!(harness.model.calls(), 0);
    }

    #[tokio::test]
    async fn test_settings_update_changes_next_run_silently() {
        let harness = Harness::new();
        let mut controller = harness.controller(both_peers(), SessionOptions::default());
        let capture = harness.capture("e.png");

        controller.dispatch(step(&capture)).await.unwrap();
        assert_eq!(harness.model.calls(), 1);

        write_settings(&harness.settings, 5);
        let before = harness.transport.sent().len();
        controller.dispatch(Command::SettingsUpdated).await.unwrap();
        assert_eq!(harness.transport.sent().len(), before);
        assert_eq!(controller.calibration().iteration_count.get(), 5);

        controller.dispatch(step(&capture)).await.unwrap();
        assert_eq!(harness.model.calls(), 6);
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_previous_calibration() {
        let harness = Harness::new();
        let mut controller = harness.controller(both_peers(), SessionOptions::default());
        let before = controller.calibration().clone();

        std::fs::write(&harness.settings, "{ not json").unwrap();
        let result = controller.dispatch(Command::SettingsUpdated).await;

        assert!(matches!(result, Err(PipelineError::Config(_))));
        assert_eq!(controller.calibration(), &before);
        assert!(harness.transport.sent().is_empty());
    }

    #[tokio::test]
    async fn test_new_broadcasts_to_every_peer() {
        let harness = Harness::new();
        let mut controller = harness.controller(both_peers(), SessionOptions::default());

        controller.dispatch(Command::New).await.unwrap();

        let new = harness.transport.sent_to("/xeno/neurons/new");
        assert_eq!(new.len(), 2);
        assert!(new.iter().all(|p| p.args.is_empty()));
    }

    #[tokio::test]
    async fn test_unreadable_capture_sends_no_step() {
        let harness = Harness::new();
        let mut controller = harness.controller(both_peers(), SessionOptions::default());

        let result = controller
            .dispatch(step(&harness.dir.path().join("missing.png")))
            .await;

        assert!(matches!(
            result,
            Err(PipelineError::Imaging(ImagingError::Read { .. }))
        ));
        assert!(harness.transport.sent_to("/xeno/neurons/step").is_empty());
        assert!(harness.artifacts().is_empty());
        assert_eq!(controller.state(), SessionState::Idle);

        // the session carries on after a failed run
        let capture = harness.capture("e.png");
        controller.dispatch(step(&capture)).await.unwrap();
        assert_eq!(harness.transport.sent_to("/xeno/neurons/step").len(), 2);
    }

    #[tokio::test]
    async fn test_model_shape_must_match_frame_source() {
        let harness = Harness::new();
        let ctx = SessionContext {
            calibration: CalibrationStore::from_file(&harness.settings).unwrap(),
            frame_source: FrameSource::new(
                Arc::new(PerspectiveRectifier::default()),
                FrameShape::flat(SIDE as usize),
                SIDE,
            ),
            engine: FeedbackEngine::new(Arc::new(InvertModel::new(FrameShape::grid(
                SIDE as usize,
            )))),
            layout: ArtifactLayout::default(),
            gateway: BroadcastGateway::new(harness.transport.clone(), both_peers()),
        };

        assert!(matches!(
            SessionController::new(ctx, SessionOptions::default()),
            Err(TransformError::ShapeMismatch { .. })
        ));
    }

    #[tokio::test]
    async fn test_shutdown_broadcasts_end() {
        let harness = Harness::new();
        let mut controller = harness.controller(both_peers(), SessionOptions::default());

        controller.shutdown().await;

        assert_eq!(harness.transport.sent_to("/xeno/neurons/end").len(), 2);
    }

    #[tokio::test]
    async fn test_serve_loop_over_udp() {
        let harness = Harness::new();
        let mut controller = harness.controller(both_peers(), SessionOptions::default());
        let server = OscServer::bind("127.0.0.1:0".parse().unwrap()).await.unwrap();
        let server_addr = server.local_addr().unwrap();

        // queued in the socket buffer before the loop starts
        let client = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        client.send_to(b"garbage", server_addr).await.unwrap();
        for addr in ["/xeno/euglenas/unknown", "/xeno/euglenas/handshake"] {
            send_command(&client, server_addr, addr, Vec::new()).await;
        }

        let shutdown = CancellationToken::new();
        let trigger = shutdown.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(300)).await;
            trigger.cancel();
        });

        serve(&mut controller, server, shutdown).await.unwrap();

        let sent: Vec<(String, String)> = harness
            .transport
            .sent()
            .into_iter()
            .map(|p| (p.addr, p.peer))
            .collect();
        let pair = |a: &str, p: &str| (a.to_string(), p.to_string());
        assert_eq!(
            sent,
            vec![
                pair("/xeno/neurons/begin", "xenopi"),
                pair("/xeno/neurons/begin", "orbiter"),
                pair("/xeno/neurons/handshake", "xenopi"),
                pair("/xeno/neurons/end", "xenopi"),
                pair("/xeno/neurons/end", "orbiter"),
            ]
        );
    }

    #[tokio::test]
    async fn test_shape_error_leaves_no_artifacts() {
        let harness = Harness::new();
        let mut controller = harness.controller_with(
            Arc::new(ReshapingModel),
            both_peers(),
            SessionOptions::default(),
        );
        let capture = harness.capture("e.png");

        let result = controller.dispatch(step(&capture)).await;

        assert!(matches!(
            result,
            Err(PipelineError::Transform(TransformError::ShapeMismatch { .. }))
        ));
        assert!(harness.artifacts().is_empty());
        assert!(harness.transport.sent().is_empty());
        assert_eq!(controller.state(), SessionState::Idle);
    }

    #[tokio::test]
    async fn test_shutdown_waits_for_in_flight_run() {
        let harness = Harness::new();
        let shutdown = CancellationToken::new();
        let mut controller = harness.controller_with(
            Arc::new(CancellingModel {
                shutdown: shutdown.clone(),
            }),
            PeerSet::new(Some(xenopi()), Vec::new()),
            SessionOptions::default(),
        );
        let capture = harness.capture("e.png");
        let server = OscServer::bind("127.0.0.1:0".parse().unwrap()).await.unwrap();
        let server_addr = server.local_addr().unwrap();

        // both queued before the loop starts; the run cancels while in flight
        let client = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        send_command(
            &client,
            server_addr,
            "/xeno/euglenas/step",
            vec![OscType::String(capture.to_string_lossy().into_owned())],
        )
        .await;
        send_command(&client, server_addr, "/xeno/euglenas/handshake", Vec::new()).await;

        tokio::time::timeout(
            Duration::from_secs(5),
            serve(&mut controller, server, shutdown),
        )
        .await
        .unwrap()
        .unwrap();

        let addrs: Vec<String> = harness
            .transport
            .sent()
            .into_iter()
            .map(|p| p.addr)
            .collect();
        assert_eq!(
            addrs,
            vec![
                "/xeno/neurons/begin",
                "/xeno/neurons/step",
                "/xeno/neurons/end",
            ]
        );
        assert_eq!(harness.artifacts().len(), 4);
        assert_eq!(controller.total_runs(), 1);
    }
}
