//! Unit tests for fd-runtime.
//!
//! Runtime tests use tokio's paused clock: sleeping advances time instantly
//! once every task is idle, so the 60 s timeout is exercised without waiting.

#[cfg(test)]
mod helpers {
    use std::sync::Arc;

    use tokio::sync::mpsc;

    use fd_core::DispatchConfig;
    use fd_dispatch::{Dispatcher, DispatcherBuilder, MissionCommand};
    use fd_spatial::{RoadNetwork, RoadNetworkBuilder};

    use crate::{ChannelCommandSink, CommandCodec, EncodedCommand, JsonCodec, LogStatusSink, TokioClock};

    /// Two-way line `0 ─ 1 ─ 2 ─ 3 ─ 4 ─ 5`.
    pub fn line_network() -> RoadNetwork {
        let mut b = RoadNetworkBuilder::new();
        let n = b.add_nodes(6);
        for w in n.windows(2) {
            b.add_road(w[0], w[1]);
        }
        b.build().unwrap()
    }

    pub fn dispatcher(config: DispatchConfig) -> (Dispatcher, mpsc::UnboundedReceiver<EncodedCommand>) {
        let (sink, commands) = ChannelCommandSink::channel(Arc::new(JsonCodec));
        let dispatcher = DispatcherBuilder::new(Arc::new(line_network()))
            .config(config)
            .clock(TokioClock::new())
            .command_sink(sink)
            .status_sink(LogStatusSink)
            .build()
            .unwrap();
        (dispatcher, commands)
    }

    pub async fn next_command(rx: &mut mpsc::UnboundedReceiver<EncodedCommand>) -> MissionCommand {
        let encoded = rx.recv().await.expect("command channel closed");
        let command = JsonCodec.decode(&encoded.payload).unwrap();
        assert_eq!(command.robot, encoded.robot);
        command
    }
}

// ── Codec ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod codec {
    use fd_core::{NodeId, RobotName};
    use fd_dispatch::MissionCommand;
    use fd_fleet::TaxiState;

    use crate::{CodecError, CommandCodec, JsonCodec};

    #[test]
    fn json_layout_uses_plain_fields() {
        let command = MissionCommand {
            robot:  RobotName::from("r1"),
            target: NodeId(5),
            state:  TaxiState::GoingToCustomer,
        };
        let bytes = JsonCodec.encode(&command).unwrap();
        assert_eq!(
            std::str::from_utf8(&bytes).unwrap(),
            r#"{"robot":"r1","target":5,"state":"going_to_customer"}"#
        );
        assert_eq!(JsonCodec.decode(&bytes).unwrap(), command);
    }

    #[test]
    fn garbage_is_a_codec_error() {
        assert!(matches!(JsonCodec.decode(b"not json"), Err(CodecError::Json(_))));
    }
}

// ── Sources ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod sources {
    use crate::{ChannelLocationSource, LocationSource, RuntimeError};

    #[test]
    fn channel_source_subscribes_once() {
        let (_tx, mut source) = ChannelLocationSource::channel(4);
        assert!(source.subscribe().is_ok());
        assert!(matches!(source.subscribe(), Err(RuntimeError::Subscribe { .. })));
    }
}

// ── Event loop ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod runtime {
    use std::time::Duration;

    use tokio::sync::mpsc;

    use fd_core::{DispatchConfig, NodeId, RobotName};
    use fd_dispatch::DispatchError;
    use fd_fleet::TaxiState;

    use super::helpers::*;
    use crate::{
        ChannelLocationSource, ChannelRequestSource, CustomerRequest, FleetRuntime, LocationReport,
        LocationSource, RuntimeError, RuntimeResult,
    };

    struct Unavailable;

    impl LocationSource for Unavailable {
        fn subscribe(&mut self) -> RuntimeResult<mpsc::Receiver<LocationReport>> {
            Err(RuntimeError::Subscribe { port: "location reports", reason: "no transport".into() })
        }
    }

    #[tokio::test(start_paused = true)]
    async fn full_mission_over_the_event_loop() {
        let (dispatcher, mut commands) = dispatcher(DispatchConfig::default());
        let (locations_tx, locations) = ChannelLocationSource::channel(16);
        let (runtime, handle) = FleetRuntime::new(dispatcher);
        let task = tokio::spawn(runtime.with_location_source(locations).run());

        let r1 = RobotName::from("R1");
        let report = |node| LocationReport { robot: r1.clone(), node: NodeId(node), next: None };

        locations_tx.send(report(1)).await.unwrap();
        tokio::task::yield_now().await;
        let id = handle.submit_request(NodeId(1), NodeId(5)).await.unwrap();

        let cmd = next_command(&mut commands).await;
        assert_eq!((cmd.target, cmd.state), (NodeId(1), TaxiState::GoingToCustomer));

        locations_tx.send(report(1)).await.unwrap();
        let cmd = next_command(&mut commands).await;
        assert_eq!((cmd.target, cmd.state), (NodeId(5), TaxiState::WithCustomer));

        locations_tx.send(report(5)).await.unwrap();
        // The metrics query queues behind the drop-off report.
        tokio::time::sleep(Duration::from_millis(10)).await;
        let metrics = handle.metrics().await.unwrap();
        assert_eq!(metrics.fulfilled, 1);
        assert_eq!(metrics.idle, 1);

        handle.shutdown().await.unwrap();
        let summary = task.await.unwrap().unwrap();
        assert_eq!(id.0, 0);
        assert_eq!(summary.location_reports, 3);
        assert_eq!(summary.requests_accepted, 1);
        assert!(!summary.degraded);
        assert_eq!(summary.metrics.fulfilled, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn silent_robot_is_evicted_and_request_requeued() {
        let (dispatcher, mut commands) = dispatcher(DispatchConfig::default());
        let (runtime, handle) = FleetRuntime::new(dispatcher);
        let task = tokio::spawn(runtime.run());

        handle.report_location(RobotName::from("R1"), NodeId(0), None).await.unwrap();
        handle.submit_request(NodeId(2), NodeId(4)).await.unwrap();
        assert_eq!(next_command(&mut commands).await.target, NodeId(2));

        // Sweeps run at 60 s (exactly at the threshold, kept) and 120 s.
        tokio::time::sleep(Duration::from_secs(125)).await;
        let metrics = handle.metrics().await.unwrap();
        assert_eq!(metrics.fleet_size, 0);
        assert_eq!(metrics.pending, 1);

        // A fresh robot picks up the recovered request.
        handle.report_location(RobotName::from("R2"), NodeId(3), None).await.unwrap();
        let cmd = next_command(&mut commands).await;
        assert_eq!(cmd.robot, RobotName::from("R2"));
        assert_eq!(cmd.target, NodeId(2));

        handle.shutdown().await.unwrap();
        let summary = task.await.unwrap().unwrap();
        assert_eq!(summary.evictions, 1);
        assert!(summary.sweeps >= 2);
        // Without a location source the runtime runs degraded.
        assert!(summary.degraded);
    }

    #[tokio::test(start_paused = true)]
    async fn unavailable_location_source_is_not_fatal() {
        let (dispatcher, _commands) = dispatcher(DispatchConfig::default());
        let (runtime, handle) = FleetRuntime::new(dispatcher);
        let task = tokio::spawn(runtime.with_location_source(Unavailable).run());

        let id = handle.submit_request(NodeId(0), NodeId(1)).await.unwrap();
        assert_eq!(id.0, 0);
        assert_eq!(handle.metrics().await.unwrap().pending, 1);

        handle.shutdown().await.unwrap();
        assert!(task.await.unwrap().unwrap().degraded);
    }

    #[tokio::test(start_paused = true)]
    async fn rejected_request_reaches_the_caller() {
        let (dispatcher, _commands) = dispatcher(DispatchConfig::default());
        let (runtime, handle) = FleetRuntime::new(dispatcher);
        let task = tokio::spawn(runtime.run());

        let err = handle.submit_request(NodeId(0), NodeId(77)).await.unwrap_err();
        assert!(matches!(
            err,
            RuntimeError::Dispatch(DispatchError::UnknownNode { role: "target", .. })
        ));

        handle.shutdown().await.unwrap();
        let summary = task.await.unwrap().unwrap();
        assert_eq!(summary.requests_rejected, 1);
        assert_eq!(summary.requests_accepted, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn loop_ends_when_every_sender_is_gone() {
        let (dispatcher, _commands) = dispatcher(DispatchConfig::default());
        let (requests_tx, requests) = ChannelRequestSource::channel(4);
        let (runtime, handle) = FleetRuntime::new(dispatcher);
        let task = tokio::spawn(runtime.with_request_source(requests).run());

        requests_tx.send(CustomerRequest { start: NodeId(1), target: NodeId(2) }).await.unwrap();
        requests_tx.send(CustomerRequest { start: NodeId(9), target: NodeId(2) }).await.unwrap();
        drop(requests_tx);
        drop(handle);

        let summary = task.await.unwrap().unwrap();
        assert_eq!(summary.requests_accepted, 1);
        assert_eq!(summary.requests_rejected, 1);
        assert_eq!(summary.metrics.pending, 1);
    }

    #[tokio::test]
    async fn stopped_runtime_reports_closed() {
        let (dispatcher, _commands) = dispatcher(DispatchConfig::default());
        let (runtime, handle) = FleetRuntime::new(dispatcher);
        drop(runtime);
        assert!(matches!(handle.metrics().await, Err(RuntimeError::Closed)));
    }
}

// ── Logging ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod logging {
    #[test]
    fn env_filter_builds_without_rust_log() {
        // Installing a global subscriber is left to the binary.
        let filter = crate::logging::env_filter();
        assert!(!filter.to_string().is_empty());
    }
}
