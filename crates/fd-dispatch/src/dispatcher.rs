//! The `Dispatcher` struct and its request intake.

use std::sync::Arc;

use tracing::info;

use fd_core::{Clock, DispatchConfig, NodeId, RequestId, Timestamp};
use fd_fleet::{FleetRegistry, Request, RequestQueue};
use fd_spatial::RoadGraph;

use crate::{
    AssignmentStrategy, CommandSink, DispatchError, DispatchMetrics, DispatchResult, MissionCommand,
    StatusSink, StatusUpdate,
};

/// Owns the fleet, the pending queue, and every port the handlers talk to.
///
/// Construct with [`DispatcherBuilder`][crate::DispatcherBuilder].  The event
/// handlers live in [`engine`][crate::engine], [`transition`][crate::transition]
/// and [`supervisor`][crate::supervisor].
pub struct Dispatcher {
    pub(crate) config:       DispatchConfig,
    pub(crate) graph:        Arc<dyn RoadGraph>,
    pub(crate) clock:        Arc<dyn Clock>,
    pub(crate) strategy:     Box<dyn AssignmentStrategy>,
    pub(crate) commands:     Box<dyn CommandSink>,
    pub(crate) status:       Box<dyn StatusSink>,
    pub(crate) fleet:        FleetRegistry,
    pub(crate) queue:        RequestQueue,
    pub(crate) fulfilled:    Vec<Request>,
    pub(crate) next_request: u64,
}

impl Dispatcher {
    /// Queue a transport request from `start` to `target` and run a dispatch
    /// pass.
    ///
    /// # Errors
    ///
    /// [`DispatchError::UnknownNode`] if either node is missing from the road
    /// graph; nothing is queued in that case.  Errors from the dispatch pass
    /// are passed through; the new request is queued regardless.
    pub fn submit_request(&mut self, start: NodeId, target: NodeId) -> DispatchResult<RequestId> {
        if !self.graph.contains_node(start) {
            return Err(DispatchError::UnknownNode { node: start, role: "start" });
        }
        if !self.graph.contains_node(target) {
            return Err(DispatchError::UnknownNode { node: target, role: "target" });
        }

        let id = RequestId(self.next_request);
        self.next_request += 1;
        let now = self.clock.now();
        info!(request = %id, %start, %target, "customer request queued");
        self.queue.enqueue(Request::new(id, start, target, now));

        self.dispatch_pending()?;
        Ok(id)
    }

    // ── Port helpers ──────────────────────────────────────────────────────

    pub(crate) fn emit(&mut self, command: MissionCommand) {
        self.status.publish_status(StatusUpdate {
            robot: command.robot.clone(),
            state: command.state,
        });
        self.commands.send_command(command);
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    pub fn graph(&self) -> &dyn RoadGraph {
        self.graph.as_ref()
    }

    pub fn fleet(&self) -> &FleetRegistry {
        &self.fleet
    }

    pub fn queue(&self) -> &RequestQueue {
        &self.queue
    }

    /// Dropped-off requests, in completion order.
    pub fn fulfilled(&self) -> &[Request] {
        &self.fulfilled
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    /// Summary of completed work and current load.
    pub fn metrics(&self) -> DispatchMetrics {
        DispatchMetrics::collect(&self.fulfilled, &self.fleet, &self.queue)
    }
}
