//! Events consumed by the runtime loop.

use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;

use fd_core::{NodeId, RequestId, RobotName};
use fd_dispatch::{DispatchMetrics, DispatchResult};

/// A node-level position report from a robot's localization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationReport {
    pub robot: RobotName,
    /// Intersection the robot is at.
    pub node: NodeId,
    /// Intersection the robot expects to reach next, if known.
    #[serde(default)]
    pub next: Option<NodeId>,
}

/// A customer asking to be carried from `start` to `target`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRequest {
    pub start:  NodeId,
    pub target: NodeId,
}

pub enum FleetEvent {
    Location(LocationReport),
    Request {
        request: CustomerRequest,
        /// Receives the assigned id or the rejection.  `None` for requests
        /// from a source, whose failures are only logged.
        reply: Option<oneshot::Sender<DispatchResult<RequestId>>>,
    },
    Metrics(oneshot::Sender<DispatchMetrics>),
    Shutdown,
}
