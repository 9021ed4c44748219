//! Outbound ports: mission commands and status updates.
//!
//! The dispatcher hands fully-formed values to the sinks and never waits on
//! them.  Delivery (and any encoding) is the sink's concern; a sink that
//! cannot deliver logs and drops.

use serde::{Deserialize, Serialize};

use fd_core::{NodeId, RobotName};
use fd_fleet::TaxiState;

/// "Drive to `target`; you are now in `state`."
///
/// Sent on assignment (target = pickup node, `GoingToCustomer`) and on pickup
/// (target = drop-off node, `WithCustomer`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionCommand {
    pub robot:  RobotName,
    pub target: NodeId,
    pub state:  TaxiState,
}

/// Emitted on every state transition of a robot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub robot: RobotName,
    pub state: TaxiState,
}

pub trait CommandSink: Send {
    fn send_command(&mut self, command: MissionCommand);
}

pub trait StatusSink: Send {
    fn publish_status(&mut self, update: StatusUpdate);
}

/// A sink that discards everything.  The builder's default for both ports.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoopSink;

impl CommandSink for NoopSink {
    fn send_command(&mut self, _command: MissionCommand) {}
}

impl StatusSink for NoopSink {
    fn publish_status(&mut self, _update: StatusUpdate) {}
}
