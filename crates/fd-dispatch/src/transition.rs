//! Location reports: registration, liveness, and the mission state machine.
//!
//! | State             | Exits to          | When the report is at  |
//! |-------------------|-------------------|------------------------|
//! | Idle              | GoingToCustomer   | (assignment, not here) |
//! | GoingToCustomer   | WithCustomer      | the pickup node        |
//! | WithCustomer      | Idle              | the drop-off node      |

use tracing::{debug, info, warn};

use fd_core::{NodeId, RequestId, RobotName};
use fd_fleet::{LocationUpdate, TaxiState};

use crate::{Dispatcher, DispatchResult, MissionCommand, StatusUpdate};

/// What a location report did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Position and liveness updated; no state change.
    Moved,
    /// The robot reached the pickup node and now carries the customer.
    PickedUp { request: RequestId },
    /// The robot reached the drop-off node and is idle again.
    DroppedOff { request: RequestId },
}

impl Dispatcher {
    /// Apply one location report from `robot`.
    ///
    /// An unknown robot is registered first.  A drop-off, or a newly
    /// registered robot, adds idle capacity and triggers a dispatch pass.
    ///
    /// # Errors
    ///
    /// Only errors from the triggered dispatch pass; the report itself is
    /// always applied.
    pub fn handle_location(
        &mut self,
        robot: &RobotName,
        node:  NodeId,
        next:  Option<NodeId>,
    ) -> DispatchResult<Transition> {
        let now = self.clock.now();
        if !self.graph.contains_node(node) {
            warn!(robot = %robot, %node, "location report names a node outside the road graph");
        }

        let (record, newly_registered) = self.fleet.get_or_register(robot, now);

        let transition = match record.observe_location(node, next, now) {
            LocationUpdate::Moved => {
                debug!(robot = %robot, %node, "location updated");
                Transition::Moved
            }
            LocationUpdate::PickedUp { request, target } => {
                info!(robot = %robot, request = %request, %target, "customer picked up");
                self.emit(MissionCommand {
                    robot: robot.clone(),
                    target,
                    state: TaxiState::WithCustomer,
                });
                Transition::PickedUp { request }
            }
            LocationUpdate::DroppedOff(request) => {
                let id = request.id;
                info!(robot = %robot, request = %id, "customer dropped off");
                self.fulfilled.push(request);
                self.status.publish_status(StatusUpdate {
                    robot: robot.clone(),
                    state: TaxiState::Idle,
                });
                Transition::DroppedOff { request: id }
            }
        };

        if newly_registered || matches!(transition, Transition::DroppedOff { .. }) {
            self.dispatch_pending()?;
        }
        Ok(transition)
    }
}
