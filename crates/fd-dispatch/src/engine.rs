//! The dispatch pass: match pending requests to idle robots.
//!
//! ```text
//! drain queue
//! for each request, front first:
//!   no idle robot         → stop; this and the rest stay queued
//!   strategy → Robot(r)   → assign, command r to the pickup node
//!   strategy → Unreachable→ log; stays queued
//!   strategy → Declined   → stays queued
//! put everything unmatched back at the front, order unchanged
//! ```
//!
//! The idle set is re-read for every request, so a robot assigned earlier in
//! the pass is never offered again.

use tracing::{info, warn};

use fd_core::RobotName;
use fd_fleet::{FleetError, Request, TaxiState};

use crate::{Dispatcher, DispatchError, DispatchResult, MissionCommand, Selection};

impl Dispatcher {
    /// Run one dispatch pass over the queue.  Returns how many requests were
    /// assigned.
    ///
    /// # Errors
    ///
    /// Only a misbehaving strategy can fail a pass
    /// ([`DispatchError::UnknownRobot`], [`DispatchError::RobotBusy`]).  The
    /// queue is fully restored before the error is returned.
    pub fn dispatch_pending(&mut self) -> DispatchResult<usize> {
        if self.queue.is_empty() {
            return Ok(0);
        }

        let mut pending   = self.queue.drain().into_iter();
        let mut unmatched = Vec::new();
        let mut assigned  = 0;

        while let Some(request) = pending.next() {
            let idle = self.fleet.idle();
            if idle.is_empty() {
                info!(pending = pending.len() + 1, "no idle capacity; requests stay queued");
                unmatched.push(request);
                break;
            }

            match self.strategy.select(self.graph.as_ref(), &request, &idle) {
                Selection::Robot(name) => {
                    if let Err(err) = self.assign(&name, request, &mut unmatched) {
                        unmatched.extend(pending);
                        self.queue.restore_front(unmatched);
                        return Err(err);
                    }
                    assigned += 1;
                }
                Selection::Unreachable => {
                    warn!(
                        request = %request.id,
                        start   = %request.start,
                        idle    = idle.len(),
                        "assignment not found despite idle capacity",
                    );
                    unmatched.push(request);
                }
                Selection::Declined => unmatched.push(request),
            }
        }

        unmatched.extend(pending);
        self.queue.restore_front(unmatched);
        Ok(assigned)
    }

    /// Hand `request` to robot `name` and command it to the pickup node.
    ///
    /// On failure the request is pushed onto `unmatched` so the caller can
    /// restore it.
    fn assign(
        &mut self,
        name:      &RobotName,
        request:   Request,
        unmatched: &mut Vec<Request>,
    ) -> DispatchResult<()> {
        let Some(robot) = self.fleet.get_mut(name.as_str()) else {
            unmatched.push(request);
            return Err(DispatchError::UnknownRobot(name.clone()));
        };

        let (id, start) = (request.id, request.start);
        match robot.assign_customer_request(request) {
            Ok(()) => {}
            Err(FleetError::AlreadyAssigned { robot, request }) => {
                let id = request.id;
                unmatched.push(*request);
                return Err(DispatchError::RobotBusy { robot, request: id });
            }
        }

        info!(robot = %name, request = %id, pickup = %start, "request assigned");
        self.emit(MissionCommand {
            robot:  name.clone(),
            target: start,
            state:  TaxiState::GoingToCustomer,
        });
        Ok(())
    }
}
