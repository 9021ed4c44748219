//! Per-robot record and its mission state machine.

use fd_core::{NodeId, RequestId, RobotName, Timestamp};

use crate::{FleetError, FleetResult, Request, TaxiState};

/// The robot's state and its active request as one value.
///
/// Keeping them together makes `Idle ⇔ no request` true by construction.
#[derive(Debug)]
enum Duty {
    Idle,
    GoingToCustomer(Request),
    WithCustomer(Request),
}

/// What a location report did to the robot's mission.
#[derive(Debug, PartialEq, Eq)]
pub enum LocationUpdate {
    /// Position updated; no state change.
    Moved,
    /// Reached the pickup node.  The robot now heads for `target`.
    PickedUp { request: RequestId, target: NodeId },
    /// Reached the drop-off node.  The completed request is handed back to
    /// the caller and the robot is idle again.
    DroppedOff(Request),
}

/// Everything the dispatcher knows about one robot.
#[derive(Debug)]
pub struct RobotRecord {
    name: RobotName,
    duty: Duty,

    /// Node of the most recent location report.  `None` until the first one.
    pub last_known_location: Option<NodeId>,

    /// Node the robot expects to reach next, as reported by localization.
    pub next_expected_location: Option<NodeId>,

    /// Time of the last report (or of registration, before any report).
    pub last_seen_at: Timestamp,
}

impl RobotRecord {
    /// A new idle robot with no known location.
    pub fn new(name: RobotName, now: Timestamp) -> Self {
        Self {
            name,
            duty:                   Duty::Idle,
            last_known_location:    None,
            next_expected_location: None,
            last_seen_at:           now,
        }
    }

    pub fn name(&self) -> &RobotName {
        &self.name
    }

    pub fn state(&self) -> TaxiState {
        match self.duty {
            Duty::Idle               => TaxiState::Idle,
            Duty::GoingToCustomer(_) => TaxiState::GoingToCustomer,
            Duty::WithCustomer(_)    => TaxiState::WithCustomer,
        }
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        matches!(self.duty, Duty::Idle)
    }

    pub fn active_request(&self) -> Option<&Request> {
        match &self.duty {
            Duty::Idle => None,
            Duty::GoingToCustomer(r) | Duty::WithCustomer(r) => Some(r),
        }
    }

    /// Target node of the current mission: the pickup node on the way to the
    /// customer, the drop-off node while carrying them, `None` when idle.
    pub fn target_location(&self) -> Option<NodeId> {
        match &self.duty {
            Duty::Idle               => None,
            Duty::GoingToCustomer(r) => Some(r.start),
            Duty::WithCustomer(r)    => Some(r.target),
        }
    }

    /// Take ownership of `request` and start driving to the customer.
    ///
    /// # Errors
    ///
    /// [`FleetError::AlreadyAssigned`] if the robot already holds a request.
    /// The rejected request travels back inside the error; the record is
    /// left untouched.
    pub fn assign_customer_request(&mut self, request: Request) -> FleetResult<()> {
        if !self.is_idle() {
            return Err(FleetError::AlreadyAssigned {
                robot:   self.name.clone(),
                request: Box::new(request),
            });
        }
        self.duty = Duty::GoingToCustomer(request);
        Ok(())
    }

    /// Give up the active request (if any) and become idle.
    pub fn pop_customer_request(&mut self) -> Option<Request> {
        match std::mem::replace(&mut self.duty, Duty::Idle) {
            Duty::Idle => None,
            Duty::GoingToCustomer(r) | Duty::WithCustomer(r) => Some(r),
        }
    }

    /// Record a location report and advance the mission if the robot reached
    /// its current boundary node.
    ///
    /// Position and liveness are updated unconditionally.  Only the node that
    /// matches the *current* state counts: reaching the drop-off node before
    /// the pickup is a plain move.
    pub fn observe_location(
        &mut self,
        reported: NodeId,
        next:     Option<NodeId>,
        now:      Timestamp,
    ) -> LocationUpdate {
        self.last_known_location    = Some(reported);
        self.next_expected_location = next;
        self.last_seen_at           = now;

        match std::mem::replace(&mut self.duty, Duty::Idle) {
            Duty::Idle => LocationUpdate::Moved,
            Duty::GoingToCustomer(mut request) if request.start == reported => {
                request.picked_up_at = Some(now);
                let update = LocationUpdate::PickedUp { request: request.id, target: request.target };
                self.duty = Duty::WithCustomer(request);
                update
            }
            Duty::WithCustomer(mut request) if request.target == reported => {
                request.dropped_off_at = Some(now);
                LocationUpdate::DroppedOff(request)
            }
            other => {
                self.duty = other;
                LocationUpdate::Moved
            }
        }
    }
}
