//! Customer transport requests.

use std::time::Duration;

use fd_core::{NodeId, RequestId, Timestamp};

/// A request to carry a customer from `start` to `target`.
///
/// Not `Clone`: a request is moved between its owners (queue,
/// robot, fulfilled list), never copied.
#[derive(Debug, PartialEq, Eq)]
pub struct Request {
    pub id: RequestId,

    /// Pickup node.
    pub start: NodeId,

    /// Drop-off node.
    pub target: NodeId,

    pub registered_at: Timestamp,

    /// Set when the assigned robot reports at `start`.
    pub picked_up_at: Option<Timestamp>,

    /// Set when the assigned robot reports at `target` with the customer.
    pub dropped_off_at: Option<Timestamp>,
}

impl Request {
    pub fn new(id: RequestId, start: NodeId, target: NodeId, registered_at: Timestamp) -> Self {
        Self {
            id,
            start,
            target,
            registered_at,
            picked_up_at:   None,
            dropped_off_at: None,
        }
    }

    /// `true` once both pickup and drop-off have been recorded.
    #[inline]
    pub fn is_fulfilled(&self) -> bool {
        self.picked_up_at.is_some() && self.dropped_off_at.is_some()
    }

    /// Registration → pickup.
    pub fn wait_time(&self) -> Option<Duration> {
        self.picked_up_at.map(|p| p.since(self.registered_at))
    }

    /// Pickup → drop-off.
    pub fn ride_time(&self) -> Option<Duration> {
        match (self.picked_up_at, self.dropped_off_at) {
            (Some(p), Some(d)) => Some(d.since(p)),
            _ => None,
        }
    }
}
