//! `FleetRegistry` — the set of known robots.
//!
//! Records live in a `BTreeMap` keyed by name, so every scan (idle listing,
//! timeout sweep) visits robots in name order and results are reproducible.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::time::Duration;

use tracing::{debug, info, warn};

use fd_core::{NodeId, RobotName, Timestamp};

use crate::{Request, RequestQueue, RobotRecord};

/// Snapshot of an idle robot taken for one assignment decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdleRobot {
    pub name:     RobotName,
    pub location: Option<NodeId>,
}

#[derive(Debug, Default)]
pub struct FleetRegistry {
    robots: BTreeMap<RobotName, RobotRecord>,
}

impl FleetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name`, or return the existing record unchanged.
    ///
    /// A duplicate registration is logged and otherwise ignored.
    pub fn register(&mut self, name: RobotName, now: Timestamp) -> &mut RobotRecord {
        match self.robots.entry(name) {
            Entry::Occupied(entry) => {
                warn!(robot = %entry.key(), "robot already registered; keeping existing record");
                entry.into_mut()
            }
            Entry::Vacant(entry) => {
                info!(robot = %entry.key(), "registered new robot");
                let record = RobotRecord::new(entry.key().clone(), now);
                entry.insert(record)
            }
        }
    }

    /// The record for `name`, registering it silently if unknown.  The flag
    /// is `true` when the record was just created.
    pub fn get_or_register(&mut self, name: &RobotName, now: Timestamp) -> (&mut RobotRecord, bool) {
        match self.robots.entry(name.clone()) {
            Entry::Occupied(entry) => (entry.into_mut(), false),
            Entry::Vacant(entry) => {
                info!(robot = %name, "registered new robot");
                (entry.insert(RobotRecord::new(name.clone(), now)), true)
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&RobotRecord> {
        self.robots.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut RobotRecord> {
        self.robots.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.robots.contains_key(name)
    }

    /// Every idle robot, in name order, collected eagerly.
    pub fn idle(&self) -> Vec<IdleRobot> {
        self.robots
            .values()
            .filter(|r| r.is_idle())
            .map(|r| IdleRobot { name: r.name().clone(), location: r.last_known_location })
            .collect()
    }

    /// Remove `name` from the fleet.
    ///
    /// An in-flight request is handed back to `queue` with priority before
    /// the record is dropped.  Unknown names are logged and ignored.
    pub fn unregister(&mut self, name: &str, queue: &mut RequestQueue) -> Option<RobotRecord> {
        let Some(mut record) = self.robots.remove(name) else {
            warn!(robot = name, "cannot unregister unknown robot");
            return None;
        };
        if let Some(request) = record.pop_customer_request() {
            info!(robot = name, request = %request.id, "requeued request from unregistered robot");
            queue.requeue_with_priority(request);
        }
        debug!(robot = name, "unregistered robot");
        Some(record)
    }

    /// Unregister every robot silent for longer than `threshold` at `now`.
    ///
    /// Returns the evicted names in name order.  Recovered requests go back
    /// to the front of `queue` oldest first, ahead of anything already
    /// waiting.
    pub fn sweep_timed_out(
        &mut self,
        threshold: Duration,
        now:       Timestamp,
        queue:     &mut RequestQueue,
    ) -> Vec<RobotName> {
        let expired: Vec<RobotName> = self
            .robots
            .values()
            .filter(|r| now.since(r.last_seen_at) > threshold)
            .map(|r| r.name().clone())
            .collect();

        let mut recovered: Vec<Request> = Vec::new();
        for name in &expired {
            let Some(mut record) = self.robots.remove(name.as_str()) else { continue };
            if let Some(request) = record.pop_customer_request() {
                info!(robot = %name, request = %request.id, "requeued request from unregistered robot");
                recovered.push(request);
            }
            debug!(robot = %name, "unregistered robot");
        }

        recovered.sort_by_key(|r| (r.registered_at, r.id));
        queue.restore_front(recovered);
        expired
    }

    pub fn iter(&self) -> impl Iterator<Item = &RobotRecord> + '_ {
        self.robots.values()
    }

    pub fn len(&self) -> usize {
        self.robots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.robots.is_empty()
    }
}
