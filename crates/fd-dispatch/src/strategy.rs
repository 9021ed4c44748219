//! Assignment strategies.
//!
//! The engine asks a strategy which idle robot should take a request.  The
//! strategy only chooses; the engine performs the assignment and emits the
//! commands.  Which strategy runs is a configuration choice
//! ([`StrategyKind`]), resolved once by [`strategy_for`].

use rustc_hash::FxHashMap;

use fd_core::{NodeId, RobotName, StrategyKind};
use fd_fleet::{IdleRobot, Request};
use fd_spatial::{RoadGraph, nearest_matching};

/// Outcome of one selection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selection {
    /// Assign the request to this robot.
    Robot(RobotName),
    /// Idle robots exist, but none is reachable from the pickup node.
    Unreachable,
    /// The strategy does not assign requests at all.
    Declined,
}

pub trait AssignmentStrategy: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Choose a robot for `request` among `idle` (non-empty, in name order).
    fn select(&self, graph: &dyn RoadGraph, request: &Request, idle: &[IdleRobot]) -> Selection;
}

// ── ClosestIdleRobot ──────────────────────────────────────────────────────────

/// Picks the idle robot with the fewest hops from the pickup node.
///
/// The search runs from the pickup node along outgoing edges and stops at the
/// first BFS level holding an idle robot.  Several robots at that level
/// (including several parked on one node) are tie-broken by lowest name.
/// Robots that have not reported a location yet are never chosen.
#[derive(Copy, Clone, Debug, Default)]
pub struct ClosestIdleRobot;

impl AssignmentStrategy for ClosestIdleRobot {
    fn name(&self) -> &'static str {
        "closest_idle_robot"
    }

    fn select(&self, graph: &dyn RoadGraph, request: &Request, idle: &[IdleRobot]) -> Selection {
        let mut by_node: FxHashMap<NodeId, Vec<&RobotName>> = FxHashMap::default();
        for robot in idle {
            if let Some(node) = robot.location {
                by_node.entry(node).or_default().push(&robot.name);
            }
        }

        let Some(hit) = nearest_matching(graph, request.start, |n| by_node.contains_key(&n)) else {
            return Selection::Unreachable;
        };

        hit.nodes
            .iter()
            .filter_map(|n| by_node.get(n))
            .flatten()
            .min()
            .map(|&name| Selection::Robot(name.clone()))
            .unwrap_or(Selection::Unreachable)
    }
}

// ── Deactivated ───────────────────────────────────────────────────────────────

/// Never assigns anything; requests accumulate in the queue.
#[derive(Copy, Clone, Debug, Default)]
pub struct Deactivated;

impl AssignmentStrategy for Deactivated {
    fn name(&self) -> &'static str {
        "deactivated"
    }

    fn select(&self, _graph: &dyn RoadGraph, _request: &Request, _idle: &[IdleRobot]) -> Selection {
        Selection::Declined
    }
}

/// Build the strategy named by `kind`.
pub fn strategy_for(kind: StrategyKind) -> Box<dyn AssignmentStrategy> {
    match kind {
        StrategyKind::ClosestIdleRobot => Box::new(ClosestIdleRobot),
        StrategyKind::Deactivated      => Box::new(Deactivated),
    }
}
