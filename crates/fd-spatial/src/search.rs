//! Breadth-first search over a [`RoadGraph`].
//!
//! Hop count is the only distance measure the dispatcher uses: intersections
//! are the unit of location, so "closest" means fewest edges.
//!
//! Both searches keep a visited set and enqueue each node at most once.  Road
//! graphs routinely contain cycles (every two-way road is one), and a search
//! without that guard never terminates once a cycle is reachable.

use std::collections::VecDeque;

use rustc_hash::{FxHashMap, FxHashSet};

use fd_core::NodeId;

use crate::RoadGraph;

/// The shallowest BFS level containing at least one matching node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NearestHit {
    /// Hop distance from the start node.
    pub hops: u32,
    /// Every matching node at that distance, in discovery order.
    pub nodes: Vec<NodeId>,
}

/// Level-by-level BFS from `start` along outgoing edges, stopping at the
/// first level where `matches` holds for some node.
///
/// Returning the whole level (rather than the first match) lets the caller
/// apply its own tie-break among equidistant candidates.
///
/// Returns `None` if `start` is not in the graph or no reachable node
/// matches.
pub fn nearest_matching<F>(graph: &dyn RoadGraph, start: NodeId, mut matches: F) -> Option<NearestHit>
where
    F: FnMut(NodeId) -> bool,
{
    if !graph.contains_node(start) {
        return None;
    }

    let mut visited = FxHashSet::default();
    visited.insert(start);
    let mut frontier = vec![start];
    let mut hops = 0u32;

    while !frontier.is_empty() {
        let hits: Vec<NodeId> = frontier.iter().copied().filter(|&n| matches(n)).collect();
        if !hits.is_empty() {
            return Some(NearestHit { hops, nodes: hits });
        }

        let mut next = Vec::new();
        for &node in &frontier {
            for edge in graph.outgoing_edges(node) {
                if visited.insert(edge.target) {
                    next.push(edge.target);
                }
            }
        }
        frontier = next;
        hops += 1;
    }

    None
}

/// Fewest-hop path from `from` to `to`, inclusive of both endpoints.
///
/// `from == to` yields a single-node path.  Returns `None` if either node is
/// missing or `to` is unreachable.
pub fn shortest_path(graph: &dyn RoadGraph, from: NodeId, to: NodeId) -> Option<Vec<NodeId>> {
    if !graph.contains_node(from) || !graph.contains_node(to) {
        return None;
    }
    if from == to {
        return Some(vec![from]);
    }

    // parent[v] = node from which v was first discovered.
    let mut parent: FxHashMap<NodeId, NodeId> = FxHashMap::default();
    let mut queue = VecDeque::from([from]);

    while let Some(node) = queue.pop_front() {
        for edge in graph.outgoing_edges(node) {
            let next = edge.target;
            if next == from || parent.contains_key(&next) {
                continue;
            }
            parent.insert(next, node);
            if next == to {
                return Some(reconstruct(&parent, from, to));
            }
            queue.push_back(next);
        }
    }

    None
}

fn reconstruct(parent: &FxHashMap<NodeId, NodeId>, from: NodeId, to: NodeId) -> Vec<NodeId> {
    let mut path = vec![to];
    let mut cur = to;
    while cur != from {
        match parent.get(&cur) {
            Some(&prev) => {
                path.push(prev);
                cur = prev;
            }
            None => break,
        }
    }
    path.reverse();
    path
}
