//! Road network representation and builder.
//!
//! # Data layout
//!
//! The graph uses **Compressed Sparse Row (CSR)** format for outgoing edges.
//! Given a `NodeId n`, its outgoing edges occupy the slice:
//!
//! ```text
//! edge_to[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! Edges are sorted by source node with a **stable** sort, so a node's
//! outgoing edges are iterated in the order they were added.  Breadth-first
//! search relies on that for reproducible discovery order.

use fd_core::{EdgeId, NodeId};

use crate::{Edge, RoadGraph, SpatialError, SpatialResult};

// ── RoadNetwork ───────────────────────────────────────────────────────────────

/// Directed road graph in CSR format.
///
/// Do not construct directly; use [`RoadNetworkBuilder`].
pub struct RoadNetwork {
    /// CSR row pointer.  Outgoing edges of node `n` are at EdgeIds
    /// `node_out_start[n] .. node_out_start[n+1]`.
    /// Length = `node_count + 1`.
    pub node_out_start: Vec<u32>,

    /// Destination node of each edge, indexed by `EdgeId`.
    pub edge_to: Vec<NodeId>,
}

impl RoadNetwork {
    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_out_start.len() - 1
    }

    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_count() == 0
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Iterator over the `EdgeId`s of all outgoing edges from `node`.
    ///
    /// Empty for nodes outside the network.
    #[inline]
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        let (start, end) = if node.index() < self.node_count() {
            (
                self.node_out_start[node.index()] as usize,
                self.node_out_start[node.index() + 1] as usize,
            )
        } else {
            (0, 0)
        };
        (start..end).map(|i| EdgeId(i as u32))
    }

    /// Out-degree of `node` (number of outgoing edges).
    #[inline]
    pub fn out_degree(&self, node: NodeId) -> usize {
        self.out_edges(node).count()
    }
}

impl RoadGraph for RoadNetwork {
    fn contains_node(&self, node: NodeId) -> bool {
        node.index() < self.node_count()
    }

    fn outgoing_edges(&self, node: NodeId) -> Box<dyn Iterator<Item = Edge> + '_> {
        Box::new(self.out_edges(node).map(|id| Edge { id, target: self.edge_to[id.index()] }))
    }

    fn node_count(&self) -> usize {
        RoadNetwork::node_count(self)
    }
}

// ── RoadNetworkBuilder ────────────────────────────────────────────────────────

/// Construct a [`RoadNetwork`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use fd_spatial::RoadNetworkBuilder;
///
/// let mut b = RoadNetworkBuilder::new();
/// let a = b.add_node();
/// let c = b.add_node();
/// b.add_road(a, c);
/// let net = b.build().unwrap();
/// assert_eq!(net.node_count(), 2);
/// assert_eq!(net.edge_count(), 2); // bidirectional
/// ```
#[derive(Default)]
pub struct RoadNetworkBuilder {
    nodes:     u32,
    raw_edges: Vec<(NodeId, NodeId)>,
}

impl RoadNetworkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an intersection and return its `NodeId` (sequential from 0).
    pub fn add_node(&mut self) -> NodeId {
        let id = NodeId(self.nodes);
        self.nodes += 1;
        id
    }

    /// Add `n` intersections at once.
    pub fn add_nodes(&mut self, n: usize) -> Vec<NodeId> {
        (0..n).map(|_| self.add_node()).collect()
    }

    /// Add a **directed** edge from `from` to `to`.
    pub fn add_directed_edge(&mut self, from: NodeId, to: NodeId) {
        self.raw_edges.push((from, to));
    }

    /// Convenience: add edges in **both directions**.
    pub fn add_road(&mut self, a: NodeId, b: NodeId) {
        self.add_directed_edge(a, b);
        self.add_directed_edge(b, a);
    }

    pub fn node_count(&self) -> usize { self.nodes as usize }
    pub fn edge_count(&self) -> usize { self.raw_edges.len() }

    /// Consume the builder and produce a [`RoadNetwork`].
    ///
    /// Fails if an edge names a node that was never added.
    pub fn build(self) -> SpatialResult<RoadNetwork> {
        let node_count = self.nodes as usize;

        if let Some(&(from, to)) = self
            .raw_edges
            .iter()
            .find(|(from, to)| from.index() >= node_count || to.index() >= node_count)
        {
            return Err(SpatialError::DanglingEdge { from, to });
        }

        // Stable: keeps per-node insertion order.
        let mut raw = self.raw_edges;
        raw.sort_by_key(|(from, _)| from.0);

        let edge_to: Vec<NodeId> = raw.iter().map(|&(_, to)| to).collect();

        let mut node_out_start = vec![0u32; node_count + 1];
        for (from, _) in &raw {
            node_out_start[from.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, raw.len());

        Ok(RoadNetwork { node_out_start, edge_to })
    }
}
