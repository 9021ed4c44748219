//! The `RoadGraph` port.

use fd_core::{EdgeId, NodeId};

/// A directed edge as seen from its source node.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Edge {
    pub id:     EdgeId,
    pub target: NodeId,
}

/// Read-only view of a directed road graph whose nodes are intersections.
///
/// The trait is object-safe so assignment strategies can take
/// `&dyn RoadGraph` regardless of how the application stores its map.
/// No acyclicity is assumed: searches over a `RoadGraph` must track the nodes
/// they have visited.
///
/// Implementations must be `Send + Sync` so a dispatcher owning one can move
/// into the runtime task.
pub trait RoadGraph: Send + Sync {
    /// Node lookup by id: `true` if `node` exists in this graph.
    fn contains_node(&self, node: NodeId) -> bool;

    /// Outgoing edges of `node`, in a stable order.  Empty for unknown nodes.
    fn outgoing_edges(&self, node: NodeId) -> Box<dyn Iterator<Item = Edge> + '_>;

    /// Number of nodes in the graph.
    fn node_count(&self) -> usize;
}
