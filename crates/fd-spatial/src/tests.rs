//! Unit tests for fd-spatial.
//!
//! All tests use hand-built networks.

#[cfg(test)]
mod helpers {
    use fd_core::NodeId;
    use crate::{RoadNetwork, RoadNetworkBuilder};

    /// Small two-way grid:
    ///
    /// ```text
    ///   0 ─ 1 ─ 2
    ///   │       │
    ///   3 ───── 4
    /// ```
    pub fn grid_network() -> (RoadNetwork, [NodeId; 5]) {
        let mut b = RoadNetworkBuilder::new();
        let n0 = b.add_node();
        let n1 = b.add_node();
        let n2 = b.add_node();
        let n3 = b.add_node();
        let n4 = b.add_node();
        b.add_road(n0, n1);
        b.add_road(n1, n2);
        b.add_road(n2, n4);
        b.add_road(n0, n3);
        b.add_road(n3, n4);
        (b.build().unwrap(), [n0, n1, n2, n3, n4])
    }

    /// One-way ring 0 → 1 → 2 → 0 with a spur 2 → 3.
    pub fn one_way_ring() -> (RoadNetwork, [NodeId; 4]) {
        let mut b = RoadNetworkBuilder::new();
        let n = b.add_nodes(4);
        b.add_directed_edge(n[0], n[1]);
        b.add_directed_edge(n[1], n[2]);
        b.add_directed_edge(n[2], n[0]);
        b.add_directed_edge(n[2], n[3]);
        (b.build().unwrap(), [n[0], n[1], n[2], n[3]])
    }
}

// ── Builder & network structure ────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use fd_core::NodeId;
    use crate::{RoadGraph, RoadNetworkBuilder, SpatialError};

    #[test]
    fn empty_build() {
        let net = RoadNetworkBuilder::new().build().unwrap();
        assert_eq!(net.node_count(), 0);
        assert_eq!(net.edge_count(), 0);
        assert!(net.is_empty());
    }

    #[test]
    fn csr_out_degrees() {
        let (net, [n0, n1, n2, n3, n4]) = super::helpers::grid_network();
        assert_eq!(net.out_degree(n0), 2);
        assert_eq!(net.out_degree(n1), 2);
        assert_eq!(net.out_degree(n2), 2);
        assert_eq!(net.out_degree(n3), 2);
        assert_eq!(net.out_degree(n4), 2);
        let targets: Vec<NodeId> = net.outgoing_edges(n0).map(|e| e.target).collect();
        assert_eq!(targets, vec![n1, n3]);
        // Edge ids handed out by the graph port index the CSR target column.
        for e in net.outgoing_edges(n2) {
            assert_eq!(net.edge_to[e.id.index()], e.target);
        }
    }

    #[test]
    fn edges_keep_insertion_order_per_node() {
        let mut b = RoadNetworkBuilder::new();
        let n = b.add_nodes(4);
        b.add_directed_edge(n[0], n[3]);
        b.add_directed_edge(n[1], n[0]);
        b.add_directed_edge(n[0], n[1]);
        b.add_directed_edge(n[0], n[2]);
        let net = b.build().unwrap();
        let targets: Vec<NodeId> = net.outgoing_edges(n[0]).map(|e| e.target).collect();
        assert_eq!(targets, vec![n[3], n[1], n[2]]);
    }

    #[test]
    fn dangling_edge_is_rejected() {
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_node();
        b.add_directed_edge(a, NodeId(9));
        assert!(matches!(b.build(), Err(SpatialError::DanglingEdge { .. })));
    }

    #[test]
    fn unknown_node_has_no_edges() {
        let (net, _) = super::helpers::grid_network();
        assert!(!net.contains_node(NodeId(5)));
        assert_eq!(net.outgoing_edges(NodeId(5)).count(), 0);
        assert_eq!(net.out_degree(NodeId::INVALID), 0);
    }
}

// ── Nearest-match BFS ─────────────────────────────────────────────────────────

#[cfg(test)]
mod nearest {
    use fd_core::NodeId;
    use crate::nearest_matching;

    #[test]
    fn start_node_matches_at_zero_hops() {
        let (net, [n0, ..]) = super::helpers::grid_network();
        let hit = nearest_matching(&net, n0, |n| n == n0).unwrap();
        assert_eq!(hit.hops, 0);
        assert_eq!(hit.nodes, vec![n0]);
    }

    #[test]
    fn prefers_fewest_hops() {
        let (net, [n0, _, n2, n3, _]) = super::helpers::grid_network();
        // n3 is one hop from n0, n2 is two.
        let hit = nearest_matching(&net, n0, |n| n == n2 || n == n3).unwrap();
        assert_eq!(hit.hops, 1);
        assert_eq!(hit.nodes, vec![n3]);
    }

    #[test]
    fn returns_whole_level_on_ties() {
        let (net, [n0, n1, _, n3, _]) = super::helpers::grid_network();
        let hit = nearest_matching(&net, n0, |n| n == n1 || n == n3).unwrap();
        assert_eq!(hit.hops, 1);
        assert_eq!(hit.nodes, vec![n1, n3]);
    }

    #[test]
    fn terminates_on_cycle_without_match() {
        let (net, [n0, ..]) = super::helpers::one_way_ring();
        let mut probes = 0;
        let hit = nearest_matching(&net, n0, |_| {
            probes += 1;
            false
        });
        assert!(hit.is_none());
        // Each of the 4 reachable nodes is examined exactly once.
        assert_eq!(probes, 4);
    }

    #[test]
    fn follows_edge_direction() {
        let (net, [_, n1, _, n3]) = super::helpers::one_way_ring();
        // n1 is not reachable from n3 (spur is one-way out of the ring).
        assert!(nearest_matching(&net, n3, |n| n == n1).is_none());
        let hit = nearest_matching(&net, n1, |n| n == n3).unwrap();
        assert_eq!(hit.hops, 2);
    }

    #[test]
    fn unknown_start_finds_nothing() {
        let (net, _) = super::helpers::grid_network();
        assert!(nearest_matching(&net, NodeId(99), |_| true).is_none());
    }
}

// ── Shortest path ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod path {
    use fd_core::NodeId;
    use crate::shortest_path;

    #[test]
    fn trivial_path() {
        let (net, [n0, ..]) = super::helpers::grid_network();
        assert_eq!(shortest_path(&net, n0, n0), Some(vec![n0]));
    }

    #[test]
    fn fewest_hops_path() {
        let (net, [n0, _, _, n3, n4]) = super::helpers::grid_network();
        assert_eq!(shortest_path(&net, n0, n4), Some(vec![n0, n3, n4]));
    }

    #[test]
    fn path_around_one_way_ring() {
        let (net, [n0, n1, n2, _]) = super::helpers::one_way_ring();
        assert_eq!(shortest_path(&net, n1, n0), Some(vec![n1, n2, n0]));
    }

    #[test]
    fn unreachable_or_missing() {
        let (net, [n0, _, _, n3]) = super::helpers::one_way_ring();
        assert_eq!(shortest_path(&net, n3, n0), None);
        assert_eq!(shortest_path(&net, n0, NodeId(42)), None);
    }
}
