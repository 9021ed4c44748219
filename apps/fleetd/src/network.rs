//! Synthetic road network for the demo.

use fd_core::NodeId;
use fd_spatial::{RoadNetwork, RoadNetworkBuilder, SpatialResult};

/// A `cols × rows` grid of two-way roads.  Node `r * cols + c` sits at column
/// `c`, row `r`.
///
/// ```text
///   0 ─ 1 ─ 2 ─ 3
///   │   │   │   │
///   4 ─ 5 ─ 6 ─ 7
///   │   │   │   │
///   8 ─ 9 ─10 ─11
/// ```
pub fn build_grid(cols: u32, rows: u32) -> SpatialResult<(RoadNetwork, Vec<NodeId>)> {
    let mut b = RoadNetworkBuilder::new();
    let nodes = b.add_nodes((cols * rows) as usize);

    for r in 0..rows {
        for c in 0..cols {
            let here = nodes[(r * cols + c) as usize];
            if c + 1 < cols {
                b.add_road(here, nodes[(r * cols + c + 1) as usize]);
            }
            if r + 1 < rows {
                b.add_road(here, nodes[((r + 1) * cols + c) as usize]);
            }
        }
    }

    Ok((b.build()?, nodes))
}
