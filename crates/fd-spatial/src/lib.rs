//! `fd-spatial` — road graph, CSR network, and graph search.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`graph`]   | `RoadGraph` port, `Edge`                                    |
//! | [`network`] | `RoadNetwork` (CSR), `RoadNetworkBuilder`                   |
//! | [`search`]  | `nearest_matching`, `shortest_path` (breadth-first)         |
//! | [`error`]   | `SpatialError`, `SpatialResult<T>`                          |
//!
//! The dispatcher only ever sees the graph through [`RoadGraph`]; building
//! one from map data is the application's job.  [`RoadNetwork`] is the
//! in-tree implementation used by tests and the demo.

pub mod error;
pub mod graph;
pub mod network;
pub mod search;

#[cfg(test)]
mod tests;

pub use error::{SpatialError, SpatialResult};
pub use graph::{Edge, RoadGraph};
pub use network::{RoadNetwork, RoadNetworkBuilder};
pub use search::{NearestHit, nearest_matching, shortest_path};
