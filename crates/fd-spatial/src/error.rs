//! Spatial-subsystem error type.

use thiserror::Error;

use fd_core::NodeId;

/// Errors produced by `fd-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("edge {from} -> {to} references a node that was never added")]
    DanglingEdge { from: NodeId, to: NodeId },
}

pub type SpatialResult<T> = Result<T, SpatialError>;
