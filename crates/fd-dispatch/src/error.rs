use fd_core::{FdError, NodeId, RequestId, RobotName};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("{role} node {node} is not in the road graph")]
    UnknownNode {
        node: NodeId,
        role: &'static str,
    },

    /// The strategy picked a robot that is not registered.
    #[error("assignment strategy selected unknown robot {0}")]
    UnknownRobot(RobotName),

    /// The strategy picked a robot that already holds a request.  The
    /// request has been put back at the front of the queue.
    #[error("robot {robot} already holds a request; {request} stays queued")]
    RobotBusy {
        robot:   RobotName,
        request: RequestId,
    },

    #[error("dispatcher configuration error: {0}")]
    Config(#[from] FdError),
}

pub type DispatchResult<T> = Result<T, DispatchError>;
