use fd_core::RobotName;
use thiserror::Error;

use crate::Request;

#[derive(Debug, Error)]
pub enum FleetError {
    /// Assignment to a robot that already holds a request.  Carries the
    /// rejected request so the caller can put it back.
    #[error("robot {robot} already holds a request; refusing to assign {}", .request.id)]
    AlreadyAssigned {
        robot:   RobotName,
        request: Box<Request>,
    },
}

pub type FleetResult<T> = Result<T, FleetError>;
