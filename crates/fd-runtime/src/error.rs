use fd_dispatch::DispatchError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The event loop has stopped; nothing can be delivered to it.
    #[error("fleet runtime is not running")]
    Closed,

    #[error("cannot subscribe to {port}: {reason}")]
    Subscribe {
        port:   &'static str,
        reason: String,
    },

    #[error("dispatcher rejected the event: {0}")]
    Dispatch(#[from] DispatchError),
}

pub type RuntimeResult<T> = Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("JSON codec error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type CodecResult<T> = Result<T, CodecError>;
