use fd_core::{Clock, Timestamp};
use tokio::time::Instant;

/// Clock driven by tokio's timer.
///
/// Follows `tokio::time::pause`/`advance`, so under a paused test runtime the
/// dispatcher's timestamps move with the simulated time.
#[derive(Clone, Debug)]
pub struct TokioClock {
    origin: Instant,
}

impl TokioClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for TokioClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for TokioClock {
    fn now(&self) -> Timestamp {
        Timestamp(self.origin.elapsed().as_millis() as u64)
    }
}
