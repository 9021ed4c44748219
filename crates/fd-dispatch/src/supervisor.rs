//! Timeout supervision.

use tracing::warn;

use fd_core::RobotName;

use crate::{Dispatcher, DispatchResult};

impl Dispatcher {
    /// Evict every robot silent for longer than the configured timeout, then
    /// run a dispatch pass.
    ///
    /// Requests held by evicted robots go back to the front of the queue, so
    /// the dispatch pass serves them before anything already waiting.
    /// Returns the evicted names in name order.
    pub fn sweep_timeouts(&mut self) -> DispatchResult<Vec<RobotName>> {
        let now = self.clock.now();
        let evicted = self.fleet.sweep_timed_out(self.config.timeout(), now, &mut self.queue);
        for name in &evicted {
            warn!(robot = %name, timeout_secs = self.config.timeout_secs, "robot timed out; evicted");
        }
        self.dispatch_pending()?;
        Ok(evicted)
    }
}
