//! Completion statistics.

use std::fmt;
use std::time::Duration;

use fd_fleet::{FleetRegistry, Request, RequestQueue};

/// Snapshot returned by [`Dispatcher::metrics`][crate::Dispatcher::metrics].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DispatchMetrics {
    pub fulfilled:  usize,
    /// Mean registration → pickup time over fulfilled requests.
    pub mean_wait:  Option<Duration>,
    /// Mean pickup → drop-off time over fulfilled requests.
    pub mean_ride:  Option<Duration>,
    pub pending:    usize,
    pub fleet_size: usize,
    pub idle:       usize,
}

impl DispatchMetrics {
    pub(crate) fn collect(fulfilled: &[Request], fleet: &FleetRegistry, queue: &RequestQueue) -> Self {
        Self {
            fulfilled:  fulfilled.len(),
            mean_wait:  mean(fulfilled.iter().filter_map(Request::wait_time)),
            mean_ride:  mean(fulfilled.iter().filter_map(Request::ride_time)),
            pending:    queue.len(),
            fleet_size: fleet.len(),
            idle:       fleet.iter().filter(|r| r.is_idle()).count(),
        }
    }
}

fn mean(durations: impl Iterator<Item = Duration>) -> Option<Duration> {
    let (sum, n) = durations.fold((Duration::ZERO, 0u32), |(s, n), d| (s + d, n + 1));
    (n > 0).then(|| sum / n)
}

fn fmt_opt(d: Option<Duration>) -> String {
    d.map_or_else(|| "-".to_owned(), |d| format!("{:.1}s", d.as_secs_f64()))
}

impl fmt::Display for DispatchMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "fulfilled={} mean_wait={} mean_ride={} pending={} fleet={} idle={}",
            self.fulfilled,
            fmt_opt(self.mean_wait),
            fmt_opt(self.mean_ride),
            self.pending,
            self.fleet_size,
            self.idle,
        )
    }
}
