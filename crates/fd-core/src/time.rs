//! Dispatcher time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Timestamp` counted in milliseconds
//! since the origin of the [`Clock`] that produced it.  Timestamps from
//! different clocks are not comparable.
//!
//! Handlers never read the wall clock directly; they ask the injected
//! `Clock`.  Tests use [`ManualClock`] and advance it explicitly, so timeout
//! behaviour is reproducible without sleeping.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

// ── Timestamp ─────────────────────────────────────────────────────────────────

/// Milliseconds since the owning clock's origin.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Timestamp(pub u64);

impl Timestamp {
    pub const ZERO: Timestamp = Timestamp(0);

    /// Time elapsed from `earlier` to `self`, saturating at zero.
    #[inline]
    pub fn since(self, earlier: Timestamp) -> Duration {
        Duration::from_millis(self.0.saturating_sub(earlier.0))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:03}s", self.0 / 1_000, self.0 % 1_000)
    }
}

// ── Clock ─────────────────────────────────────────────────────────────────────

/// Source of "now" for every timestamp the dispatcher records.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// Monotonic wall clock anchored at construction.
#[derive(Clone, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp(self.origin.elapsed().as_millis() as u64)
    }
}

/// Hand-driven clock.  Clones share the same counter, so a test can keep one
/// handle and give another to the dispatcher.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    millis: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock forward by `by`.
    pub fn advance(&self, by: Duration) {
        self.millis.fetch_add(by.as_millis() as u64, Ordering::SeqCst);
    }

    /// Jump to an absolute timestamp.
    pub fn set(&self, at: Timestamp) {
        self.millis.store(at.0, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        Timestamp(self.millis.load(Ordering::SeqCst))
    }
}
