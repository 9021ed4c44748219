//! The serialized event loop.

use std::fmt;

use tokio::sync::{mpsc, oneshot};
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use fd_core::{NodeId, RequestId, RobotName};
use fd_dispatch::{DispatchError, DispatchMetrics, Dispatcher};

use crate::{
    CustomerRequest, CustomerRequestSource, FleetEvent, LocationReport, LocationSource,
    RuntimeError, RuntimeResult,
};

// ── RuntimeHandle ─────────────────────────────────────────────────────────────

/// Cloneable sender side of the event loop.
#[derive(Clone, Debug)]
pub struct RuntimeHandle {
    tx: mpsc::Sender<FleetEvent>,
}

impl RuntimeHandle {
    pub async fn report_location(
        &self,
        robot: RobotName,
        node:  NodeId,
        next:  Option<NodeId>,
    ) -> RuntimeResult<()> {
        self.send(FleetEvent::Location(LocationReport { robot, node, next })).await
    }

    /// Submit a request and wait for the dispatcher to accept or reject it.
    pub async fn submit_request(&self, start: NodeId, target: NodeId) -> RuntimeResult<RequestId> {
        let (reply, rx) = oneshot::channel();
        self.send(FleetEvent::Request {
            request: CustomerRequest { start, target },
            reply:   Some(reply),
        })
        .await?;
        Ok(rx.await.map_err(|_| RuntimeError::Closed)??)
    }

    pub async fn metrics(&self) -> RuntimeResult<DispatchMetrics> {
        let (reply, rx) = oneshot::channel();
        self.send(FleetEvent::Metrics(reply)).await?;
        rx.await.map_err(|_| RuntimeError::Closed)
    }

    /// Ask the loop to stop after the events already queued ahead of this one.
    pub async fn shutdown(&self) -> RuntimeResult<()> {
        self.send(FleetEvent::Shutdown).await
    }

    async fn send(&self, event: FleetEvent) -> RuntimeResult<()> {
        self.tx.send(event).await.map_err(|_| RuntimeError::Closed)
    }
}

// ── RuntimeSummary ────────────────────────────────────────────────────────────

/// Counters collected over one run, plus the final dispatcher metrics.
#[derive(Clone, Debug, Default)]
pub struct RuntimeSummary {
    pub location_reports:  u64,
    pub requests_accepted: u64,
    pub requests_rejected: u64,
    pub sweeps:            u64,
    pub evictions:         u64,
    /// Dispatch passes that failed (misbehaving strategy).
    pub errors:            u64,
    /// `true` if the location source could not be subscribed.
    pub degraded:          bool,
    pub metrics:           DispatchMetrics,
}

impl fmt::Display for RuntimeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "location reports   {:>8}", self.location_reports)?;
        writeln!(f, "requests accepted  {:>8}", self.requests_accepted)?;
        writeln!(f, "requests rejected  {:>8}", self.requests_rejected)?;
        writeln!(f, "timeout sweeps     {:>8}", self.sweeps)?;
        writeln!(f, "evictions          {:>8}", self.evictions)?;
        writeln!(f, "errors             {:>8}", self.errors)?;
        write!(f, "{}", self.metrics)
    }
}

// ── FleetRuntime ──────────────────────────────────────────────────────────────

/// Owns a [`Dispatcher`] and feeds it events one at a time.
///
/// # Example
///
/// ```rust,ignore
/// let (runtime, handle) = FleetRuntime::new(dispatcher);
/// let task = tokio::spawn(runtime.with_location_source(locations).run());
/// handle.submit_request(NodeId(1), NodeId(5)).await?;
/// handle.shutdown().await?;
/// let summary = task.await??;
/// ```
pub struct FleetRuntime {
    dispatcher: Dispatcher,
    events:     mpsc::Receiver<FleetEvent>,
    tx:         mpsc::Sender<FleetEvent>,
    locations:  Option<Box<dyn LocationSource>>,
    requests:   Option<Box<dyn CustomerRequestSource>>,
    summary:    RuntimeSummary,
}

impl FleetRuntime {
    /// Wrap `dispatcher`.  The event channel is sized by its config's
    /// `event_buffer`.
    pub fn new(dispatcher: Dispatcher) -> (Self, RuntimeHandle) {
        let (tx, events) = mpsc::channel(dispatcher.config().event_buffer);
        let handle = RuntimeHandle { tx: tx.clone() };
        let runtime = Self {
            dispatcher,
            events,
            tx,
            locations: None,
            requests:  None,
            summary:   RuntimeSummary::default(),
        };
        (runtime, handle)
    }

    pub fn with_location_source(mut self, source: impl LocationSource + 'static) -> Self {
        self.locations = Some(Box::new(source));
        self
    }

    pub fn with_request_source(mut self, source: impl CustomerRequestSource + 'static) -> Self {
        self.requests = Some(Box::new(source));
        self
    }

    /// Subscribe the sources, then process events until shutdown.
    ///
    /// A location source that cannot be subscribed is not fatal: the loop
    /// runs without location updates and the summary is marked degraded.
    ///
    /// # Errors
    ///
    /// [`RuntimeError::Subscribe`] if the customer request source fails.
    pub async fn run(mut self) -> RuntimeResult<RuntimeSummary> {
        self.start_sources()?;

        // Only handles and forwarders keep the channel open from here on.
        let Self { mut dispatcher, mut events, tx, mut summary, .. } = self;
        drop(tx);

        let mut sweep = time::interval(dispatcher.config().sweep_interval());
        sweep.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; nothing can be stale yet.
        sweep.tick().await;

        info!(
            strategy     = dispatcher.strategy_name(),
            timeout_secs = dispatcher.config().timeout_secs,
            "fleet runtime started",
        );

        loop {
            tokio::select! {
                event = events.recv() => match event {
                    None | Some(FleetEvent::Shutdown) => break,
                    Some(event) => handle_event(&mut dispatcher, &mut summary, event),
                },
                _ = sweep.tick() => {
                    summary.sweeps += 1;
                    match dispatcher.sweep_timeouts() {
                        Ok(evicted) => summary.evictions += evicted.len() as u64,
                        Err(err) => {
                            error!(%err, "dispatch after timeout sweep failed");
                            summary.errors += 1;
                        }
                    }
                }
            }
        }

        summary.metrics = dispatcher.metrics();
        info!(metrics = %summary.metrics, "fleet runtime stopped");
        Ok(summary)
    }

    fn start_sources(&mut self) -> RuntimeResult<()> {
        if let Some(mut source) = self.requests.take() {
            let mut rx = source.subscribe()?;
            let tx = self.tx.clone();
            tokio::spawn(async move {
                while let Some(request) = rx.recv().await {
                    if tx.send(FleetEvent::Request { request, reply: None }).await.is_err() {
                        break;
                    }
                }
            });
        }

        match self.locations.take().map(|mut s| s.subscribe()) {
            Some(Ok(mut rx)) => {
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    while let Some(report) = rx.recv().await {
                        if tx.send(FleetEvent::Location(report)).await.is_err() {
                            break;
                        }
                    }
                });
            }
            Some(Err(err)) => {
                warn!(%err, "location source unavailable; running without location updates");
                self.summary.degraded = true;
            }
            None => {
                warn!("no location source configured; running without location updates");
                self.summary.degraded = true;
            }
        }
        Ok(())
    }
}

fn handle_event(dispatcher: &mut Dispatcher, summary: &mut RuntimeSummary, event: FleetEvent) {
    match event {
        FleetEvent::Location(report) => {
            summary.location_reports += 1;
            if let Err(err) = dispatcher.handle_location(&report.robot, report.node, report.next) {
                error!(robot = %report.robot, %err, "dispatch after location report failed");
                summary.errors += 1;
            }
        }
        FleetEvent::Request { request, reply } => {
            let result = dispatcher.submit_request(request.start, request.target);
            match &result {
                Ok(_) => summary.requests_accepted += 1,
                Err(err @ DispatchError::UnknownNode { .. }) => {
                    warn!(%err, "customer request rejected");
                    summary.requests_rejected += 1;
                }
                Err(err) => {
                    // The request itself is queued; only the dispatch pass failed.
                    error!(%err, "dispatch after customer request failed");
                    summary.requests_accepted += 1;
                    summary.errors += 1;
                }
            }
            if let Some(reply) = reply {
                let _ = reply.send(result);
            }
        }
        FleetEvent::Metrics(reply) => {
            let _ = reply.send(dispatcher.metrics());
        }
        FleetEvent::Shutdown => debug!("shutdown requested"),
    }
}
