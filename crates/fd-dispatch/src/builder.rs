//! Fluent builder for constructing a [`Dispatcher`].

use std::sync::Arc;

use fd_core::{Clock, DispatchConfig, SystemClock};
use fd_fleet::{FleetRegistry, RequestQueue};
use fd_spatial::RoadGraph;

use crate::{
    AssignmentStrategy, CommandSink, Dispatcher, DispatchResult, NoopSink, StatusSink, strategy_for,
};

/// Fluent builder for [`Dispatcher`].
///
/// # Required inputs
///
/// - the road graph, shared as `Arc<dyn RoadGraph>`
///
/// # Optional inputs (have defaults)
///
/// | Method               | Default                                  |
/// |----------------------|------------------------------------------|
/// | `.config(c)`         | `DispatchConfig::default()`              |
/// | `.clock(c)`          | `SystemClock::new()`                     |
/// | `.strategy(s)`       | `strategy_for(config.strategy)`          |
/// | `.command_sink(s)`   | `NoopSink`                               |
/// | `.status_sink(s)`    | `NoopSink`                               |
///
/// # Example
///
/// ```rust,ignore
/// let mut dispatcher = DispatcherBuilder::new(Arc::new(network))
///     .config(config)
///     .clock(clock.clone())
///     .command_sink(commands)
///     .build()?;
/// dispatcher.submit_request(NodeId(1), NodeId(5))?;
/// ```
pub struct DispatcherBuilder {
    graph:    Arc<dyn RoadGraph>,
    config:   DispatchConfig,
    clock:    Option<Arc<dyn Clock>>,
    strategy: Option<Box<dyn AssignmentStrategy>>,
    commands: Option<Box<dyn CommandSink>>,
    status:   Option<Box<dyn StatusSink>>,
}

impl DispatcherBuilder {
    pub fn new(graph: Arc<dyn RoadGraph>) -> Self {
        Self {
            graph,
            config:   DispatchConfig::default(),
            clock:    None,
            strategy: None,
            commands: None,
            status:   None,
        }
    }

    pub fn config(mut self, config: DispatchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Arc::new(clock));
        self
    }

    /// Override the strategy named in the config.
    pub fn strategy(mut self, strategy: impl AssignmentStrategy + 'static) -> Self {
        self.strategy = Some(Box::new(strategy));
        self
    }

    pub fn command_sink(mut self, sink: impl CommandSink + 'static) -> Self {
        self.commands = Some(Box::new(sink));
        self
    }

    pub fn status_sink(mut self, sink: impl StatusSink + 'static) -> Self {
        self.status = Some(Box::new(sink));
        self
    }

    /// Validate the config and return a dispatcher with an empty fleet and
    /// queue.
    pub fn build(self) -> DispatchResult<Dispatcher> {
        self.config.validate()?;

        let strategy = self.strategy.unwrap_or_else(|| strategy_for(self.config.strategy));
        let clock    = self.clock.unwrap_or_else(|| Arc::new(SystemClock::new()));

        Ok(Dispatcher {
            config:       self.config,
            graph:        self.graph,
            clock,
            strategy,
            commands:     self.commands.unwrap_or_else(|| Box::new(NoopSink)),
            status:       self.status.unwrap_or_else(|| Box::new(NoopSink)),
            fleet:        FleetRegistry::new(),
            queue:        RequestQueue::new(),
            fulfilled:    Vec::new(),
            next_request: 0,
        })
    }
}
