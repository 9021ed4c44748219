//! `fd-dispatch` — the dispatcher: request matching, mission transitions,
//! and timeout eviction.
//!
//! # Event handlers
//!
//! ```text
//! submit_request(start, target)   → enqueue → dispatch pass
//! handle_location(robot, node, …) → register if unknown
//!                                   → advance the robot's mission
//!                                   → dispatch pass on drop-off / new robot
//! sweep_timeouts()                → evict silent robots (requeue at front)
//!                                   → dispatch pass
//! ```
//!
//! Every handler takes `&mut Dispatcher`, so the registry and queue are only
//! ever touched by one event at a time.  Serializing events from concurrent
//! sources is the runtime's job (`fd-runtime`).
//!
//! # Crate layout
//!
//! | Module         | Contents                                               |
//! |----------------|--------------------------------------------------------|
//! | [`dispatcher`] | `Dispatcher` — owns the fleet, queue, and ports         |
//! | [`builder`]    | `DispatcherBuilder`                                     |
//! | [`engine`]     | dispatch pass (`Dispatcher::dispatch_pending`)          |
//! | [`transition`] | location handling, `Transition`                         |
//! | [`supervisor`] | timeout sweep (`Dispatcher::sweep_timeouts`)            |
//! | [`strategy`]   | `AssignmentStrategy`, `ClosestIdleRobot`, `Deactivated` |
//! | [`sink`]       | `CommandSink`, `StatusSink`, `MissionCommand`, …        |
//! | [`metrics`]    | `DispatchMetrics`                                       |
//! | [`error`]      | `DispatchError`, `DispatchResult<T>`                    |

pub mod builder;
pub mod dispatcher;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod sink;
pub mod strategy;
pub mod supervisor;
pub mod transition;


pub use builder::DispatcherBuilder;
pub use dispatcher::Dispatcher;
pub use error::{DispatchError, DispatchResult};
pub use metrics::DispatchMetrics;
pub use sink::{CommandSink, MissionCommand, NoopSink, StatusSink, StatusUpdate};
pub use strategy::{AssignmentStrategy, ClosestIdleRobot, Deactivated, Selection, strategy_for};
pub use transition::Transition;
