//! `fd-core` — foundational types for the fleet dispatcher.
//!
//! This crate is a dependency of every other `fd-*` crate.  It has no `fd-*`
//! dependencies and only a few external ones (`thiserror`, `serde`, `toml`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`ids`]     | `NodeId`, `EdgeId`, `RequestId`, `RobotName`              |
//! | [`time`]    | `Timestamp`, `Clock`, `SystemClock`, `ManualClock`        |
//! | [`config`]  | `DispatchConfig`, `StrategyKind`                          |
//! | [`error`]   | `FdError`, `FdResult`                                     |

pub mod config;
pub mod error;
pub mod ids;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{DispatchConfig, StrategyKind};
pub use error::{FdError, FdResult};
pub use ids::{EdgeId, NodeId, RequestId, RobotName};
pub use time::{Clock, ManualClock, SystemClock, Timestamp};
