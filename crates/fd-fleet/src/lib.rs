//! `fd-fleet` — robot records, request ownership, and the pending queue.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`state`]    | `TaxiState` — the three-state mission cycle                |
//! | [`request`]  | `Request` — a customer transport request and its timings   |
//! | [`robot`]    | `RobotRecord`, `LocationUpdate`                            |
//! | [`registry`] | `FleetRegistry`, `IdleRobot`                               |
//! | [`queue`]    | `RequestQueue` — FIFO with priority reinsertion            |
//! | [`error`]    | `FleetError`, `FleetResult<T>`                             |
//!
//! # Ownership model
//!
//! A [`Request`] has exactly one owner at any time: the [`RequestQueue`]
//! while pending, one [`RobotRecord`] while assigned, and the dispatcher's
//! fulfilled list after drop-off.  Moves between owners are by value, so a
//! request cannot be referenced from two places.
//!
//! The [`FleetRegistry`] owns every record.  Everything outside it refers to
//! robots by [`RobotName`][fd_core::RobotName] only, so nothing dangles after
//! an eviction.

pub mod error;
pub mod queue;
pub mod registry;
pub mod request;
pub mod robot;
pub mod state;


pub use error::{FleetError, FleetResult};
pub use queue::RequestQueue;
pub use registry::{FleetRegistry, IdleRobot};
pub use request::Request;
pub use robot::{LocationUpdate, RobotRecord};
pub use state::TaxiState;
