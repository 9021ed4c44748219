//! `fd-runtime` — runs a [`Dispatcher`][fd_dispatch::Dispatcher] as one
//! serialized async event loop.
//!
//! # Event loop
//!
//! ```text
//!  LocationSource ──┐
//!  RequestSource  ──┼──► mpsc<FleetEvent> ──► FleetRuntime::run ──► Dispatcher
//!  RuntimeHandle  ──┘                           ▲
//!                        interval(sweep) ───────┘
//! ```
//!
//! Every inbound source is forwarded into one bounded channel.  A single task
//! owns the dispatcher and takes events off that channel one at a time,
//! interleaved with the timeout sweep, so no handler ever sees a half-applied
//! update.  The loop ends on [`FleetEvent::Shutdown`] or when every sender is
//! gone.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`runtime`] | `FleetRuntime`, `RuntimeHandle`, `RuntimeSummary`           |
//! | [`event`]   | `FleetEvent`, `LocationReport`, `CustomerRequest`           |
//! | [`source`]  | `LocationSource`, `CustomerRequestSource`, channel sources  |
//! | [`sink`]    | `ChannelCommandSink`, `EncodedCommand`, `LogStatusSink`     |
//! | [`codec`]   | `CommandCodec`, `JsonCodec`                                 |
//! | [`clock`]   | `TokioClock`                                                |
//! | [`logging`] | `init`, `init_json`                                         |
//! | [`error`]   | `RuntimeError`, `CodecError`                                |

pub mod clock;
pub mod codec;
pub mod error;
pub mod event;
pub mod logging;
pub mod runtime;
pub mod sink;
pub mod source;

#[cfg(test)]
mod tests;

pub use clock::TokioClock;
pub use codec::{CommandCodec, JsonCodec};
pub use error::{CodecError, CodecResult, RuntimeError, RuntimeResult};
pub use event::{CustomerRequest, FleetEvent, LocationReport};
pub use runtime::{FleetRuntime, RuntimeHandle, RuntimeSummary};
pub use sink::{ChannelCommandSink, EncodedCommand, LogStatusSink};
pub use source::{ChannelLocationSource, ChannelRequestSource, CustomerRequestSource, LocationSource};
