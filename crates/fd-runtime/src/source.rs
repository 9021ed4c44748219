//! Inbound ports.
//!
//! A source is subscribed once when the runtime starts and hands back a
//! receiver; the runtime forwards everything it yields into the event loop.
//! The channel-backed sources are the in-process binding used by the demo
//! and tests.  A network transport implements the same traits.

use tokio::sync::mpsc;

use crate::{CustomerRequest, LocationReport, RuntimeError, RuntimeResult};

pub trait LocationSource: Send {
    fn subscribe(&mut self) -> RuntimeResult<mpsc::Receiver<LocationReport>>;
}

pub trait CustomerRequestSource: Send {
    fn subscribe(&mut self) -> RuntimeResult<mpsc::Receiver<CustomerRequest>>;
}

/// Location reports pushed through an in-process channel.
pub struct ChannelLocationSource {
    rx: Option<mpsc::Receiver<LocationReport>>,
}

impl ChannelLocationSource {
    /// A source plus the sender that feeds it.
    pub fn channel(buffer: usize) -> (mpsc::Sender<LocationReport>, Self) {
        let (tx, rx) = mpsc::channel(buffer);
        (tx, Self { rx: Some(rx) })
    }
}

impl LocationSource for ChannelLocationSource {
    fn subscribe(&mut self) -> RuntimeResult<mpsc::Receiver<LocationReport>> {
        self.rx.take().ok_or(RuntimeError::Subscribe {
            port:   "location reports",
            reason: "already subscribed".into(),
        })
    }
}

/// Customer requests pushed through an in-process channel.
pub struct ChannelRequestSource {
    rx: Option<mpsc::Receiver<CustomerRequest>>,
}

impl ChannelRequestSource {
    pub fn channel(buffer: usize) -> (mpsc::Sender<CustomerRequest>, Self) {
        let (tx, rx) = mpsc::channel(buffer);
        (tx, Self { rx: Some(rx) })
    }
}

impl CustomerRequestSource for ChannelRequestSource {
    fn subscribe(&mut self) -> RuntimeResult<mpsc::Receiver<CustomerRequest>> {
        self.rx.take().ok_or(RuntimeError::Subscribe {
            port:   "customer requests",
            reason: "already subscribed".into(),
        })
    }
}
