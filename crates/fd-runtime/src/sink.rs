//! Outbound port bindings.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{info, warn};

use fd_core::RobotName;
use fd_dispatch::{CommandSink, MissionCommand, StatusSink, StatusUpdate};

use crate::CommandCodec;

/// An encoded mission command addressed to one robot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedCommand {
    pub robot:   RobotName,
    pub payload: Vec<u8>,
}

/// Encodes each command and forwards it on an unbounded channel.
///
/// The dispatcher never waits on delivery.  Encoding failures and a closed
/// channel are logged and the command is dropped.
pub struct ChannelCommandSink {
    codec: Arc<dyn CommandCodec>,
    tx:    mpsc::UnboundedSender<EncodedCommand>,
}

impl ChannelCommandSink {
    /// A sink plus the receiver the transport reads from.
    pub fn channel(codec: Arc<dyn CommandCodec>) -> (Self, mpsc::UnboundedReceiver<EncodedCommand>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { codec, tx }, rx)
    }
}

impl CommandSink for ChannelCommandSink {
    fn send_command(&mut self, command: MissionCommand) {
        let payload = match self.codec.encode(&command) {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!(robot = %command.robot, %err, "failed to encode mission command");
                return;
            }
        };
        if self.tx.send(EncodedCommand { robot: command.robot, payload }).is_err() {
            warn!("command receiver dropped; mission command lost");
        }
    }
}

/// Publishes status updates as log events on the `fd::status` target.
#[derive(Copy, Clone, Debug, Default)]
pub struct LogStatusSink;

impl StatusSink for LogStatusSink {
    fn publish_status(&mut self, update: StatusUpdate) {
        info!(target: "fd::status", robot = %update.robot, state = %update.state, "status");
    }
}
