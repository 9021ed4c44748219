//! Mission command wire encoding.
//!
//! The dispatcher only deals in decoded [`MissionCommand`] values.  The byte
//! layout robots receive is chosen here, by whichever codec the runtime's
//! command sink is given.

use fd_dispatch::MissionCommand;

use crate::CodecResult;

pub trait CommandCodec: Send + Sync {
    fn encode(&self, command: &MissionCommand) -> CodecResult<Vec<u8>>;
    fn decode(&self, bytes: &[u8]) -> CodecResult<MissionCommand>;
}

/// `{"robot":"r1","target":5,"state":"going_to_customer"}`
#[derive(Copy, Clone, Debug, Default)]
pub struct JsonCodec;

impl CommandCodec for JsonCodec {
    fn encode(&self, command: &MissionCommand) -> CodecResult<Vec<u8>> {
        Ok(serde_json::to_vec(command)?)
    }

    fn decode(&self, bytes: &[u8]) -> CodecResult<MissionCommand> {
        Ok(serde_json::from_slice(bytes)?)
    }
}
