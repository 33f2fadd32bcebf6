use std::fmt::{Display, Error as FmtError, Formatter};

use super::identifier::{ChannelId, ClientId, ConnectionId, PortId};
use crate::ibc_core::ics04_channel::packet::Sequence;

/// ABCI query path for the IBC store.
pub const IBC_QUERY_PATH: &str = "store/ibc/key";

pub struct ClientStatePath(pub ClientId);

impl Display for ClientStatePath {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "clients/{}/clientState", self.0)
    }
}

pub struct ClientConsensusStatePath {
    pub client_id: ClientId,
    pub epoch: u64,
    pub height: u64,
}

impl Display for ClientConsensusStatePath {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(
            f,
            "clients/{}/consensusStates/{}-{}",
            self.client_id, self.epoch, self.height
        )
    }
}

pub struct ConnectionsPath(pub ConnectionId);

impl Display for ConnectionsPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "connections/{}", self.0)
    }
}

pub struct ChannelEndsPath(pub PortId, pub ChannelId);

impl Display for ChannelEndsPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "channelEnds/ports/{}/channels/{}", self.0, self.1)
    }
}

pub struct CommitmentsPath {
    pub port_id: PortId,
    pub channel_id: ChannelId,
    pub sequence: Sequence,
}

impl Display for CommitmentsPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(
            f,
            "commitments/ports/{}/channels/{}/sequences/{}",
            self.port_id, self.channel_id, self.sequence
        )
    }
}

pub struct AcksPath {
    pub port_id: PortId,
    pub channel_id: ChannelId,
    pub sequence: Sequence,
}

impl Display for AcksPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(
            f,
            "acks/ports/{}/channels/{}/sequences/{}",
            self.port_id, self.channel_id, self.sequence
        )
    }
}

#[cfg(test)]
pub mod path_tests {
    use std::str::FromStr;

    use super::*;
    use crate::ibc_core::ics24_host::identifier::{ChannelId, ClientId, PortId};

    #[test]
    pub fn paths_render_works() {
        let client_id = ClientId::from_str("07-tendermint-3").unwrap();
        assert_eq!(
            ClientStatePath(client_id.clone()).to_string(),
            "clients/07-tendermint-3/clientState"
        );
        assert_eq!(
            ClientConsensusStatePath {
                client_id,
                epoch: 1,
                height: 100,
            }
            .to_string(),
            "clients/07-tendermint-3/consensusStates/1-100"
        );
        assert_eq!(
            CommitmentsPath {
                port_id: PortId::transfer(),
                channel_id: ChannelId::new(0),
                sequence: 5.into(),
            }
            .to_string(),
            "commitments/ports/transfer/channels/channel-0/sequences/5"
        );
    }
}
