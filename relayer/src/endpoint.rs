use cosmos_chain::chain::CosmosChain;
use types::ibc_core::ics02_client::height::Height;
use types::ibc_core::ics04_channel::packet::Packet;
use types::ibc_core::ics24_host::identifier::{ChainId, ClientId, ConnectionId};
use types::ibc_events::WriteAcknowledgement;

use crate::error::Error;

/// One side of a link: a signing chain client, the light client of the
/// counterparty living on it, and the connection between the two. The
/// endpoint owns no on-chain state, it is a view.
#[derive(Clone, Debug)]
pub struct Endpoint {
    pub chain: CosmosChain,
    pub client_id: ClientId,
    pub connection_id: ConnectionId,
}

/// Options for the outbound event scans.
#[derive(Copy, Clone, Debug, Default)]
pub struct QueryOpts {
    pub min_height: Option<u64>,
}

/// A packet plus the source height at which it was committed.
#[derive(Clone, Debug)]
pub struct PacketWithMetadata {
    pub packet: Packet,
    pub height: Height,
}

/// An acknowledgment (with its original packet) plus the source height of
/// the ack-write event.
#[derive(Clone, Debug)]
pub struct AckWithMetadata {
    pub ack: WriteAcknowledgement,
    pub height: Height,
}

impl Endpoint {
    pub fn new(chain: CosmosChain, client_id: ClientId, connection_id: ConnectionId) -> Self {
        Self {
            chain,
            client_id,
            connection_id,
        }
    }

    pub fn chain_id(&self) -> ChainId {
        self.chain.id()
    }

    /// Packets sent from this side, tagged with their commit heights.
    pub async fn query_sent_packets(
        &self,
        opts: &QueryOpts,
    ) -> Result<Vec<PacketWithMetadata>, Error> {
        let packets = self
            .chain
            .query_sent_packets_since(&self.connection_id, opts.min_height)
            .await
            .map_err(Error::chain)?;

        Ok(packets
            .into_iter()
            .map(|(packet, height)| PacketWithMetadata { packet, height })
            .collect())
    }

    /// Acks written on this side, tagged with their write heights.
    pub async fn query_written_acks(
        &self,
        opts: &QueryOpts,
    ) -> Result<Vec<AckWithMetadata>, Error> {
        let acks = self
            .chain
            .query_written_acks_since(&self.connection_id, opts.min_height)
            .await
            .map_err(Error::chain)?;

        Ok(acks
            .into_iter()
            .map(|(ack, height)| AckWithMetadata { ack, height })
            .collect())
    }
}
