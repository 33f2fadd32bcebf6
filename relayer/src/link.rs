use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{Display, Error as FmtError, Formatter};
use std::time::Duration;

use cosmos_chain::chain::{ConnectionMsgType, CosmosChain};
use cosmos_chain::client::ClientSettings;
use cosmos_chain::common::QueryHeight;
use futures::future;
use futures::try_join;
use log::{debug, info};
use types::ibc_core::ics02_client::height::Height;
use types::ibc_core::ics03_connection::connection::{
    Counterparty as ConnectionCounterparty, State as ConnectionState,
};
use types::ibc_core::ics03_connection::msgs::{
    MsgConnectionOpenAck, MsgConnectionOpenConfirm, MsgConnectionOpenInit, MsgConnectionOpenTry,
};
use types::ibc_core::ics03_connection::version::Version as ConnectionVersion;
use types::ibc_core::ics04_channel::channel::{
    check_target_channel_state, ChannelEnd, Counterparty as ChannelCounterparty, Ordering,
    State as ChannelState, Version as ChannelVersion,
};
use types::ibc_core::ics04_channel::msgs::{
    MsgChannelOpenAck, MsgChannelOpenConfirm, MsgChannelOpenInit, MsgChannelOpenTry,
};
use types::ibc_core::ics04_channel::packet::Sequence;
use types::ibc_core::ics24_host::identifier::{ChannelId, ClientId, ConnectionId, PortId};
use types::ibc_events::{
    extract_channel_id, extract_client_id, extract_connection_id, IbcEvent, IbcEventWithHeight,
};
use types::message::Msg;

use crate::client::build_update_client_msgs;
use crate::endpoint::{AckWithMetadata, Endpoint, PacketWithMetadata, QueryOpts};
use crate::error::Error;
use crate::relayed_heights::RelayedHeights;
use crate::side::Side;

/// The `(src, dest)` view over a link's endpoints selected by a [`Side`].
#[derive(Clone, Copy, Debug)]
pub struct LinkEnds<'a> {
    pub src: &'a Endpoint,
    pub dest: &'a Endpoint,
}

/// The port and channel minted on one chain by `create_channel`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelInfo {
    pub port_id: PortId,
    pub channel_id: ChannelId,
}

/// Both ends of a newly opened channel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelPair {
    pub src: ChannelInfo,
    pub dest: ChannelInfo,
}

/// A pair of IBC-connected chains. The link drives client updates, the
/// connection and channel handshakes, and the bidirectional packet/ack
/// pipeline. It holds no mutable state of its own; everything durable lives
/// on the two chains.
#[derive(Clone, Debug)]
pub struct Link {
    end_a: Endpoint,
    end_b: Endpoint,
}

impl Display for Link {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(
            f,
            "Link {{ A: {} ({}, {}), B: {} ({}, {}) }}",
            self.end_a.chain_id(),
            self.end_a.client_id,
            self.end_a.connection_id,
            self.end_b.chain_id(),
            self.end_b.client_id,
            self.end_b.connection_id,
        )
    }
}

impl Link {
    pub fn new(end_a: Endpoint, end_b: Endpoint) -> Self {
        Self { end_a, end_b }
    }

    pub fn end_a(&self) -> &Endpoint {
        &self.end_a
    }

    pub fn end_b(&self) -> &Endpoint {
        &self.end_b
    }

    pub fn get_ends(&self, src: Side) -> LinkEnds<'_> {
        match src {
            Side::A => LinkEnds {
                src: &self.end_a,
                dest: &self.end_b,
            },
            Side::B => LinkEnds {
                src: &self.end_b,
                dest: &self.end_a,
            },
        }
    }

    /// Adopt a pair of connections that are already OPEN and mutually
    /// consistent. Broadcasts nothing; every invariant violation is fatal.
    pub async fn create_with_existing_connections(
        chain_a: CosmosChain,
        chain_b: CosmosChain,
        connection_a: &ConnectionId,
        connection_b: &ConnectionId,
    ) -> Result<Link, Error> {
        let (connection_end_a, connection_end_b) = try_join!(
            async {
                chain_a
                    .query_connection(connection_a, QueryHeight::Latest, false)
                    .await
                    .map_err(Error::chain)
            },
            async {
                chain_b
                    .query_connection(connection_b, QueryHeight::Latest, false)
                    .await
                    .map_err(Error::chain)
            },
        )?;
        let (connection_end_a, _) = connection_end_a;
        let (connection_end_b, _) = connection_end_b;

        if !connection_end_a.state_matches(&ConnectionState::Open) {
            return Err(Error::consensus(format!(
                "connection {connection_a} on {} is not OPEN",
                chain_a.id()
            )));
        }
        if !connection_end_b.state_matches(&ConnectionState::Open) {
            return Err(Error::consensus(format!(
                "connection {connection_b} on {} is not OPEN",
                chain_b.id()
            )));
        }

        if connection_end_a.counterparty().connection_id() != Some(connection_b) {
            return Err(Error::consensus(format!(
                "connection {connection_a} does not point at {connection_b}"
            )));
        }
        if connection_end_b.counterparty().connection_id() != Some(connection_a) {
            return Err(Error::consensus(format!(
                "connection {connection_b} does not point at {connection_a}"
            )));
        }

        let client_a = connection_end_a.client_id().clone();
        let client_b = connection_end_b.client_id().clone();

        if &client_a != connection_end_b.counterparty().client_id()
            || &client_b != connection_end_a.counterparty().client_id()
        {
            return Err(Error::consensus(format!(
                "client ids of {connection_a} and {connection_b} do not cross-reference"
            )));
        }

        let (client_state_a, client_state_b) = try_join!(
            async {
                chain_a
                    .query_client_state(&client_a, QueryHeight::Latest, false)
                    .await
                    .map_err(Error::chain)
            },
            async {
                chain_b
                    .query_client_state(&client_b, QueryHeight::Latest, false)
                    .await
                    .map_err(Error::chain)
            },
        )?;
        let (client_state_a, _) = client_state_a;
        let (client_state_b, _) = client_state_b;

        if client_state_a.chain_id != chain_b.id() {
            return Err(Error::consensus(format!(
                "client {client_a} tracks {}, expected {}",
                client_state_a.chain_id,
                chain_b.id()
            )));
        }
        if client_state_b.chain_id != chain_a.id() {
            return Err(Error::consensus(format!(
                "client {client_b} tracks {}, expected {}",
                client_state_b.chain_id,
                chain_a.id()
            )));
        }

        try_join!(
            check_consensus_against_header(
                &chain_a,
                &client_a,
                client_state_a.latest_height(),
                &chain_b
            ),
            check_consensus_against_header(
                &chain_b,
                &client_b,
                client_state_b.latest_height(),
                &chain_a
            ),
        )?;

        let link = Link::new(
            Endpoint::new(chain_a, client_a, connection_a.clone()),
            Endpoint::new(chain_b, client_b, connection_b.clone()),
        );

        info!("adopted existing connections: {link}");

        Ok(link)
    }

    /// Bootstrap everything: a client of each chain on the counterparty, then
    /// the four-step connection handshake.
    pub async fn create_with_new_connections(
        chain_a: CosmosChain,
        chain_b: CosmosChain,
    ) -> Result<Link, Error> {
        // Client of A on B first, then client of B on A.
        let client_a_on_b = create_client(&chain_a, &chain_b).await?;
        let client_b_on_a = create_client(&chain_b, &chain_a).await?;

        info!(
            "created clients: {client_a_on_b} on {}, {client_b_on_a} on {}",
            chain_b.id(),
            chain_a.id()
        );

        let prefix_a = chain_a.query_commitment_prefix().map_err(Error::chain)?;
        let prefix_b = chain_b.query_commitment_prefix().map_err(Error::chain)?;

        // Init on A.
        let init_msg = MsgConnectionOpenInit {
            client_id: client_b_on_a.clone(),
            counterparty: ConnectionCounterparty::new(client_a_on_b.clone(), None, prefix_b),
            version: Some(ConnectionVersion::default()),
            delay_period: Duration::ZERO,
            signer: chain_a.get_signer().map_err(Error::chain)?,
        };

        let events = chain_a
            .send_messages_and_wait_commit(vec![init_msg.to_any()])
            .await
            .map_err(Error::chain)?;
        let init_event = find_handshake_event(events, "ConnOpenInit", |event| {
            matches!(event, IbcEvent::OpenInitConnection(_))
        })?;
        let connection_a = extract_connection_id(&init_event)
            .map_err(Error::types)?
            .clone();

        info!("ConnOpenInit on {}: {connection_a}", chain_a.id());

        // Try on B, proving A's INIT end.
        let src_height = chain_a.query_latest_height().await.map_err(Error::chain)?;
        let (client_state_of_b, proofs) = chain_a
            .build_connection_proofs_and_client_state(
                ConnectionMsgType::OpenTry,
                &connection_a,
                &client_b_on_a,
                src_height,
            )
            .await
            .map_err(Error::chain)?;

        let consensus_height = client_state_of_b.as_ref().map(|cs| cs.latest_height());
        let mut msgs =
            build_update_client_msgs(&chain_a, &chain_b, &client_a_on_b, proofs.height()).await?;

        let try_msg = MsgConnectionOpenTry {
            client_id: client_a_on_b.clone(),
            client_state: client_state_of_b.map(Into::into),
            counterparty: ConnectionCounterparty::new(
                client_b_on_a.clone(),
                Some(connection_a.clone()),
                prefix_a.clone(),
            ),
            counterparty_versions: vec![ConnectionVersion::default()],
            delay_period: Duration::ZERO,
            proofs,
            consensus_height,
            signer: chain_b.get_signer().map_err(Error::chain)?,
        };
        msgs.push(try_msg.to_any());

        let events = chain_b
            .send_messages_and_wait_commit(msgs)
            .await
            .map_err(Error::chain)?;
        let try_event = find_handshake_event(events, "ConnOpenTry", |event| {
            matches!(event, IbcEvent::OpenTryConnection(_))
        })?;
        let connection_b = extract_connection_id(&try_event)
            .map_err(Error::types)?
            .clone();

        info!("ConnOpenTry on {}: {connection_b}", chain_b.id());

        // Ack on A, proving B's TRYOPEN end.
        let src_height = chain_b.query_latest_height().await.map_err(Error::chain)?;
        let (client_state_of_a, proofs) = chain_b
            .build_connection_proofs_and_client_state(
                ConnectionMsgType::OpenAck,
                &connection_b,
                &client_a_on_b,
                src_height,
            )
            .await
            .map_err(Error::chain)?;

        let consensus_height = client_state_of_a.as_ref().map(|cs| cs.latest_height());
        let mut msgs =
            build_update_client_msgs(&chain_b, &chain_a, &client_b_on_a, proofs.height()).await?;

        let ack_msg = MsgConnectionOpenAck {
            connection_id: connection_a.clone(),
            counterparty_connection_id: connection_b.clone(),
            client_state: client_state_of_a.map(Into::into),
            version: ConnectionVersion::default(),
            proofs,
            consensus_height,
            signer: chain_a.get_signer().map_err(Error::chain)?,
        };
        msgs.push(ack_msg.to_any());

        let events = chain_a
            .send_messages_and_wait_commit(msgs)
            .await
            .map_err(Error::chain)?;
        find_handshake_event(events, "ConnOpenAck", |event| {
            matches!(event, IbcEvent::OpenAckConnection(_))
        })?;

        info!("ConnOpenAck on {}: {connection_a}", chain_a.id());

        // Confirm on B, proving A's OPEN end.
        let src_height = chain_a.query_latest_height().await.map_err(Error::chain)?;
        let (_, proofs) = chain_a
            .build_connection_proofs_and_client_state(
                ConnectionMsgType::OpenConfirm,
                &connection_a,
                &client_b_on_a,
                src_height,
            )
            .await
            .map_err(Error::chain)?;

        let mut msgs =
            build_update_client_msgs(&chain_a, &chain_b, &client_a_on_b, proofs.height()).await?;

        let confirm_msg = MsgConnectionOpenConfirm {
            connection_id: connection_b.clone(),
            proofs,
            signer: chain_b.get_signer().map_err(Error::chain)?,
        };
        msgs.push(confirm_msg.to_any());

        let events = chain_b
            .send_messages_and_wait_commit(msgs)
            .await
            .map_err(Error::chain)?;
        find_handshake_event(events, "ConnOpenConfirm", |event| {
            matches!(event, IbcEvent::OpenConfirmConnection(_))
        })?;

        info!("ConnOpenConfirm on {}: {connection_b}", chain_b.id());

        let link = Link::new(
            Endpoint::new(chain_a, client_b_on_a, connection_a),
            Endpoint::new(chain_b, client_a_on_b, connection_b),
        );

        info!("created new connections: {link}");

        Ok(link)
    }

    /// Open a channel over the link's connection. `sender` initiates; the
    /// version string is echoed unchanged on both sides. On failure the
    /// channel is left mid-handshake, no rollback is attempted.
    pub async fn create_channel(
        &self,
        sender: Side,
        src_port: &PortId,
        dest_port: &PortId,
        ordering: Ordering,
        version: &str,
    ) -> Result<ChannelPair, Error> {
        let ends = self.get_ends(sender);
        let version = ChannelVersion::new(version.to_string());

        // Init on the sender side.
        let channel = ChannelEnd::new(
            ChannelState::Init,
            ordering,
            ChannelCounterparty::new(dest_port.clone(), None),
            vec![ends.src.connection_id.clone()],
            version.clone(),
        );

        let init_msg = MsgChannelOpenInit {
            port_id: src_port.clone(),
            channel,
            signer: ends.src.chain.get_signer().map_err(Error::chain)?,
        };

        let events = ends
            .src
            .chain
            .send_messages_and_wait_commit(vec![init_msg.to_any()])
            .await
            .map_err(Error::chain)?;
        let init_event = find_handshake_event(events, "ChanOpenInit", |event| {
            matches!(event, IbcEvent::OpenInitChannel(_))
        })?;
        let src_channel_id = extract_channel_id(&init_event)
            .map_err(Error::types)?
            .clone();

        info!(
            "ChanOpenInit on {}: {}/{src_channel_id}",
            ends.src.chain_id(),
            src_port
        );

        // Try on the other side.
        let query_height = ends
            .src
            .chain
            .query_latest_height()
            .await
            .map_err(Error::chain)?;
        let proofs = ends
            .src
            .chain
            .build_channel_proofs(src_port, &src_channel_id, query_height)
            .await
            .map_err(Error::chain)?;

        let channel = ChannelEnd::new(
            ChannelState::TryOpen,
            ordering,
            ChannelCounterparty::new(src_port.clone(), Some(src_channel_id.clone())),
            vec![ends.dest.connection_id.clone()],
            version.clone(),
        );

        let mut msgs = build_update_client_msgs(
            &ends.src.chain,
            &ends.dest.chain,
            &ends.dest.client_id,
            proofs.height(),
        )
        .await?;

        let try_msg = MsgChannelOpenTry {
            port_id: dest_port.clone(),
            channel,
            counterparty_version: version.clone(),
            proofs,
            signer: ends.dest.chain.get_signer().map_err(Error::chain)?,
        };
        msgs.push(try_msg.to_any());

        let events = ends
            .dest
            .chain
            .send_messages_and_wait_commit(msgs)
            .await
            .map_err(Error::chain)?;
        let try_event = find_handshake_event(events, "ChanOpenTry", |event| {
            matches!(event, IbcEvent::OpenTryChannel(_))
        })?;
        let dest_channel_id = extract_channel_id(&try_event)
            .map_err(Error::types)?
            .clone();

        info!(
            "ChanOpenTry on {}: {}/{dest_channel_id}",
            ends.dest.chain_id(),
            dest_port
        );

        // The other side must have reached TRYOPEN before Ack is attempted.
        let (dest_channel, _) = ends
            .dest
            .chain
            .query_channel(&dest_channel_id, dest_port, QueryHeight::Latest, false)
            .await
            .map_err(Error::chain)?;
        let expected_channel = ChannelEnd::new(
            ChannelState::TryOpen,
            ordering,
            ChannelCounterparty::new(src_port.clone(), Some(src_channel_id.clone())),
            vec![ends.dest.connection_id.clone()],
            version.clone(),
        );
        check_target_channel_state(&dest_channel_id, &dest_channel, &expected_channel)
            .map_err(|e| Error::handshake("ChanOpenAck".to_string(), e.to_string()))?;

        // Ack back on the sender side.
        let query_height = ends
            .dest
            .chain
            .query_latest_height()
            .await
            .map_err(Error::chain)?;
        let proofs = ends
            .dest
            .chain
            .build_channel_proofs(dest_port, &dest_channel_id, query_height)
            .await
            .map_err(Error::chain)?;

        let mut msgs = build_update_client_msgs(
            &ends.dest.chain,
            &ends.src.chain,
            &ends.src.client_id,
            proofs.height(),
        )
        .await?;

        let ack_msg = MsgChannelOpenAck {
            port_id: src_port.clone(),
            channel_id: src_channel_id.clone(),
            counterparty_channel_id: dest_channel_id.clone(),
            counterparty_version: version.clone(),
            proofs,
            signer: ends.src.chain.get_signer().map_err(Error::chain)?,
        };
        msgs.push(ack_msg.to_any());

        let events = ends
            .src
            .chain
            .send_messages_and_wait_commit(msgs)
            .await
            .map_err(Error::chain)?;
        find_handshake_event(events, "ChanOpenAck", |event| {
            matches!(event, IbcEvent::OpenAckChannel(_))
        })?;

        info!(
            "ChanOpenAck on {}: {}/{src_channel_id}",
            ends.src.chain_id(),
            src_port
        );

        // Confirm on the other side.
        let query_height = ends
            .src
            .chain
            .query_latest_height()
            .await
            .map_err(Error::chain)?;
        let proofs = ends
            .src
            .chain
            .build_channel_proofs(src_port, &src_channel_id, query_height)
            .await
            .map_err(Error::chain)?;

        let mut msgs = build_update_client_msgs(
            &ends.src.chain,
            &ends.dest.chain,
            &ends.dest.client_id,
            proofs.height(),
        )
        .await?;

        let confirm_msg = MsgChannelOpenConfirm {
            port_id: dest_port.clone(),
            channel_id: dest_channel_id.clone(),
            proofs,
            signer: ends.dest.chain.get_signer().map_err(Error::chain)?,
        };
        msgs.push(confirm_msg.to_any());

        let events = ends
            .dest
            .chain
            .send_messages_and_wait_commit(msgs)
            .await
            .map_err(Error::chain)?;
        find_handshake_event(events, "ChanOpenConfirm", |event| {
            matches!(event, IbcEvent::OpenConfirmChannel(_))
        })?;

        info!(
            "ChanOpenConfirm on {}: {}/{dest_channel_id}",
            ends.dest.chain_id(),
            dest_port
        );

        Ok(ChannelPair {
            src: ChannelInfo {
                port_id: src_port.clone(),
                channel_id: src_channel_id,
            },
            dest: ChannelInfo {
                port_id: dest_port.clone(),
                channel_id: dest_channel_id,
            },
        })
    }

    /// Push `source`'s latest header to the counterparty client and return
    /// the height the destination now knows.
    pub async fn update_client(&self, source: Side) -> Result<Height, Error> {
        let ends = self.get_ends(source);

        let target_height = ends
            .src
            .chain
            .query_latest_height()
            .await
            .map_err(Error::chain)?;

        let msgs = build_update_client_msgs(
            &ends.src.chain,
            &ends.dest.chain,
            &ends.dest.client_id,
            target_height,
        )
        .await?;

        ends.dest
            .chain
            .send_messages_and_wait_commit(msgs)
            .await
            .map_err(Error::chain)?;

        info!(
            "updated client {} on {} to height {target_height}",
            ends.dest.client_id,
            ends.dest.chain_id()
        );

        Ok(target_height)
    }

    /// Update the counterparty client only when its newest consensus state
    /// has fallen more than `max_age` behind `source`'s clock.
    pub async fn update_client_if_stale(
        &self,
        source: Side,
        max_age: Duration,
    ) -> Result<Option<Height>, Error> {
        let ends = self.get_ends(source);

        let (client_state, _) = ends
            .dest
            .chain
            .query_client_state(&ends.dest.client_id, QueryHeight::Latest, false)
            .await
            .map_err(Error::chain)?;

        let (consensus_state, _) = ends
            .dest
            .chain
            .query_client_consensus_state(
                &ends.dest.client_id,
                client_state.latest_height(),
                QueryHeight::Latest,
                false,
            )
            .await
            .map_err(Error::chain)?;

        let src_header_time = ends
            .src
            .chain
            .query_latest_block()
            .await
            .map_err(Error::chain)?
            .header
            .time;

        let behind = src_header_time
            .duration_since(consensus_state.timestamp)
            .unwrap_or_default();

        if behind > max_age {
            self.update_client(source).await.map(Some)
        } else {
            debug!(
                "client {} on {} is only {behind:?} behind, no update needed",
                ends.dest.client_id,
                ends.dest.chain_id()
            );
            Ok(None)
        }
    }

    /// Ensure the destination knows `source` at a height of at least
    /// `min_height` and return the height it ends up knowing. The client is
    /// always updated to the latest available source header; `min_height`
    /// only bounds sufficiency.
    pub async fn update_client_to_height(
        &self,
        source: Side,
        min_height: Height,
    ) -> Result<Height, Error> {
        let ends = self.get_ends(source);

        let (client_state, _) = ends
            .dest
            .chain
            .query_client_state(&ends.dest.client_id, QueryHeight::Latest, false)
            .await
            .map_err(Error::chain)?;

        if client_state.latest_height() >= min_height {
            return Ok(client_state.latest_height());
        }

        let src_tip = ends
            .src
            .chain
            .query_latest_height()
            .await
            .map_err(Error::chain)?;
        if src_tip < min_height {
            ends.src.chain.wait_one_block().await.map_err(Error::chain)?;
        }

        self.update_client(source).await
    }

    /// One pass of the bidirectional pipeline: pending packets both ways,
    /// relay both ways, pending acks both ways, relay both ways. Returns the
    /// advanced cursor.
    pub async fn check_and_relay_packets_and_acks(
        &self,
        cursor: RelayedHeights,
    ) -> Result<RelayedHeights, Error> {
        let (packets_a, packets_b) = try_join!(
            self.pending_packets(Side::A, cursor.packet_height_a),
            self.pending_packets(Side::B, cursor.packet_height_b),
        )?;

        let packet_height_a = max_packet_height(&packets_a);
        let packet_height_b = max_packet_height(&packets_b);

        debug!(
            "pending packets: {} on A, {} on B",
            packets_a.len(),
            packets_b.len()
        );

        try_join!(
            self.relay_packets(Side::A, packets_a),
            self.relay_packets(Side::B, packets_b),
        )?;

        let (acks_a, acks_b) = try_join!(
            self.pending_acks(Side::A, cursor.ack_height_a),
            self.pending_acks(Side::B, cursor.ack_height_b),
        )?;

        let ack_height_a = max_ack_height(&acks_a);
        let ack_height_b = max_ack_height(&acks_b);

        debug!("pending acks: {} on A, {} on B", acks_a.len(), acks_b.len());

        try_join!(
            self.relay_acks(Side::A, acks_a),
            self.relay_acks(Side::B, acks_b),
        )?;

        Ok(cursor.advanced(packet_height_a, packet_height_b, ack_height_a, ack_height_b))
    }

    /// Packets committed on `source` that the destination has not received.
    async fn pending_packets(
        &self,
        source: Side,
        min_height: Option<u64>,
    ) -> Result<Vec<PacketWithMetadata>, Error> {
        let ends = self.get_ends(source);

        let packets = ends
            .src
            .query_sent_packets(&QueryOpts { min_height })
            .await?;

        if packets.is_empty() {
            return Ok(packets);
        }

        // TODO: detect timed-out packets here (timeout_height or
        // timeout_timestamp lapsed on the destination) and submit MsgTimeout
        // on the source instead of relaying a receive.

        // The receive-side query is addressed per destination channel.
        let mut groups: BTreeMap<(PortId, ChannelId), Vec<PacketWithMetadata>> = BTreeMap::new();
        for packet in packets {
            groups
                .entry((
                    packet.packet.destination_port.clone(),
                    packet.packet.destination_channel.clone(),
                ))
                .or_default()
                .push(packet);
        }

        let filtered = future::try_join_all(groups.into_iter().map(
            |((port_id, channel_id), group)| {
                let dest_chain = ends.dest.chain.clone();
                async move {
                    let sequences: Vec<Sequence> =
                        group.iter().map(|p| p.packet.sequence).collect();

                    let unreceived: BTreeSet<Sequence> = dest_chain
                        .query_unreceived_packets(&port_id, &channel_id, sequences)
                        .await
                        .map_err(|e| Error::relay("querying unreceived packets".to_string(), e))?
                        .into_iter()
                        .collect();

                    Ok::<_, Error>(
                        group
                            .into_iter()
                            .filter(|p| unreceived.contains(&p.packet.sequence))
                            .collect::<Vec<_>>(),
                    )
                }
            },
        ))
        .await?;

        let mut pending: Vec<PacketWithMetadata> = filtered.into_iter().flatten().collect();
        pending.sort_by_key(|p| (p.height, p.packet.sequence));

        Ok(pending)
    }

    /// Acks written on `source` whose counterparty commitment is still
    /// outstanding. The unreceived query goes to the chain that originally
    /// sent the packets, keyed by the packets' source channel.
    async fn pending_acks(
        &self,
        source: Side,
        min_height: Option<u64>,
    ) -> Result<Vec<AckWithMetadata>, Error> {
        let ends = self.get_ends(source);

        let acks = ends.src.query_written_acks(&QueryOpts { min_height }).await?;

        if acks.is_empty() {
            return Ok(acks);
        }

        let mut groups: BTreeMap<(PortId, ChannelId), Vec<AckWithMetadata>> = BTreeMap::new();
        for ack in acks {
            groups
                .entry((
                    ack.ack.packet.source_port.clone(),
                    ack.ack.packet.source_channel.clone(),
                ))
                .or_default()
                .push(ack);
        }

        let filtered = future::try_join_all(groups.into_iter().map(
            |((port_id, channel_id), group)| {
                let dest_chain = ends.dest.chain.clone();
                async move {
                    let sequences: Vec<Sequence> =
                        group.iter().map(|a| a.ack.packet.sequence).collect();

                    let unreceived: BTreeSet<Sequence> = dest_chain
                        .query_unreceived_acks(&port_id, &channel_id, sequences)
                        .await
                        .map_err(|e| Error::relay("querying unreceived acks".to_string(), e))?
                        .into_iter()
                        .collect();

                    Ok::<_, Error>(
                        group
                            .into_iter()
                            .filter(|a| unreceived.contains(&a.ack.packet.sequence))
                            .collect::<Vec<_>>(),
                    )
                }
            },
        ))
        .await?;

        let mut pending: Vec<AckWithMetadata> = filtered.into_iter().flatten().collect();
        pending.sort_by_key(|a| (a.height, a.ack.packet.sequence));

        Ok(pending)
    }

    /// Submit `packets` from `source` on the destination in one transaction.
    /// Returns the acks the destination wrote, tagged with the inclusion
    /// height.
    pub async fn relay_packets(
        &self,
        source: Side,
        packets: Vec<PacketWithMetadata>,
    ) -> Result<Vec<AckWithMetadata>, Error> {
        if packets.is_empty() {
            return Ok(vec![]);
        }

        let ends = self.get_ends(source);

        // A commitment at height h is provable under a consensus state of
        // height h + 1 or later.
        let needed_height = packets
            .iter()
            .map(|p| p.height)
            .max()
            .expect("packets is non-empty")
            .increment();

        let header_height = self.update_client_to_height(source, needed_height).await?;

        let signer = ends.dest.chain.get_signer().map_err(Error::chain)?;

        let msgs = future::try_join_all(packets.iter().map(|packet| {
            let src_chain = ends.src.chain.clone();
            let signer = signer.clone();
            async move {
                src_chain
                    .build_recv_packet_msg(&packet.packet, signer, header_height)
                    .await
                    .map_err(|e| Error::relay("building packet proofs".to_string(), e))
            }
        }))
        .await?;

        let events = ends
            .dest
            .chain
            .send_messages_and_wait_commit(msgs)
            .await
            .map_err(|e| Error::relay("broadcasting receive packets".to_string(), e))?;

        let acks: Vec<AckWithMetadata> = events
            .into_iter()
            .filter_map(|event_with_height| match event_with_height.event {
                IbcEvent::WriteAcknowledgement(ack) => Some(AckWithMetadata {
                    ack,
                    height: event_with_height.height,
                }),
                _ => None,
            })
            .collect();

        info!(
            "relayed {} packet(s) {source}->{} and got {} ack(s)",
            packets.len(),
            source.other(),
            acks.len()
        );

        Ok(acks)
    }

    /// Submit `acks` written on `source` back to the chain that sent the
    /// packets. Returns the destination inclusion height.
    pub async fn relay_acks(
        &self,
        source: Side,
        acks: Vec<AckWithMetadata>,
    ) -> Result<Option<Height>, Error> {
        if acks.is_empty() {
            return Ok(None);
        }

        let ends = self.get_ends(source);

        let needed_height = acks
            .iter()
            .map(|a| a.height)
            .max()
            .expect("acks is non-empty")
            .increment();

        let header_height = self.update_client_to_height(source, needed_height).await?;

        let signer = ends.dest.chain.get_signer().map_err(Error::chain)?;

        let msgs = future::try_join_all(acks.iter().map(|ack| {
            let src_chain = ends.src.chain.clone();
            let signer = signer.clone();
            async move {
                src_chain
                    .build_ack_msg(&ack.ack, signer, header_height)
                    .await
                    .map_err(|e| Error::relay("building ack proofs".to_string(), e))
            }
        }))
        .await?;

        let events = ends
            .dest
            .chain
            .send_messages_and_wait_commit(msgs)
            .await
            .map_err(|e| Error::relay("broadcasting acknowledgements".to_string(), e))?;

        let inclusion_height = events.iter().map(|event| event.height).max();

        info!(
            "relayed {} ack(s) {source}->{} at height {inclusion_height:?}",
            acks.len(),
            source.other()
        );

        Ok(inclusion_height)
    }
}

/// Create a client of `src` on `dest` and return the minted client id.
async fn create_client(src: &CosmosChain, dest: &CosmosChain) -> Result<ClientId, Error> {
    let settings = ClientSettings::from(&src.config);

    let client_state = src
        .build_client_state(&settings)
        .await
        .map_err(Error::chain)?;
    let consensus_state = src.build_consensus_state().await.map_err(Error::chain)?;

    let msgs = dest
        .build_create_client_msgs(client_state, consensus_state)
        .map_err(Error::chain)?;

    let events = dest
        .send_messages_and_wait_commit(msgs)
        .await
        .map_err(Error::chain)?;

    let create_event = find_handshake_event(events, "CreateClient", |event| {
        matches!(event, IbcEvent::CreateClient(_))
    })?;

    extract_client_id(&create_event)
        .map(Clone::clone)
        .map_err(Error::types)
}

/// Find the event a handshake step must have emitted. A `ChainError` event
/// from the deliver_tx result surfaces as a handshake failure.
fn find_handshake_event(
    events: Vec<IbcEventWithHeight>,
    step: &str,
    matcher: impl Fn(&IbcEvent) -> bool,
) -> Result<IbcEvent, Error> {
    let found = events.into_iter().find(|event_with_height| {
        matcher(&event_with_height.event)
            || matches!(event_with_height.event, IbcEvent::ChainError(_))
    });

    match found {
        Some(event_with_height) => match event_with_height.event {
            IbcEvent::ChainError(reason) => Err(Error::handshake(step.to_string(), reason)),
            event => Ok(event),
        },
        None => Err(Error::missing_handshake_event(step.to_string())),
    }
}

async fn check_consensus_against_header(
    chain: &CosmosChain,
    client_id: &ClientId,
    consensus_height: Height,
    counterparty: &CosmosChain,
) -> Result<(), Error> {
    let (consensus_state, _) = chain
        .query_client_consensus_state(client_id, consensus_height, QueryHeight::Latest, false)
        .await
        .map_err(Error::chain)?;

    let header = counterparty
        .query_block_header(consensus_height)
        .await
        .map_err(Error::chain)?;

    if consensus_state.next_validators_hash != header.next_validators_hash {
        return Err(Error::consensus(format!(
            "next validators hash of {client_id} at {consensus_height} does not match {}",
            counterparty.id()
        )));
    }

    if consensus_state.root.as_bytes() != header.app_hash.as_ref() {
        return Err(Error::consensus(format!(
            "consensus root of {client_id} at {consensus_height} does not match the app hash of {}",
            counterparty.id()
        )));
    }

    Ok(())
}

fn max_packet_height(packets: &[PacketWithMetadata]) -> Option<u64> {
    packets.iter().map(|p| p.height.revision_height()).max()
}

fn max_ack_height(acks: &[AckWithMetadata]) -> Option<u64> {
    acks.iter().map(|a| a.height.revision_height()).max()
}

#[cfg(test)]
pub mod link_tests {
    use types::ibc_core::ics02_client::height::Height;
    use types::ibc_core::ics04_channel::packet::Packet;
    use types::ibc_core::ics04_channel::timeout::TimeoutHeight;
    use types::ibc_core::ics24_host::identifier::{ChannelId, PortId};
    use types::ibc_events::{IbcEvent, IbcEventWithHeight, SendPacket};
    use types::timestamp::Timestamp;

    use super::{find_handshake_event, max_packet_height};
    use crate::endpoint::PacketWithMetadata;

    fn sample_packet(sequence: u64) -> Packet {
        Packet {
            sequence: sequence.into(),
            source_port: PortId::transfer(),
            source_channel: ChannelId::new(1),
            destination_port: PortId::transfer(),
            destination_channel: ChannelId::new(2),
            data: b"sample".to_vec(),
            timeout_height: TimeoutHeight::Never,
            timeout_timestamp: Timestamp::none(),
        }
    }

    fn send_packet_event(height: u64) -> IbcEventWithHeight {
        IbcEventWithHeight::new(
            IbcEvent::SendPacket(SendPacket {
                packet: sample_packet(1),
            }),
            Height::new(0, height).unwrap(),
        )
    }

    #[test]
    pub fn find_handshake_event_works() {
        let events = vec![send_packet_event(10)];

        let found = find_handshake_event(events, "ConnOpenInit", |event| {
            matches!(event, IbcEvent::SendPacket(_))
        });
        assert!(found.is_ok());
    }

    #[test]
    pub fn missing_handshake_event_fails() {
        let events = vec![send_packet_event(10)];

        let result = find_handshake_event(events, "ConnOpenInit", |event| {
            matches!(event, IbcEvent::OpenInitConnection(_))
        });
        assert!(result.is_err());
    }

    #[test]
    pub fn chain_error_event_fails_handshake() {
        let events = vec![IbcEventWithHeight::new(
            IbcEvent::ChainError("out of gas".to_string()),
            Height::new(0, 3).unwrap(),
        )];

        let result = find_handshake_event(events, "ConnOpenTry", |event| {
            matches!(event, IbcEvent::OpenTryConnection(_))
        });
        assert!(result.is_err());
    }

    // Needs two local chains; point CHAIN_A_CONFIG/CHAIN_B_CONFIG at their
    // config files and run with --ignored.
    #[tokio::test]
    #[ignore]
    pub async fn bootstrap_and_relay_works() {
        let _ = env_logger::builder().is_test(true).try_init();

        let a_file_path = std::env::var("CHAIN_A_CONFIG").expect("CHAIN_A_CONFIG not set");
        let b_file_path = std::env::var("CHAIN_B_CONFIG").expect("CHAIN_B_CONFIG not set");

        let chain_a =
            cosmos_chain::chain::CosmosChain::from_config_file(&a_file_path).expect("chain a!");
        let chain_b =
            cosmos_chain::chain::CosmosChain::from_config_file(&b_file_path).expect("chain b!");

        let link = super::Link::create_with_new_connections(chain_a, chain_b)
            .await
            .expect("link bootstrap error!");

        let channels = link
            .create_channel(
                crate::side::Side::A,
                &PortId::transfer(),
                &PortId::transfer(),
                types::ibc_core::ics04_channel::channel::Ordering::Unordered,
                "ics20-1",
            )
            .await
            .expect("channel handshake error!");
        println!("channels: {channels:?}");

        let cursor = link
            .check_and_relay_packets_and_acks(crate::relayed_heights::RelayedHeights::default())
            .await
            .expect("relay iteration error!");
        println!("cursor: {cursor:?}");
    }

    #[test]
    pub fn max_packet_height_works() {
        let packets = vec![
            PacketWithMetadata {
                packet: sample_packet(1),
                height: Height::new(0, 100).unwrap(),
            },
            PacketWithMetadata {
                packet: sample_packet(2),
                height: Height::new(0, 103).unwrap(),
            },
            PacketWithMetadata {
                packet: sample_packet(3),
                height: Height::new(0, 101).unwrap(),
            },
        ];

        assert_eq!(max_packet_height(&packets), Some(103));
        assert_eq!(max_packet_height(&[]), None);
    }
}
