use std::time::Duration;

use ibc_proto::cosmos::auth::v1beta1::query_client::QueryClient as AuthQueryClient;
use ibc_proto::cosmos::staking::v1beta1::query_client::QueryClient as StakingQueryClient;
use ibc_proto::cosmos::tx::v1beta1::service_client::ServiceClient as TxServiceClient;
use ibc_proto::google::protobuf::Any;
use ibc_proto::ibc::core::channel::v1::query_client::QueryClient as ChannelQueryClient;
use ibc_proto::ibc::core::client::v1::query_client::QueryClient as IbcClientQueryClient;
use ibc_proto::ibc::core::connection::v1::query_client::QueryClient as ConnectionQueryClient;
use log::debug;
use tendermint::block::Header as TendermintHeader;
use tendermint_rpc::query::Query;
use tendermint_rpc::{HttpClient, Order};
use tonic::transport::Channel;
use types::ibc_core::ics02_client::height::Height;
use types::ibc_core::ics02_client::msgs::MsgCreateClient;
use types::ibc_core::ics03_connection::connection::{ConnectionEnd, State};
use types::ibc_core::ics04_channel::channel::ChannelEnd;
use types::ibc_core::ics04_channel::msgs::{MsgAcknowledgement, MsgRecvPacket};
use types::ibc_core::ics04_channel::packet::{Packet, Sequence};
use types::ibc_core::ics23_commitment::commitment::{CommitmentPrefix, CommitmentProofBytes};
use types::ibc_core::ics23_commitment::merkle::MerkleProof;
use types::ibc_core::ics24_host::identifier::{
    ChainId, ChannelId, ClientId, ConnectionId, PortId,
};
use types::ibc_core::ics24_host::path::{ClientConsensusStatePath, IBC_QUERY_PATH};
use types::ibc_events::{
    ibc_event_try_from_abci_event, IbcEvent, IbcEventWithHeight, SendPacket, WriteAcknowledgement,
};
use types::light_clients::ics07_tendermint::client_state::{
    cosmos_proof_specs, AllowUpdate, ClientState,
};
use types::light_clients::ics07_tendermint::consensus_state::ConsensusState;
use types::light_clients::ics07_tendermint::header::Header;
use types::message::Msg;
use types::proofs::{ConsensusProof, Proofs};
use types::signer::Signer;

use crate::account::Secp256k1Account;
use crate::client::{
    validate_client_state, ClientSettings, DEFAULT_TRUSTING_PERIOD, DEFAULT_UNBONDING_PERIOD,
};
use crate::common::{parse_protobuf_duration, QueryHeight};
use crate::config::{load_cosmos_chain_config, CosmosChainConfig};
use crate::error::Error;
use crate::light_client::{build_update_headers, fetch_verified_blocks, VerifiedBlocks};
use crate::query::grpc::{self, account::query_detail_account};
use crate::query::trpc;
use crate::query::types::{Block, TendermintStatus};
use crate::tx::batch::batch_messages;
use crate::tx::send::send_tx;
use crate::tx::types::Memo;

/// The connection handshake step a proof bundle is built for.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ConnectionMsgType {
    OpenTry,
    OpenAck,
    OpenConfirm,
}

/// One chain the relayer talks to: queries over RPC/gRPC and transactions
/// signed with the relaying account.
#[derive(Debug, Clone)]
pub struct CosmosChain {
    id: ChainId,
    pub config: CosmosChainConfig,
    account: Secp256k1Account,
}

impl CosmosChain {
    pub fn new(config: CosmosChainConfig, account: Secp256k1Account) -> Self {
        CosmosChain {
            id: ChainId::from_string(&config.chain_id),
            config,
            account,
        }
    }

    pub fn from_config_file(path: &str) -> Result<Self, Error> {
        let config = load_cosmos_chain_config(path)?;

        let key_path = config
            .key_path
            .clone()
            .ok_or_else(|| Error::cosmos_params("missing key_path in chain config".to_string()))?;
        let account = Secp256k1Account::from_key_file(&key_path, &config.hd_path)?;

        Ok(Self::new(config, account))
    }

    pub fn id(&self) -> ChainId {
        self.id.clone()
    }

    pub fn account(&self) -> &Secp256k1Account {
        &self.account
    }

    pub fn get_signer(&self) -> Result<Signer, Error> {
        self.account.get_signer()
    }

    pub fn query_commitment_prefix(&self) -> Result<CommitmentPrefix, Error> {
        CommitmentPrefix::try_from(self.config.store_prefix.as_bytes().to_vec())
            .map_err(Error::commitment_error)
    }

    pub fn tendermint_rpc_client(&self) -> Result<HttpClient, Error> {
        trpc::connect::tendermint_rpc_client(&self.config.tendermint_rpc_addr)
    }

    pub async fn grpc_auth_client(&self) -> Result<AuthQueryClient<Channel>, Error> {
        grpc::connect::grpc_auth_client(&self.config.grpc_addr).await
    }

    pub async fn grpc_staking_client(&self) -> Result<StakingQueryClient<Channel>, Error> {
        grpc::connect::grpc_staking_client(&self.config.grpc_addr).await
    }

    pub async fn grpc_tx_service_client(&self) -> Result<TxServiceClient<Channel>, Error> {
        grpc::connect::grpc_tx_service_client(&self.config.grpc_addr).await
    }

    pub async fn grpc_ibcclient_client(&self) -> Result<IbcClientQueryClient<Channel>, Error> {
        grpc::connect::grpc_ibcclient_client(&self.config.grpc_addr).await
    }

    pub async fn grpc_connection_client(&self) -> Result<ConnectionQueryClient<Channel>, Error> {
        grpc::connect::grpc_connection_client(&self.config.grpc_addr).await
    }

    pub async fn grpc_channel_client(&self) -> Result<ChannelQueryClient<Channel>, Error> {
        grpc::connect::grpc_channel_client(&self.config.grpc_addr).await
    }

    pub async fn query_latest_block(&self) -> Result<Block, Error> {
        let trpc_client = self.tendermint_rpc_client()?;
        trpc::block::latest_block(&trpc_client).await
    }

    pub async fn query_block_header(&self, height: Height) -> Result<TendermintHeader, Error> {
        let trpc_client = self.tendermint_rpc_client()?;
        let block = trpc::block::block(&trpc_client, height.into()).await?;
        Ok(block.header)
    }

    pub async fn query_latest_height(&self) -> Result<Height, Error> {
        let latest_block = self.query_latest_block().await?;

        Height::new(self.id.version(), u64::from(latest_block.header.height))
            .map_err(|e| Error::block_height("latest height".to_string(), e))
    }

    /// Return once the chain has produced at least one new block.
    pub async fn wait_one_block(&self) -> Result<Height, Error> {
        let initial = self.query_latest_height().await?;
        let backoff =
            Duration::from_millis((self.config.max_block_time * 100).clamp(200, 2_000));

        loop {
            tokio::time::sleep(backoff).await;

            let current = self.query_latest_height().await?;
            if current > initial {
                return Ok(current);
            }
        }
    }

    pub async fn query_tendermint_status(&self) -> Result<TendermintStatus, Error> {
        let trpc_client = self.tendermint_rpc_client()?;
        trpc::consensus::tendermint_status(&trpc_client).await
    }

    pub async fn query_connection(
        &self,
        connection_id: &ConnectionId,
        height_query: QueryHeight,
        prove: bool,
    ) -> Result<(ConnectionEnd, Option<MerkleProof>), Error> {
        let mut grpc_client = self.grpc_connection_client().await?;
        let trpc_client = self.tendermint_rpc_client()?;
        grpc::connection::query_connection(
            &mut grpc_client,
            &trpc_client,
            connection_id,
            height_query,
            prove,
        )
        .await
    }

    pub async fn query_channel(
        &self,
        channel_id: &ChannelId,
        port_id: &PortId,
        height_query: QueryHeight,
        prove: bool,
    ) -> Result<(ChannelEnd, Option<MerkleProof>), Error> {
        let trpc_client = self.tendermint_rpc_client()?;
        grpc::channel::query_channel(&trpc_client, channel_id, port_id, height_query, prove).await
    }

    pub async fn query_client_state(
        &self,
        client_id: &ClientId,
        query_height: QueryHeight,
        prove: bool,
    ) -> Result<(ClientState, Option<MerkleProof>), Error> {
        let trpc_client = self.tendermint_rpc_client()?;
        trpc::abci::abci_query_client_state(&trpc_client, client_id, query_height, prove).await
    }

    pub async fn query_client_consensus_state(
        &self,
        client_id: &ClientId,
        target_height: Height,
        query_height: QueryHeight,
        prove: bool,
    ) -> Result<(ConsensusState, Option<MerkleProof>), Error> {
        let trpc_client = self.tendermint_rpc_client()?;
        trpc::abci::abci_query_consensus_state(
            &trpc_client,
            client_id,
            target_height,
            query_height,
            prove,
        )
        .await
    }

    pub async fn query_consensus_state_heights(
        &self,
        client_id: &ClientId,
    ) -> Result<Vec<Height>, Error> {
        let mut grpc_client = self.grpc_ibcclient_client().await?;
        grpc::consensus::query_all_consensus_state_heights(&mut grpc_client, client_id.clone())
            .await
    }

    pub async fn query_unreceived_packets(
        &self,
        port_id: &PortId,
        channel_id: &ChannelId,
        sequences: Vec<Sequence>,
    ) -> Result<Vec<Sequence>, Error> {
        let mut grpc_client = self.grpc_channel_client().await?;
        grpc::packet::query_unreceived_packets(
            &mut grpc_client,
            port_id.clone(),
            channel_id.clone(),
            sequences,
        )
        .await
    }

    pub async fn query_unreceived_acks(
        &self,
        port_id: &PortId,
        channel_id: &ChannelId,
        sequences: Vec<Sequence>,
    ) -> Result<Vec<Sequence>, Error> {
        let mut grpc_client = self.grpc_channel_client().await?;
        grpc::packet::query_unreceived_acks(
            &mut grpc_client,
            port_id.clone(),
            channel_id.clone(),
            sequences,
        )
        .await
    }

    /// Packets sent over `connection_id` from this chain, scanned from
    /// committed transactions at or above `min_height`.
    pub async fn query_sent_packets_since(
        &self,
        connection_id: &ConnectionId,
        min_height: Option<u64>,
    ) -> Result<Vec<(Packet, Height)>, Error> {
        let events = self
            .scan_tx_events("send_packet.packet_connection", connection_id, min_height)
            .await?;

        Ok(events
            .into_iter()
            .filter_map(|event_with_height| match event_with_height.event {
                IbcEvent::SendPacket(SendPacket { packet }) => {
                    Some((packet, event_with_height.height))
                }
                _ => None,
            })
            .collect())
    }

    /// Acknowledgments written on this chain for packets that arrived over
    /// `connection_id`, scanned from committed transactions.
    pub async fn query_written_acks_since(
        &self,
        connection_id: &ConnectionId,
        min_height: Option<u64>,
    ) -> Result<Vec<(WriteAcknowledgement, Height)>, Error> {
        let events = self
            .scan_tx_events(
                "write_acknowledgement.packet_connection",
                connection_id,
                min_height,
            )
            .await?;

        Ok(events
            .into_iter()
            .filter_map(|event_with_height| match event_with_height.event {
                IbcEvent::WriteAcknowledgement(write_ack) => {
                    Some((write_ack, event_with_height.height))
                }
                _ => None,
            })
            .collect())
    }

    async fn scan_tx_events(
        &self,
        event_key: &str,
        connection_id: &ConnectionId,
        min_height: Option<u64>,
    ) -> Result<Vec<IbcEventWithHeight>, Error> {
        const EVENTS_PER_PAGE: u8 = 50;

        let trpc_client = self.tendermint_rpc_client()?;

        let mut query = Query::eq(event_key, connection_id.to_string());
        if let Some(height) = min_height {
            query = query.and_gte("tx.height", height as i64);
        }

        let mut events = vec![];
        let mut page = 1_u32;

        loop {
            let response = trpc::tx::tx_search(
                &trpc_client,
                query.clone(),
                false,
                page,
                EVENTS_PER_PAGE,
                Order::Ascending,
            )
            .await?;

            for tx_response in &response.txs {
                let height = Height::new(self.id.version(), u64::from(tx_response.height))
                    .map_err(|e| Error::block_height("tx_search height".to_string(), e))?;

                events.extend(tx_response.tx_result.events.iter().filter_map(|event| {
                    ibc_event_try_from_abci_event(event)
                        .ok()
                        .map(|ibc_event| IbcEventWithHeight::new(ibc_event, height))
                }));
            }

            let fetched = page as usize * EVENTS_PER_PAGE as usize;
            if fetched >= response.total_count as usize {
                break;
            }
            page += 1;
        }

        Ok(events)
    }

    /// Sign, batch and broadcast `msgs`, waiting for each batch to be
    /// committed. Returns the IBC events emitted by the transactions.
    pub async fn send_messages_and_wait_commit(
        &self,
        msgs: Vec<Any>,
    ) -> Result<Vec<IbcEventWithHeight>, Error> {
        if msgs.is_empty() {
            return Ok(vec![]);
        }

        let mut grpc_query_client = self.grpc_auth_client().await?;
        let mut grpc_service_client = self.grpc_tx_service_client().await?;
        let trpc_client = self.tendermint_rpc_client()?;

        let account_detail =
            query_detail_account(&mut grpc_query_client, self.account.address().as_str()).await?;

        let memo = Memo::new(self.config.memo_prefix.clone()).map_err(Error::memo)?;
        let msg_batches = batch_messages(
            &self.config,
            &self.account,
            &account_detail,
            &memo,
            msgs,
        )?;

        debug!("{}: sending {} tx batch(es)", self.id, msg_batches.len());

        let mut ibc_events_with_height = vec![];
        for msg_batch in msg_batches {
            let tx_results = send_tx(
                &self.config,
                &trpc_client,
                &mut grpc_query_client,
                &mut grpc_service_client,
                &self.account,
                &memo,
                &msg_batch,
            )
            .await?;

            ibc_events_with_height.extend(tx_results.events);
        }

        Ok(ibc_events_with_height)
    }

    /// The client state a counterparty should store to track this chain.
    pub async fn build_client_state(
        &self,
        settings: &ClientSettings,
    ) -> Result<ClientState, Error> {
        let latest_block = self.query_latest_block().await?;
        let latest_height = Height::new(
            ChainId::chain_version(latest_block.header.chain_id.as_str()),
            u64::from(latest_block.header.height),
        )
        .map_err(|e| Error::block_height("new client state height".to_string(), e))?;

        let chain_id = ChainId::from(latest_block.header.chain_id);

        let unbonding_period = match settings.unbonding_period {
            Some(unbonding_period) => unbonding_period,
            None => self
                .query_staking_unbonding_period()
                .await
                .unwrap_or(DEFAULT_UNBONDING_PERIOD),
        };

        let trusting_period = settings.trusting_period.unwrap_or(DEFAULT_TRUSTING_PERIOD);

        // Deprecated, but still required by CreateClient.
        let allow_update = AllowUpdate {
            after_expiry: true,
            after_misbehaviour: true,
        };

        let client_state = ClientState::new(
            chain_id,
            settings.trust_threshold,
            trusting_period,
            unbonding_period,
            settings.max_clock_drift,
            latest_height,
            cosmos_proof_specs(),
            vec!["upgrade".to_string(), "upgradedIBCState".to_string()],
            allow_update,
        )
        .map_err(|e| Error::client_state("new client state failed".to_string(), e))?;

        Ok(client_state)
    }

    async fn query_staking_unbonding_period(&self) -> Result<Duration, Error> {
        let mut grpc_client = self.grpc_staking_client().await?;
        let staking_params = grpc::staking::query_staking_params(&mut grpc_client).await?;

        let unbonding_time = staking_params.unbonding_time.ok_or_else(|| {
            Error::cosmos_params("empty unbonding time in staking params".to_string())
        })?;

        Ok(parse_protobuf_duration(unbonding_time))
    }

    /// The consensus state matching this chain's current tip.
    pub async fn build_consensus_state(&self) -> Result<ConsensusState, Error> {
        let latest_block = self.query_latest_block().await?;
        Ok(ConsensusState::from(&latest_block.header))
    }

    pub fn build_create_client_msgs(
        &self,
        client_state: ClientState,
        consensus_state: ConsensusState,
    ) -> Result<Vec<Any>, Error> {
        let msg_create_client = MsgCreateClient::new(
            client_state.into(),
            consensus_state.into(),
            self.get_signer()?,
        );

        Ok(vec![msg_create_client.to_any()])
    }

    /// Fetch (and, unless the node is trusted, verify) the light blocks
    /// needed to update a counterparty client to `target_height`.
    pub async fn query_light_blocks(
        &self,
        client_state: &ClientState,
        target_height: Height,
    ) -> Result<VerifiedBlocks, Error> {
        let trpc_client = self.tendermint_rpc_client()?;
        let chain_status = self.query_tendermint_status().await?;

        fetch_verified_blocks(
            &trpc_client,
            &self.config,
            client_state,
            target_height,
            &chain_status.node_info.id,
            chain_status.sync_info.latest_block_time,
        )
    }

    pub async fn build_header_chain(
        &self,
        trusted_height: Height,
        blocks: VerifiedBlocks,
    ) -> Result<(Header, Vec<Header>), Error> {
        let trpc_client = self.tendermint_rpc_client()?;
        let chain_status = self.query_tendermint_status().await?;

        build_update_headers(
            &trpc_client,
            &self.config,
            &chain_status.node_info.id,
            trusted_height,
            blocks,
        )
    }

    /// A height of this chain's client `client_id` that can serve as the
    /// trusted height for an update to `target_height`.
    pub async fn query_trusted_height(
        &self,
        target_height: Height,
        client_id: &ClientId,
        client_latest_height: Height,
    ) -> Result<Height, Error> {
        if client_latest_height < target_height {
            // The client tip itself is a valid trusted state.
            Ok(client_latest_height)
        } else {
            let cs_heights = self.query_consensus_state_heights(client_id).await?;

            cs_heights
                .into_iter()
                .filter(|height| *height < target_height)
                .next_back()
                .ok_or_else(Error::missing_smaller_trusted_height)
        }
    }

    /// Fetch the client state and reject frozen or expired clients before
    /// an update is attempted.
    pub async fn validate_client_state(
        &self,
        client_id: &ClientId,
    ) -> Result<ClientState, Error> {
        let (client_state, _) = self
            .query_client_state(client_id, QueryHeight::Latest, false)
            .await?;

        validate_client_state(client_id, &client_state)?;

        let (consensus_state, _) = self
            .query_client_consensus_state(
                client_id,
                client_state.latest_height(),
                QueryHeight::Latest,
                false,
            )
            .await?;

        let latest_block = self.query_latest_block().await?;
        let elapsed = latest_block
            .header
            .time
            .duration_since(consensus_state.timestamp)
            .unwrap_or_default();

        if elapsed >= client_state.trusting_period {
            return Err(Error::expired_client_state(client_id.clone()));
        }

        Ok(client_state)
    }

    /// Proofs for one connection handshake step, queried on this chain at
    /// `height` and provable under `height + 1`. Try and Ack additionally
    /// carry the stored client state with its proof and consensus proof.
    pub async fn build_connection_proofs_and_client_state(
        &self,
        message_type: ConnectionMsgType,
        connection_id: &ConnectionId,
        client_id: &ClientId,
        height: Height,
    ) -> Result<(Option<ClientState>, Proofs), Error> {
        let (connection_end, maybe_connection_proof) = self
            .query_connection(connection_id, QueryHeight::Specific(height), true)
            .await?;

        let Some(connection_proof) = maybe_connection_proof else {
            return Err(Error::empty_response_proof());
        };

        // Check that the connection state is compatible with the message.
        match message_type {
            ConnectionMsgType::OpenTry => {
                if !connection_end.state_matches(&State::Init)
                    && !connection_end.state_matches(&State::TryOpen)
                {
                    return Err(Error::bad_connection_state());
                }
            }
            ConnectionMsgType::OpenAck => {
                if !connection_end.state_matches(&State::TryOpen)
                    && !connection_end.state_matches(&State::Open)
                {
                    return Err(Error::bad_connection_state());
                }
            }
            ConnectionMsgType::OpenConfirm => {
                if !connection_end.state_matches(&State::Open) {
                    return Err(Error::bad_connection_state());
                }
            }
        }

        let mut client_state_option = None;
        let mut client_proof_option = None;
        let mut consensus_proof_option = None;

        if matches!(
            message_type,
            ConnectionMsgType::OpenTry | ConnectionMsgType::OpenAck
        ) {
            let (client_state, maybe_client_state_proof) = self
                .query_client_state(client_id, QueryHeight::Specific(height), true)
                .await?;

            let Some(client_state_proof) = maybe_client_state_proof else {
                return Err(Error::empty_response_proof());
            };

            client_proof_option = Some(
                CommitmentProofBytes::try_from(client_state_proof)
                    .map_err(Error::commitment_error)?,
            );

            let client_latest_height = client_state.latest_height();

            let (_, maybe_consensus_state_proof) = self
                .query_client_consensus_state(
                    client_id,
                    client_latest_height,
                    QueryHeight::Specific(height),
                    true,
                )
                .await?;

            let Some(consensus_state_proof) = maybe_consensus_state_proof else {
                return Err(Error::empty_response_proof());
            };

            consensus_proof_option = Some(ConsensusProof::new(
                CommitmentProofBytes::try_from(consensus_state_proof)
                    .map_err(Error::commitment_error)?,
                client_latest_height,
            ));

            client_state_option = Some(client_state);
        }

        let proofs = Proofs::new(
            CommitmentProofBytes::try_from(connection_proof).map_err(Error::commitment_error)?,
            client_proof_option,
            consensus_proof_option,
            height.increment(),
        )
        .map_err(Error::proof_error)?;

        Ok((client_state_option, proofs))
    }

    /// Proof of this chain's channel end, queried at `height`, provable
    /// under `height + 1`.
    pub async fn build_channel_proofs(
        &self,
        port_id: &PortId,
        channel_id: &ChannelId,
        height: Height,
    ) -> Result<Proofs, Error> {
        let (_, maybe_channel_proof) = self
            .query_channel(channel_id, port_id, QueryHeight::Specific(height), true)
            .await?;

        let Some(channel_proof) = maybe_channel_proof else {
            return Err(Error::empty_response_proof());
        };

        let channel_proof_bytes =
            CommitmentProofBytes::try_from(channel_proof).map_err(Error::commitment_error)?;

        Proofs::new(channel_proof_bytes, None, None, height.increment())
            .map_err(Error::proof_error)
    }

    /// A `MsgRecvPacket` for the counterparty, proving the commitment of
    /// `packet` on this chain. A commitment at height `h` is provable under
    /// the consensus state of height `h + 1`, so the state is queried one
    /// block below `proof_height`.
    pub async fn build_recv_packet_msg(
        &self,
        packet: &Packet,
        target_signer: Signer,
        proof_height: Height,
    ) -> Result<Any, Error> {
        let trpc_client = self.tendermint_rpc_client()?;
        let query_height = proof_height.decrement().map_err(Error::type_error)?;

        let (_, maybe_proof) = trpc::packet::query_packet_commitment(
            &trpc_client,
            &packet.source_channel,
            &packet.source_port,
            &packet.sequence,
            QueryHeight::Specific(query_height),
            true,
        )
        .await?;

        let packet_proof = maybe_proof.ok_or_else(Error::empty_response_proof)?;

        let proofs = Proofs::new(
            CommitmentProofBytes::try_from(packet_proof).map_err(Error::commitment_error)?,
            None,
            None,
            proof_height,
        )
        .map_err(Error::proof_error)?;

        let recv_packet = MsgRecvPacket::new(packet.clone(), proofs, target_signer);

        Ok(recv_packet.to_any())
    }

    /// A `MsgAcknowledgement` for the chain that sent the packet, proving the
    /// ack written on this chain.
    pub async fn build_ack_msg(
        &self,
        write_ack: &WriteAcknowledgement,
        target_signer: Signer,
        proof_height: Height,
    ) -> Result<Any, Error> {
        let trpc_client = self.tendermint_rpc_client()?;
        let query_height = proof_height.decrement().map_err(Error::type_error)?;

        let (_, maybe_proof) = trpc::packet::query_packet_acknowledgement(
            &trpc_client,
            write_ack.dst_channel_id(),
            write_ack.dst_port_id(),
            &write_ack.sequence(),
            QueryHeight::Specific(query_height),
            true,
        )
        .await?;

        let ack_proof = maybe_proof.ok_or_else(Error::empty_response_proof)?;

        let proofs = Proofs::new(
            CommitmentProofBytes::try_from(ack_proof).map_err(Error::commitment_error)?,
            None,
            None,
            proof_height,
        )
        .map_err(Error::proof_error)?;

        let ack_msg = MsgAcknowledgement::new(
            write_ack.packet.clone(),
            write_ack.ack.clone(),
            proofs,
            target_signer,
        );

        Ok(ack_msg.to_any())
    }

    /// Whether this chain already stores a consensus state for `client_id`
    /// at exactly `target_height`.
    pub async fn has_consensus_state_at(
        &self,
        client_id: &ClientId,
        target_height: Height,
    ) -> bool {
        let trpc_client = match self.tendermint_rpc_client() {
            Ok(client) => client,
            Err(_) => return false,
        };

        let data = ClientConsensusStatePath {
            client_id: client_id.clone(),
            epoch: target_height.revision_number(),
            height: target_height.revision_height(),
        };

        let abci_query = trpc::abci::abci_query(
            &trpc_client,
            IBC_QUERY_PATH.to_string(),
            data.to_string(),
            QueryHeight::Latest.into(),
            false,
        )
        .await;

        match abci_query {
            Ok(result) => !result.value.is_empty(),
            Err(_) => false,
        }
    }
}
