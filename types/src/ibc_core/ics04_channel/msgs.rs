use ibc_proto::ibc::core::channel::v1::{
    MsgAcknowledgement as RawMsgAcknowledgement, MsgChannelOpenAck as RawMsgChannelOpenAck,
    MsgChannelOpenConfirm as RawMsgChannelOpenConfirm, MsgChannelOpenInit as RawMsgChannelOpenInit,
    MsgChannelOpenTry as RawMsgChannelOpenTry, MsgRecvPacket as RawMsgRecvPacket,
};

use super::channel::{ChannelEnd, Version};
use super::packet::Packet;
use crate::ibc_core::ics24_host::identifier::{ChannelId, PortId};
use crate::message::Msg;
use crate::proofs::Proofs;
use crate::signer::Signer;

pub const CHAN_OPEN_INIT_TYPE_URL: &str = "/ibc.core.channel.v1.MsgChannelOpenInit";
pub const CHAN_OPEN_TRY_TYPE_URL: &str = "/ibc.core.channel.v1.MsgChannelOpenTry";
pub const CHAN_OPEN_ACK_TYPE_URL: &str = "/ibc.core.channel.v1.MsgChannelOpenAck";
pub const CHAN_OPEN_CONFIRM_TYPE_URL: &str = "/ibc.core.channel.v1.MsgChannelOpenConfirm";
pub const RECV_PACKET_TYPE_URL: &str = "/ibc.core.channel.v1.MsgRecvPacket";
pub const ACKNOWLEDGEMENT_TYPE_URL: &str = "/ibc.core.channel.v1.MsgAcknowledgement";

#[derive(Clone, Debug)]
pub struct MsgChannelOpenInit {
    pub port_id: PortId,
    pub channel: ChannelEnd,
    pub signer: Signer,
}

impl Msg for MsgChannelOpenInit {
    type Raw = RawMsgChannelOpenInit;

    fn type_url(&self) -> String {
        CHAN_OPEN_INIT_TYPE_URL.to_string()
    }
}

impl From<MsgChannelOpenInit> for RawMsgChannelOpenInit {
    fn from(domain_msg: MsgChannelOpenInit) -> Self {
        RawMsgChannelOpenInit {
            port_id: domain_msg.port_id.to_string(),
            channel: Some(domain_msg.channel.into()),
            signer: domain_msg.signer.to_string(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct MsgChannelOpenTry {
    pub port_id: PortId,
    pub channel: ChannelEnd,
    pub counterparty_version: Version,
    pub proofs: Proofs,
    pub signer: Signer,
}

impl Msg for MsgChannelOpenTry {
    type Raw = RawMsgChannelOpenTry;

    fn type_url(&self) -> String {
        CHAN_OPEN_TRY_TYPE_URL.to_string()
    }
}

impl From<MsgChannelOpenTry> for RawMsgChannelOpenTry {
    fn from(domain_msg: MsgChannelOpenTry) -> Self {
        #[allow(deprecated)]
        RawMsgChannelOpenTry {
            port_id: domain_msg.port_id.to_string(),
            previous_channel_id: String::new(),
            channel: Some(domain_msg.channel.into()),
            counterparty_version: domain_msg.counterparty_version.to_string(),
            proof_init: domain_msg.proofs.object_proof().clone().into(),
            proof_height: Some(domain_msg.proofs.height().into()),
            signer: domain_msg.signer.to_string(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct MsgChannelOpenAck {
    pub port_id: PortId,
    pub channel_id: ChannelId,
    pub counterparty_channel_id: ChannelId,
    pub counterparty_version: Version,
    pub proofs: Proofs,
    pub signer: Signer,
}

impl Msg for MsgChannelOpenAck {
    type Raw = RawMsgChannelOpenAck;

    fn type_url(&self) -> String {
        CHAN_OPEN_ACK_TYPE_URL.to_string()
    }
}

impl From<MsgChannelOpenAck> for RawMsgChannelOpenAck {
    fn from(domain_msg: MsgChannelOpenAck) -> Self {
        RawMsgChannelOpenAck {
            port_id: domain_msg.port_id.to_string(),
            channel_id: domain_msg.channel_id.to_string(),
            counterparty_channel_id: domain_msg.counterparty_channel_id.to_string(),
            counterparty_version: domain_msg.counterparty_version.to_string(),
            proof_try: domain_msg.proofs.object_proof().clone().into(),
            proof_height: Some(domain_msg.proofs.height().into()),
            signer: domain_msg.signer.to_string(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct MsgChannelOpenConfirm {
    pub port_id: PortId,
    pub channel_id: ChannelId,
    pub proofs: Proofs,
    pub signer: Signer,
}

impl Msg for MsgChannelOpenConfirm {
    type Raw = RawMsgChannelOpenConfirm;

    fn type_url(&self) -> String {
        CHAN_OPEN_CONFIRM_TYPE_URL.to_string()
    }
}

impl From<MsgChannelOpenConfirm> for RawMsgChannelOpenConfirm {
    fn from(domain_msg: MsgChannelOpenConfirm) -> Self {
        RawMsgChannelOpenConfirm {
            port_id: domain_msg.port_id.to_string(),
            channel_id: domain_msg.channel_id.to_string(),
            proof_ack: domain_msg.proofs.object_proof().clone().into(),
            proof_height: Some(domain_msg.proofs.height().into()),
            signer: domain_msg.signer.to_string(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct MsgRecvPacket {
    pub packet: Packet,
    pub proofs: Proofs,
    pub signer: Signer,
}

impl MsgRecvPacket {
    pub fn new(packet: Packet, proofs: Proofs, signer: Signer) -> Self {
        Self {
            packet,
            proofs,
            signer,
        }
    }
}

impl Msg for MsgRecvPacket {
    type Raw = RawMsgRecvPacket;

    fn type_url(&self) -> String {
        RECV_PACKET_TYPE_URL.to_string()
    }
}

impl From<MsgRecvPacket> for RawMsgRecvPacket {
    fn from(domain_msg: MsgRecvPacket) -> Self {
        RawMsgRecvPacket {
            packet: Some(domain_msg.packet.into()),
            proof_commitment: domain_msg.proofs.object_proof().clone().into(),
            proof_height: Some(domain_msg.proofs.height().into()),
            signer: domain_msg.signer.to_string(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct MsgAcknowledgement {
    pub packet: Packet,
    pub acknowledgement: Vec<u8>,
    pub proofs: Proofs,
    pub signer: Signer,
}

impl MsgAcknowledgement {
    pub fn new(packet: Packet, acknowledgement: Vec<u8>, proofs: Proofs, signer: Signer) -> Self {
        Self {
            packet,
            acknowledgement,
            proofs,
            signer,
        }
    }
}

impl Msg for MsgAcknowledgement {
    type Raw = RawMsgAcknowledgement;

    fn type_url(&self) -> String {
        ACKNOWLEDGEMENT_TYPE_URL.to_string()
    }
}

impl From<MsgAcknowledgement> for RawMsgAcknowledgement {
    fn from(domain_msg: MsgAcknowledgement) -> Self {
        RawMsgAcknowledgement {
            packet: Some(domain_msg.packet.into()),
            acknowledgement: domain_msg.acknowledgement,
            proof_acked: domain_msg.proofs.object_proof().clone().into(),
            proof_height: Some(domain_msg.proofs.height().into()),
            signer: domain_msg.signer.to_string(),
        }
    }
}

#[cfg(test)]
pub mod chan_msgs_tests {
    use std::str::FromStr;

    use super::*;
    use crate::ibc_core::ics02_client::height::Height;
    use crate::ibc_core::ics04_channel::packet::packet_tests::sample_packet;
    use crate::ibc_core::ics23_commitment::commitment::CommitmentProofBytes;

    fn sample_proofs() -> Proofs {
        Proofs::new(
            CommitmentProofBytes::try_from(vec![9u8, 9, 9]).unwrap(),
            None,
            None,
            Height::new(0, 105).unwrap(),
        )
        .unwrap()
    }

    #[test]
    pub fn recv_packet_to_any_works() {
        let msg = MsgRecvPacket::new(
            sample_packet(1),
            sample_proofs(),
            Signer::from_str("cosmos1signer").unwrap(),
        );

        let any = msg.to_any();
        assert_eq!(any.type_url, RECV_PACKET_TYPE_URL);
        assert!(!any.value.is_empty());
    }

    #[test]
    pub fn acknowledgement_raw_works() {
        let msg = MsgAcknowledgement::new(
            sample_packet(2),
            b"ack".to_vec(),
            sample_proofs(),
            Signer::from_str("cosmos1signer").unwrap(),
        );

        let raw = RawMsgAcknowledgement::from(msg);
        assert_eq!(raw.acknowledgement, b"ack".to_vec());
        assert_eq!(raw.proof_acked, vec![9, 9, 9]);
        assert_eq!(raw.packet.unwrap().sequence, 2);
    }
}
