use std::time::Duration;

use ibc_proto::google::protobuf::Any;
use ibc_proto::ibc::core::connection::v1::{
    MsgConnectionOpenAck as RawMsgConnectionOpenAck,
    MsgConnectionOpenConfirm as RawMsgConnectionOpenConfirm,
    MsgConnectionOpenInit as RawMsgConnectionOpenInit,
    MsgConnectionOpenTry as RawMsgConnectionOpenTry,
};

use super::connection::Counterparty;
use super::version::Version;
use crate::ibc_core::ics02_client::height::Height;
use crate::ibc_core::ics24_host::identifier::{ClientId, ConnectionId};
use crate::message::Msg;
use crate::proofs::Proofs;
use crate::signer::Signer;

pub const CONN_OPEN_INIT_TYPE_URL: &str = "/ibc.core.connection.v1.MsgConnectionOpenInit";
pub const CONN_OPEN_TRY_TYPE_URL: &str = "/ibc.core.connection.v1.MsgConnectionOpenTry";
pub const CONN_OPEN_ACK_TYPE_URL: &str = "/ibc.core.connection.v1.MsgConnectionOpenAck";
pub const CONN_OPEN_CONFIRM_TYPE_URL: &str = "/ibc.core.connection.v1.MsgConnectionOpenConfirm";

#[derive(Clone, Debug)]
pub struct MsgConnectionOpenInit {
    pub client_id: ClientId,
    pub counterparty: Counterparty,
    pub version: Option<Version>,
    pub delay_period: Duration,
    pub signer: Signer,
}

impl Msg for MsgConnectionOpenInit {
    type Raw = RawMsgConnectionOpenInit;

    fn type_url(&self) -> String {
        CONN_OPEN_INIT_TYPE_URL.to_string()
    }
}

impl From<MsgConnectionOpenInit> for RawMsgConnectionOpenInit {
    fn from(ics_msg: MsgConnectionOpenInit) -> Self {
        RawMsgConnectionOpenInit {
            client_id: ics_msg.client_id.to_string(),
            counterparty: Some(ics_msg.counterparty.into()),
            version: ics_msg.version.map(Into::into),
            delay_period: ics_msg.delay_period.as_nanos() as u64,
            signer: ics_msg.signer.to_string(),
        }
    }
}

/// The client state carried inside Try and Ack proves that the sending chain
/// tracks the receiver; `consensus_height` is that client's latest height.
#[derive(Clone, Debug)]
pub struct MsgConnectionOpenTry {
    pub client_id: ClientId,
    pub client_state: Option<Any>,
    pub counterparty: Counterparty,
    pub counterparty_versions: Vec<Version>,
    pub delay_period: Duration,
    pub proofs: Proofs,
    pub consensus_height: Option<Height>,
    pub signer: Signer,
}

impl Msg for MsgConnectionOpenTry {
    type Raw = RawMsgConnectionOpenTry;

    fn type_url(&self) -> String {
        CONN_OPEN_TRY_TYPE_URL.to_string()
    }
}

impl From<MsgConnectionOpenTry> for RawMsgConnectionOpenTry {
    fn from(ics_msg: MsgConnectionOpenTry) -> Self {
        #[allow(deprecated)]
        RawMsgConnectionOpenTry {
            client_id: ics_msg.client_id.to_string(),
            client_state: ics_msg.client_state,
            counterparty: Some(ics_msg.counterparty.into()),
            delay_period: ics_msg.delay_period.as_nanos() as u64,
            counterparty_versions: ics_msg
                .counterparty_versions
                .into_iter()
                .map(Into::into)
                .collect(),
            proof_height: Some(ics_msg.proofs.height().into()),
            proof_init: ics_msg.proofs.object_proof().clone().into(),
            proof_client: ics_msg
                .proofs
                .client_proof()
                .cloned()
                .map_or_else(Vec::new, Into::into),
            proof_consensus: ics_msg
                .proofs
                .consensus_proof()
                .map_or_else(Vec::new, |p| p.proof().clone().into()),
            consensus_height: ics_msg.consensus_height.map(Into::into),
            signer: ics_msg.signer.to_string(),
            ..Default::default()
        }
    }
}

#[derive(Clone, Debug)]
pub struct MsgConnectionOpenAck {
    pub connection_id: ConnectionId,
    pub counterparty_connection_id: ConnectionId,
    pub client_state: Option<Any>,
    pub version: Version,
    pub proofs: Proofs,
    pub consensus_height: Option<Height>,
    pub signer: Signer,
}

impl Msg for MsgConnectionOpenAck {
    type Raw = RawMsgConnectionOpenAck;

    fn type_url(&self) -> String {
        CONN_OPEN_ACK_TYPE_URL.to_string()
    }
}

impl From<MsgConnectionOpenAck> for RawMsgConnectionOpenAck {
    fn from(ics_msg: MsgConnectionOpenAck) -> Self {
        RawMsgConnectionOpenAck {
            connection_id: ics_msg.connection_id.to_string(),
            counterparty_connection_id: ics_msg.counterparty_connection_id.to_string(),
            version: Some(ics_msg.version.into()),
            client_state: ics_msg.client_state,
            proof_height: Some(ics_msg.proofs.height().into()),
            proof_try: ics_msg.proofs.object_proof().clone().into(),
            proof_client: ics_msg
                .proofs
                .client_proof()
                .cloned()
                .map_or_else(Vec::new, Into::into),
            proof_consensus: ics_msg
                .proofs
                .consensus_proof()
                .map_or_else(Vec::new, |p| p.proof().clone().into()),
            consensus_height: ics_msg.consensus_height.map(Into::into),
            signer: ics_msg.signer.to_string(),
            ..Default::default()
        }
    }
}

#[derive(Clone, Debug)]
pub struct MsgConnectionOpenConfirm {
    pub connection_id: ConnectionId,
    pub proofs: Proofs,
    pub signer: Signer,
}

impl Msg for MsgConnectionOpenConfirm {
    type Raw = RawMsgConnectionOpenConfirm;

    fn type_url(&self) -> String {
        CONN_OPEN_CONFIRM_TYPE_URL.to_string()
    }
}

impl From<MsgConnectionOpenConfirm> for RawMsgConnectionOpenConfirm {
    fn from(ics_msg: MsgConnectionOpenConfirm) -> Self {
        RawMsgConnectionOpenConfirm {
            connection_id: ics_msg.connection_id.to_string(),
            proof_ack: ics_msg.proofs.object_proof().clone().into(),
            proof_height: Some(ics_msg.proofs.height().into()),
            signer: ics_msg.signer.to_string(),
        }
    }
}

#[cfg(test)]
pub mod conn_msgs_tests {
    use std::str::FromStr;
    use std::time::Duration;

    use super::*;
    use crate::ibc_core::ics03_connection::connection::{default_prefix, Counterparty};
    use crate::ibc_core::ics23_commitment::commitment::CommitmentProofBytes;
    use crate::message::Msg;

    #[test]
    pub fn conn_open_init_to_any_works() {
        let msg = MsgConnectionOpenInit {
            client_id: ClientId::from_str("07-tendermint-0").unwrap(),
            counterparty: Counterparty::new(
                ClientId::from_str("07-tendermint-1").unwrap(),
                None,
                default_prefix(),
            ),
            version: Some(Version::default()),
            delay_period: Duration::from_secs(0),
            signer: Signer::from_str("cosmos1signer").unwrap(),
        };

        let any = msg.to_any();
        assert_eq!(any.type_url, CONN_OPEN_INIT_TYPE_URL);
        assert!(!any.value.is_empty());
    }

    #[test]
    pub fn conn_open_confirm_raw_works() {
        let proofs = Proofs::new(
            CommitmentProofBytes::try_from(vec![5u8, 6, 7]).unwrap(),
            None,
            None,
            Height::new(0, 12).unwrap(),
        )
        .unwrap();

        let msg = MsgConnectionOpenConfirm {
            connection_id: ConnectionId::new(4),
            proofs,
            signer: Signer::from_str("cosmos1signer").unwrap(),
        };

        let raw = RawMsgConnectionOpenConfirm::from(msg);
        assert_eq!(raw.connection_id, "connection-4");
        assert_eq!(raw.proof_ack, vec![5, 6, 7]);
        assert_eq!(raw.proof_height.unwrap().revision_height, 12);
    }
}
