use std::fmt::{Debug, Error as FmtError, Formatter};

use ibc_proto::google::protobuf::Any;
use ibc_proto::ibc::lightclients::tendermint::v1::Header as RawHeader;
use ibc_proto::Protobuf;
use tendermint::block::signed_header::SignedHeader;
use tendermint::validator::Set as ValidatorSet;

use crate::error::TypesError;
use crate::ibc_core::ics02_client::height::Height;
use crate::ibc_core::ics24_host::identifier::ChainId;

pub const TENDERMINT_HEADER_TYPE_URL: &str = "/ibc.lightclients.tendermint.v1.Header";

/// A header as submitted in `MsgUpdateClient`: the new signed header plus the
/// trusted state the on-chain client verifies it against.
#[derive(Clone, PartialEq, Eq)]
pub struct Header {
    pub signed_header: SignedHeader,
    pub validator_set: ValidatorSet,
    pub trusted_height: Height,
    pub trusted_validator_set: ValidatorSet,
}

impl Header {
    pub fn height(&self) -> Height {
        let chain_id = ChainId::from_string(self.signed_header.header.chain_id.as_str());
        Height::from_tm(self.signed_header.header.height, &chain_id)
    }
}

impl Debug for Header {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(
            f,
            "Header {{ height: {}, trusted_height: {} }}",
            self.height(),
            self.trusted_height
        )
    }
}

impl Protobuf<RawHeader> for Header {}

impl TryFrom<RawHeader> for Header {
    type Error = TypesError;

    fn try_from(raw: RawHeader) -> Result<Self, Self::Error> {
        let signed_header = raw
            .signed_header
            .ok_or_else(|| TypesError::missing_raw_field("signed_header".to_string()))?
            .try_into()
            .map_err(|_| TypesError::tendermint_conversion("signed_header".to_string()))?;

        let validator_set = raw
            .validator_set
            .ok_or_else(|| TypesError::missing_raw_field("validator_set".to_string()))?
            .try_into()
            .map_err(|_| TypesError::tendermint_conversion("validator_set".to_string()))?;

        let trusted_validator_set = raw
            .trusted_validators
            .ok_or_else(|| TypesError::missing_raw_field("trusted_validators".to_string()))?
            .try_into()
            .map_err(|_| TypesError::tendermint_conversion("trusted_validators".to_string()))?;

        Ok(Self {
            signed_header,
            validator_set,
            trusted_height: raw
                .trusted_height
                .ok_or_else(|| TypesError::missing_raw_field("trusted_height".to_string()))?
                .try_into()?,
            trusted_validator_set,
        })
    }
}

impl From<Header> for RawHeader {
    fn from(header: Header) -> Self {
        RawHeader {
            signed_header: Some(header.signed_header.into()),
            validator_set: Some(header.validator_set.into()),
            trusted_height: Some(header.trusted_height.into()),
            trusted_validators: Some(header.trusted_validator_set.into()),
        }
    }
}

impl From<Header> for Any {
    fn from(header: Header) -> Self {
        Any {
            type_url: TENDERMINT_HEADER_TYPE_URL.to_string(),
            value: Protobuf::<RawHeader>::encode_vec(header),
        }
    }
}
