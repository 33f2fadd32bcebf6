use std::time::Duration;

use ibc_proto::google::protobuf::{Any, Duration as RawDuration};
use ibc_proto::ibc::lightclients::tendermint::v1::ClientState as RawClientState;
use ibc_proto::Protobuf;
use ics23::ProofSpec;
use prost::Message;
use tendermint_light_client_verifier::options::Options;

use super::trust_level::TrustThreshold;
use crate::error::TypesError;
use crate::ibc_core::ics02_client::height::Height;
use crate::ibc_core::ics24_host::identifier::ChainId;

pub const TENDERMINT_CLIENT_STATE_TYPE_URL: &str = "/ibc.lightclients.tendermint.v1.ClientState";

/// Deprecated upstream, but `MsgCreateClient` still requires both flags.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AllowUpdate {
    pub after_expiry: bool,
    pub after_misbehaviour: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ClientState {
    pub chain_id: ChainId,
    pub trust_threshold: TrustThreshold,
    pub trusting_period: Duration,
    pub unbonding_period: Duration,
    pub max_clock_drift: Duration,
    pub latest_height: Height,
    pub proof_specs: Vec<ProofSpec>,
    pub upgrade_path: Vec<String>,
    pub allow_update: AllowUpdate,
    pub frozen_height: Option<Height>,
}

impl ClientState {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        chain_id: ChainId,
        trust_threshold: TrustThreshold,
        trusting_period: Duration,
        unbonding_period: Duration,
        max_clock_drift: Duration,
        latest_height: Height,
        proof_specs: Vec<ProofSpec>,
        upgrade_path: Vec<String>,
        allow_update: AllowUpdate,
    ) -> Result<Self, TypesError> {
        if trusting_period >= unbonding_period {
            return Err(TypesError::invalid_client_state(format!(
                "trusting period {:?} must be smaller than unbonding period {:?}",
                trusting_period, unbonding_period,
            )));
        }

        if trusting_period.is_zero() {
            return Err(TypesError::invalid_client_state(
                "trusting period must be positive".to_string(),
            ));
        }

        Ok(Self {
            chain_id,
            trust_threshold,
            trusting_period,
            unbonding_period,
            max_clock_drift,
            latest_height,
            proof_specs,
            upgrade_path,
            allow_update,
            frozen_height: None,
        })
    }

    pub fn latest_height(&self) -> Height {
        self.latest_height
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen_height.is_some()
    }

    pub fn as_light_client_options(&self) -> Result<Options, TypesError> {
        let trust_threshold = tendermint::trust_threshold::TrustThresholdFraction::new(
            self.trust_threshold.numerator(),
            self.trust_threshold.denominator(),
        )
        .map_err(|_| {
            TypesError::invalid_trust_threshold(
                self.trust_threshold.numerator(),
                self.trust_threshold.denominator(),
            )
        })?;

        Ok(Options {
            trust_threshold,
            trusting_period: self.trusting_period,
            clock_drift: self.max_clock_drift,
        })
    }
}

/// The default pair of proof specs used by Cosmos-SDK chains: one for the
/// iavl store, one for the multistore above it.
pub fn cosmos_proof_specs() -> Vec<ProofSpec> {
    vec![ics23::iavl_spec(), ics23::tendermint_spec()]
}

fn raw_duration(duration: Duration) -> RawDuration {
    RawDuration {
        seconds: duration.as_secs() as i64,
        nanos: duration.subsec_nanos() as i32,
    }
}

fn parse_raw_duration(raw: Option<RawDuration>, field: &str) -> Result<Duration, TypesError> {
    let raw = raw.ok_or_else(|| TypesError::missing_raw_field(field.to_string()))?;
    Ok(Duration::new(raw.seconds as u64, raw.nanos as u32))
}

impl Protobuf<RawClientState> for ClientState {}

impl TryFrom<RawClientState> for ClientState {
    type Error = TypesError;

    fn try_from(raw: RawClientState) -> Result<Self, Self::Error> {
        let trust_level = raw
            .trust_level
            .ok_or_else(|| TypesError::missing_raw_field("trust_level".to_string()))?;

        let frozen_height = raw
            .frozen_height
            .filter(|h| h.revision_number != 0 || h.revision_height != 0)
            .map(Height::try_from)
            .transpose()?;

        Ok(Self {
            chain_id: ChainId::from_string(&raw.chain_id),
            trust_threshold: trust_level.try_into()?,
            trusting_period: parse_raw_duration(raw.trusting_period, "trusting_period")?,
            unbonding_period: parse_raw_duration(raw.unbonding_period, "unbonding_period")?,
            max_clock_drift: parse_raw_duration(raw.max_clock_drift, "max_clock_drift")?,
            latest_height: raw
                .latest_height
                .ok_or_else(|| TypesError::missing_raw_field("latest_height".to_string()))?
                .try_into()?,
            proof_specs: raw.proof_specs,
            upgrade_path: raw.upgrade_path,
            allow_update: AllowUpdate {
                after_expiry: raw.allow_update_after_expiry,
                after_misbehaviour: raw.allow_update_after_misbehaviour,
            },
            frozen_height,
        })
    }
}

impl From<ClientState> for RawClientState {
    fn from(state: ClientState) -> Self {
        #[allow(deprecated)]
        RawClientState {
            chain_id: state.chain_id.to_string(),
            trust_level: Some(state.trust_threshold.into()),
            trusting_period: Some(raw_duration(state.trusting_period)),
            unbonding_period: Some(raw_duration(state.unbonding_period)),
            max_clock_drift: Some(raw_duration(state.max_clock_drift)),
            frozen_height: state.frozen_height.map(Into::into),
            latest_height: Some(state.latest_height.into()),
            proof_specs: state.proof_specs,
            upgrade_path: state.upgrade_path,
            allow_update_after_expiry: state.allow_update.after_expiry,
            allow_update_after_misbehaviour: state.allow_update.after_misbehaviour,
        }
    }
}

impl Protobuf<Any> for ClientState {}

impl TryFrom<Any> for ClientState {
    type Error = TypesError;

    fn try_from(any: Any) -> Result<Self, Self::Error> {
        if any.type_url != TENDERMINT_CLIENT_STATE_TYPE_URL {
            return Err(TypesError::invalid_client_state(format!(
                "unexpected type url: {}",
                any.type_url
            )));
        }

        let raw = RawClientState::decode(any.value.as_slice()).map_err(|_| {
            TypesError::invalid_client_state("client state decode failed".to_string())
        })?;

        raw.try_into()
    }
}

impl From<ClientState> for Any {
    fn from(state: ClientState) -> Self {
        Any {
            type_url: TENDERMINT_CLIENT_STATE_TYPE_URL.to_string(),
            value: Protobuf::<RawClientState>::encode_vec(state),
        }
    }
}

#[cfg(test)]
pub mod client_state_tests {
    use std::time::Duration;

    use ibc_proto::google::protobuf::Any;

    use super::{cosmos_proof_specs, AllowUpdate, ClientState};
    use crate::ibc_core::ics02_client::height::Height;
    use crate::ibc_core::ics24_host::identifier::ChainId;
    use crate::light_clients::ics07_tendermint::trust_level::TrustThreshold;

    pub fn sample_client_state() -> ClientState {
        ClientState::new(
            ChainId::from_string("ibc-1"),
            TrustThreshold::ONE_THIRD,
            Duration::from_secs(5_000),
            Duration::from_secs(1_814_400),
            Duration::from_secs(30),
            Height::new(1, 20).unwrap(),
            cosmos_proof_specs(),
            vec!["upgrade".to_string(), "upgradedIBCState".to_string()],
            AllowUpdate {
                after_expiry: true,
                after_misbehaviour: true,
            },
        )
        .expect("client state new error!")
    }

    #[test]
    pub fn trusting_period_bound_works() {
        let result = ClientState::new(
            ChainId::from_string("ibc-1"),
            TrustThreshold::ONE_THIRD,
            Duration::from_secs(10),
            Duration::from_secs(10),
            Duration::from_secs(30),
            Height::new(1, 20).unwrap(),
            cosmos_proof_specs(),
            vec![],
            AllowUpdate {
                after_expiry: true,
                after_misbehaviour: true,
            },
        );

        assert!(result.is_err());
    }

    #[test]
    pub fn any_roundtrip_works() {
        let state = sample_client_state();
        let any = Any::from(state.clone());
        let back = ClientState::try_from(any).expect("client state from any error!");

        assert_eq!(state, back);
    }

    #[test]
    pub fn light_client_options_works() {
        let state = sample_client_state();
        let options = state.as_light_client_options().expect("options error!");

        assert_eq!(options.trusting_period, Duration::from_secs(5_000));
        assert_eq!(options.trust_threshold.numerator(), 1);
        assert_eq!(options.trust_threshold.denominator(), 3);
    }
}
