use std::fmt::{Display, Error as FmtError, Formatter};
use std::str::FromStr;
use std::time::Duration;

use ibc_proto::ibc::core::connection::v1::{
    ConnectionEnd as RawConnectionEnd, Counterparty as RawCounterparty,
};
use ibc_proto::Protobuf;

use super::error::ConnectionError;
use super::version::Version;
use crate::ibc_core::ics23_commitment::commitment::CommitmentPrefix;
use crate::ibc_core::ics24_host::identifier::{ClientId, ConnectionId};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum State {
    Uninitialized = 0,
    Init = 1,
    TryOpen = 2,
    Open = 3,
}

impl State {
    pub fn from_i32(s: i32) -> Result<Self, ConnectionError> {
        match s {
            0 => Ok(Self::Uninitialized),
            1 => Ok(Self::Init),
            2 => Ok(Self::TryOpen),
            3 => Ok(Self::Open),
            _ => Err(ConnectionError::invalid_state(s)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uninitialized => "UNINITIALIZED",
            Self::Init => "INIT",
            Self::TryOpen => "TRYOPEN",
            Self::Open => "OPEN",
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open)
    }
}

impl Display for State {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Counterparty {
    client_id: ClientId,
    connection_id: Option<ConnectionId>,
    prefix: CommitmentPrefix,
}

impl Counterparty {
    pub fn new(
        client_id: ClientId,
        connection_id: Option<ConnectionId>,
        prefix: CommitmentPrefix,
    ) -> Self {
        Self {
            client_id,
            connection_id,
            prefix,
        }
    }

    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    pub fn connection_id(&self) -> Option<&ConnectionId> {
        self.connection_id.as_ref()
    }

    pub fn prefix(&self) -> &CommitmentPrefix {
        &self.prefix
    }
}

impl TryFrom<RawCounterparty> for Counterparty {
    type Error = ConnectionError;

    fn try_from(raw: RawCounterparty) -> Result<Self, Self::Error> {
        let connection_id = if raw.connection_id.is_empty() {
            None
        } else {
            Some(
                raw.connection_id
                    .parse()
                    .map_err(ConnectionError::invalid_identifier)?,
            )
        };

        Ok(Counterparty {
            client_id: raw
                .client_id
                .parse()
                .map_err(ConnectionError::invalid_identifier)?,
            connection_id,
            prefix: raw
                .prefix
                .ok_or_else(ConnectionError::missing_counterparty_prefix)?
                .into(),
        })
    }
}

impl From<Counterparty> for RawCounterparty {
    fn from(counterparty: Counterparty) -> Self {
        RawCounterparty {
            client_id: counterparty.client_id.to_string(),
            connection_id: counterparty
                .connection_id
                .map_or_else(String::new, |id| id.to_string()),
            prefix: Some(counterparty.prefix.into()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConnectionEnd {
    state: State,
    client_id: ClientId,
    counterparty: Counterparty,
    versions: Vec<Version>,
    delay_period: Duration,
}

impl ConnectionEnd {
    pub fn new(
        state: State,
        client_id: ClientId,
        counterparty: Counterparty,
        versions: Vec<Version>,
        delay_period: Duration,
    ) -> Self {
        Self {
            state,
            client_id,
            counterparty,
            versions,
            delay_period,
        }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn state_matches(&self, other: &State) -> bool {
        self.state == *other
    }

    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    pub fn counterparty(&self) -> &Counterparty {
        &self.counterparty
    }

    pub fn versions(&self) -> &[Version] {
        &self.versions
    }

    pub fn delay_period(&self) -> Duration {
        self.delay_period
    }
}

impl Protobuf<RawConnectionEnd> for ConnectionEnd {}

impl TryFrom<RawConnectionEnd> for ConnectionEnd {
    type Error = ConnectionError;

    fn try_from(raw: RawConnectionEnd) -> Result<Self, Self::Error> {
        Ok(Self {
            state: State::from_i32(raw.state)?,
            client_id: raw
                .client_id
                .parse()
                .map_err(ConnectionError::invalid_identifier)?,
            counterparty: raw
                .counterparty
                .ok_or_else(ConnectionError::missing_counterparty)?
                .try_into()?,
            versions: raw.versions.into_iter().map(Version::from).collect(),
            delay_period: Duration::from_nanos(raw.delay_period),
        })
    }
}

impl From<ConnectionEnd> for RawConnectionEnd {
    fn from(end: ConnectionEnd) -> Self {
        RawConnectionEnd {
            state: end.state as i32,
            client_id: end.client_id.to_string(),
            counterparty: Some(end.counterparty.into()),
            versions: end.versions.into_iter().map(Into::into).collect(),
            delay_period: end.delay_period.as_nanos() as u64,
        }
    }
}

impl Display for ConnectionEnd {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(
            f,
            "ConnectionEnd {{ state: {}, client_id: {}, counterparty_client_id: {}, counterparty_connection_id: {:?} }}",
            self.state,
            self.client_id,
            self.counterparty.client_id(),
            self.counterparty.connection_id(),
        )
    }
}

pub fn default_prefix() -> CommitmentPrefix {
    CommitmentPrefix::try_from(b"ibc".to_vec()).expect("static prefix is non-empty")
}

impl FromStr for State {
    type Err = ConnectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "UNINITIALIZED" | "STATE_UNINITIALIZED_UNSPECIFIED" => Ok(Self::Uninitialized),
            "INIT" | "STATE_INIT" => Ok(Self::Init),
            "TRYOPEN" | "STATE_TRYOPEN" => Ok(Self::TryOpen),
            "OPEN" | "STATE_OPEN" => Ok(Self::Open),
            _ => Err(ConnectionError::invalid_state(-1)),
        }
    }
}

#[cfg(test)]
pub mod connection_tests {
    use std::str::FromStr;
    use std::time::Duration;

    use ibc_proto::ibc::core::connection::v1::ConnectionEnd as RawConnectionEnd;

    use super::{default_prefix, ConnectionEnd, Counterparty, State};
    use crate::ibc_core::ics03_connection::version::Version;
    use crate::ibc_core::ics24_host::identifier::{ClientId, ConnectionId};

    fn sample_end() -> ConnectionEnd {
        ConnectionEnd::new(
            State::Open,
            ClientId::from_str("07-tendermint-0").unwrap(),
            Counterparty::new(
                ClientId::from_str("07-tendermint-5").unwrap(),
                Some(ConnectionId::new(3)),
                default_prefix(),
            ),
            vec![Version::default()],
            Duration::from_secs(0),
        )
    }

    #[test]
    pub fn state_from_i32_works() {
        assert_eq!(State::from_i32(3).unwrap(), State::Open);
        assert!(State::from_i32(9).is_err());
        assert!(State::Open.is_open());
        assert!(!State::Init.is_open());
    }

    #[test]
    pub fn raw_roundtrip_works() {
        let end = sample_end();
        let raw = RawConnectionEnd::from(end.clone());
        let back = ConnectionEnd::try_from(raw).expect("connection from raw error!");

        assert_eq!(end, back);
    }

    #[test]
    pub fn missing_counterparty_fails() {
        let raw = RawConnectionEnd {
            state: 3,
            client_id: "07-tendermint-0".to_string(),
            counterparty: None,
            versions: vec![],
            delay_period: 0,
        };

        assert!(ConnectionEnd::try_from(raw).is_err());
    }
}
