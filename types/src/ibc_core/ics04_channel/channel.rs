use std::fmt::{Display, Error as FmtError, Formatter};
use std::str::FromStr;

use ibc_proto::ibc::core::channel::v1::{
    Channel as RawChannel, Counterparty as RawCounterparty,
};
use ibc_proto::Protobuf;
use serde::{Deserialize, Serialize};

use super::error::ChannelError;
use crate::ibc_core::ics24_host::identifier::{ChannelId, ConnectionId, PortId};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum State {
    Uninitialized = 0,
    Init = 1,
    TryOpen = 2,
    Open = 3,
    Closed = 4,
}

impl State {
    pub fn from_i32(s: i32) -> Result<Self, ChannelError> {
        match s {
            0 => Ok(Self::Uninitialized),
            1 => Ok(Self::Init),
            2 => Ok(Self::TryOpen),
            3 => Ok(Self::Open),
            4 => Ok(Self::Closed),
            _ => Err(ChannelError::invalid_state(s)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uninitialized => "UNINITIALIZED",
            Self::Init => "INIT",
            Self::TryOpen => "TRYOPEN",
            Self::Open => "OPEN",
            Self::Closed => "CLOSED",
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

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ordering {
    #[default]
    Unordered = 1,
    Ordered = 2,
}

impl Ordering {
    pub fn from_i32(o: i32) -> Result<Self, ChannelError> {
        match o {
            1 => Ok(Self::Unordered),
            2 => Ok(Self::Ordered),
            _ => Err(ChannelError::invalid_ordering(o)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unordered => "ORDER_UNORDERED",
            Self::Ordered => "ORDER_ORDERED",
        }
    }
}

impl Display for Ordering {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Ordering {
    type Err = ChannelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "unordered" | "order_unordered" => Ok(Self::Unordered),
            "ordered" | "order_ordered" => Ok(Self::Ordered),
            _ => Err(ChannelError::invalid_ordering(-1)),
        }
    }
}

/// A channel version string, echoed unchanged through the handshake.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version(String);

impl Version {
    pub fn new(version: String) -> Self {
        Self(version)
    }

    pub fn empty() -> Self {
        Self(String::new())
    }

    pub fn ics20() -> Self {
        Self("ics20-1".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Version {
    fn from(version: String) -> Self {
        Self(version)
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Counterparty {
    pub port_id: PortId,
    pub channel_id: Option<ChannelId>,
}

impl Counterparty {
    pub fn new(port_id: PortId, channel_id: Option<ChannelId>) -> Self {
        Self {
            port_id,
            channel_id,
        }
    }

    pub fn port_id(&self) -> &PortId {
        &self.port_id
    }

    pub fn channel_id(&self) -> Option<&ChannelId> {
        self.channel_id.as_ref()
    }
}

impl TryFrom<RawCounterparty> for Counterparty {
    type Error = ChannelError;

    fn try_from(raw: RawCounterparty) -> Result<Self, Self::Error> {
        let channel_id = if raw.channel_id.is_empty() {
            None
        } else {
            Some(
                raw.channel_id
                    .parse()
                    .map_err(ChannelError::invalid_identifier)?,
            )
        };

        Ok(Counterparty {
            port_id: raw
                .port_id
                .parse()
                .map_err(ChannelError::invalid_identifier)?,
            channel_id,
        })
    }
}

impl From<Counterparty> for RawCounterparty {
    fn from(counterparty: Counterparty) -> Self {
        RawCounterparty {
            port_id: counterparty.port_id.to_string(),
            channel_id: counterparty
                .channel_id
                .map_or_else(String::new, |id| id.to_string()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelEnd {
    state: State,
    ordering: Ordering,
    counterparty: Counterparty,
    connection_hops: Vec<ConnectionId>,
    version: Version,
}

impl Default for ChannelEnd {
    fn default() -> Self {
        Self {
            state: State::Uninitialized,
            ordering: Ordering::Unordered,
            counterparty: Counterparty::new(PortId::transfer(), None),
            connection_hops: vec![],
            version: Version::empty(),
        }
    }
}

impl ChannelEnd {
    pub fn new(
        state: State,
        ordering: Ordering,
        counterparty: Counterparty,
        connection_hops: Vec<ConnectionId>,
        version: Version,
    ) -> Self {
        Self {
            state,
            ordering,
            counterparty,
            connection_hops,
            version,
        }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn state_matches(&self, other: &State) -> bool {
        self.state == *other
    }

    pub fn ordering(&self) -> &Ordering {
        &self.ordering
    }

    pub fn counterparty(&self) -> &Counterparty {
        &self.counterparty
    }

    pub fn connection_hops(&self) -> &[ConnectionId] {
        &self.connection_hops
    }

    pub fn version(&self) -> &Version {
        &self.version
    }
}

impl Protobuf<RawChannel> for ChannelEnd {}

impl TryFrom<RawChannel> for ChannelEnd {
    type Error = ChannelError;

    fn try_from(raw: RawChannel) -> Result<Self, Self::Error> {
        let state = State::from_i32(raw.state)?;

        // An uninitialized end carries no decodable identifiers.
        if matches!(state, State::Uninitialized) {
            return Ok(ChannelEnd::default());
        }

        Ok(ChannelEnd {
            state,
            ordering: Ordering::from_i32(raw.ordering)?,
            counterparty: raw
                .counterparty
                .ok_or_else(ChannelError::missing_counterparty)?
                .try_into()?,
            connection_hops: raw
                .connection_hops
                .into_iter()
                .map(|hop| hop.parse().map_err(ChannelError::invalid_identifier))
                .collect::<Result<Vec<_>, _>>()?,
            version: raw.version.into(),
        })
    }
}

impl From<ChannelEnd> for RawChannel {
    fn from(end: ChannelEnd) -> Self {
        RawChannel {
            state: end.state as i32,
            ordering: end.ordering as i32,
            counterparty: Some(end.counterparty.into()),
            connection_hops: end
                .connection_hops
                .into_iter()
                .map(|hop| hop.to_string())
                .collect(),
            version: end.version.to_string(),
            ..Default::default()
        }
    }
}

impl Display for ChannelEnd {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(
            f,
            "ChannelEnd {{ state: {}, ordering: {}, counterparty: {}/{:?}, version: {} }}",
            self.state,
            self.ordering,
            self.counterparty.port_id(),
            self.counterparty.channel_id(),
            self.version,
        )
    }
}

/// Check that an actual channel end does not contradict the end the next
/// handshake step expects.
pub fn check_target_channel_state(
    channel_id: &ChannelId,
    actual: &ChannelEnd,
    expected: &ChannelEnd,
) -> Result<(), ChannelError> {
    let good_connection_hops = actual.connection_hops() == expected.connection_hops();
    let good_state = (*actual.state() as u32) <= (*expected.state() as u32);

    let good_channel_port_ids = actual.counterparty().channel_id().is_none()
        || actual.counterparty().channel_id() == expected.counterparty().channel_id()
            && actual.counterparty().port_id() == expected.counterparty().port_id();

    if good_state && good_connection_hops && good_channel_port_ids {
        Ok(())
    } else {
        Err(ChannelError::unexpected_channel_state(
            channel_id.clone(),
            expected.state().to_string(),
            actual.state().to_string(),
        ))
    }
}

#[cfg(test)]
pub mod channel_tests {
    use ibc_proto::ibc::core::channel::v1::Channel as RawChannel;

    use super::{ChannelEnd, Counterparty, Ordering, State, Version};
    use crate::ibc_core::ics24_host::identifier::{ChannelId, ConnectionId, PortId};

    fn sample_end(state: State) -> ChannelEnd {
        ChannelEnd::new(
            state,
            Ordering::Unordered,
            Counterparty::new(PortId::transfer(), Some(ChannelId::new(9))),
            vec![ConnectionId::new(0)],
            Version::ics20(),
        )
    }

    #[test]
    pub fn ordering_parse_works() {
        assert_eq!("unordered".parse::<Ordering>().unwrap(), Ordering::Unordered);
        assert_eq!(
            "ORDER_ORDERED".parse::<Ordering>().unwrap(),
            Ordering::Ordered
        );
        assert!("chaotic".parse::<Ordering>().is_err());
    }

    #[test]
    pub fn raw_roundtrip_works() {
        let end = sample_end(State::Open);
        let raw = RawChannel::from(end.clone());
        let back = ChannelEnd::try_from(raw).expect("channel from raw error!");

        assert_eq!(end, back);
    }

    #[test]
    pub fn uninitialized_raw_is_default() {
        let raw = RawChannel::default();
        let end = ChannelEnd::try_from(raw).expect("channel from raw error!");
        assert!(end.state_matches(&State::Uninitialized));
    }

    #[test]
    pub fn check_target_channel_state_works() {
        let channel_id = ChannelId::new(9);
        let actual = sample_end(State::Init);
        let expected = sample_end(State::TryOpen);

        assert!(super::check_target_channel_state(&channel_id, &actual, &expected).is_ok());
        assert!(super::check_target_channel_state(&channel_id, &expected, &actual).is_err());
    }
}
