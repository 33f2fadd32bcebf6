use std::fmt::{Display, Error as FmtError, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::IdentifierError;

pub const TENDERMINT_CLIENT_PREFIX: &str = "07-tendermint";

const ID_MIN_LEN: usize = 1;
const ID_MAX_LEN: usize = 64;

fn validate_identifier(id: &str, min: usize, max: usize) -> Result<(), IdentifierError> {
    if id.trim().is_empty() {
        return Err(IdentifierError::empty());
    }

    if id.len() < min || id.len() > max {
        return Err(IdentifierError::invalid_length(
            id.to_string(),
            id.len(),
            min,
            max,
        ));
    }

    if !id
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '.' | '_' | '+' | '-' | '#' | '[' | ']' | '<' | '>'))
    {
        return Err(IdentifierError::invalid_character(id.to_string()));
    }

    Ok(())
}

/// A chain identifier of the form `{name}-{revision}`, where the revision
/// number is `0` for identifiers that do not follow the epoch format.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ChainId {
    id: String,
    version: u64,
}

impl ChainId {
    pub fn new(name: String, version: u64) -> Self {
        Self {
            id: format!("{name}-{version}"),
            version,
        }
    }

    pub fn from_string(id: &str) -> Self {
        Self {
            id: id.to_string(),
            version: Self::chain_version(id),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.id
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Extract the revision number from a chain identifier in epoch format.
    pub fn chain_version(chain_id: &str) -> u64 {
        if !Self::is_epoch_format(chain_id) {
            return 0;
        }

        chain_id
            .rsplit('-')
            .next()
            .and_then(|v| v.parse().ok())
            .unwrap_or(0)
    }

    pub fn is_epoch_format(chain_id: &str) -> bool {
        match chain_id.rsplit_once('-') {
            Some((name, version)) => {
                !name.is_empty() && !version.is_empty() && version.chars().all(|c| c.is_ascii_digit())
            }
            None => false,
        }
    }
}

pub fn chain_version(chain_id: &str) -> u64 {
    ChainId::chain_version(chain_id)
}

impl Display for ChainId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}", self.id)
    }
}

impl FromStr for ChainId {
    type Err = IdentifierError;

    fn from_str(id: &str) -> Result<Self, Self::Err> {
        validate_identifier(id, ID_MIN_LEN, ID_MAX_LEN)?;
        Ok(Self::from_string(id))
    }
}

impl From<tendermint::chain::Id> for ChainId {
    fn from(id: tendermint::chain::Id) -> Self {
        Self::from_string(id.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ClientId(String);

impl ClientId {
    pub fn new(prefix: &str, counter: u64) -> Result<Self, IdentifierError> {
        let id = format!("{prefix}-{counter}");
        validate_identifier(&id, ID_MIN_LEN, ID_MAX_LEN)?;
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn check_type(&self, prefix: &str) -> bool {
        self.0.starts_with(prefix)
    }
}

impl Display for ClientId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ClientId {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate_identifier(s, ID_MIN_LEN, ID_MAX_LEN)?;
        Ok(Self(s.to_string()))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ConnectionId(String);

impl ConnectionId {
    pub fn new(counter: u64) -> Self {
        Self(format!("connection-{counter}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ConnectionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ConnectionId {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate_identifier(s, ID_MIN_LEN, ID_MAX_LEN)?;
        Ok(Self(s.to_string()))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ChannelId(String);

impl ChannelId {
    pub fn new(counter: u64) -> Self {
        Self(format!("channel-{counter}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ChannelId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ChannelId {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate_identifier(s, ID_MIN_LEN, ID_MAX_LEN)?;
        Ok(Self(s.to_string()))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PortId(String);

impl PortId {
    pub fn transfer() -> Self {
        Self("transfer".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for PortId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PortId {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate_identifier(s, 2, 128)?;
        Ok(Self(s.to_string()))
    }
}

#[cfg(test)]
pub mod identifier_tests {
    use std::str::FromStr;

    use super::{ChainId, ChannelId, ClientId, ConnectionId, PortId};

    #[test]
    pub fn chain_version_works() {
        assert_eq!(ChainId::chain_version("ibc-2"), 2);
        assert_eq!(ChainId::chain_version("simd-testnet-10"), 10);
        assert_eq!(ChainId::chain_version("mainnet"), 0);
        assert_eq!(ChainId::chain_version("not-a-number-x"), 0);
    }

    #[test]
    pub fn client_id_new_works() {
        let client_id = ClientId::new("07-tendermint", 14).expect("client id error!");
        assert_eq!(client_id.as_str(), "07-tendermint-14");
        assert!(client_id.check_type("07-tendermint"));
    }

    #[test]
    pub fn connection_and_channel_id_works() {
        assert_eq!(ConnectionId::new(0).as_str(), "connection-0");
        assert_eq!(ChannelId::new(7).as_str(), "channel-7");
    }

    #[test]
    pub fn invalid_identifier_fails() {
        assert!(ClientId::from_str("").is_err());
        assert!(PortId::from_str("a").is_err());
        assert!(ChannelId::from_str("channel/0").is_err());
    }
}
