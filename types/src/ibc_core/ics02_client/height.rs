use std::cmp::Ordering;
use std::fmt::{Display, Error as FmtError, Formatter};
use std::str::FromStr;

use ibc_proto::ibc::core::client::v1::Height as RawHeight;
use serde::{Deserialize, Serialize};

use crate::error::TypesError;
use crate::ibc_core::ics24_host::identifier::ChainId;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Height {
    /// Previously known as "epoch"
    revision_number: u64,

    /// The height of a block
    revision_height: u64,
}

impl Height {
    pub fn new(revision_number: u64, revision_height: u64) -> Result<Self, TypesError> {
        if revision_height == 0 {
            return Err(TypesError::invalid_height(revision_height.to_string()));
        }

        Ok(Self {
            revision_number,
            revision_height,
        })
    }

    pub fn from_tm(height: tendermint::block::Height, chain_id: &ChainId) -> Self {
        Self {
            revision_number: chain_id.version(),
            revision_height: height.value(),
        }
    }

    pub fn revision_number(&self) -> u64 {
        self.revision_number
    }

    pub fn revision_height(&self) -> u64 {
        self.revision_height
    }

    pub fn increment(&self) -> Self {
        Self {
            revision_number: self.revision_number,
            revision_height: self.revision_height + 1,
        }
    }

    pub fn decrement(&self) -> Result<Self, TypesError> {
        if self.revision_height <= 1 {
            return Err(TypesError::invalid_height_result());
        }

        Ok(Self {
            revision_number: self.revision_number,
            revision_height: self.revision_height - 1,
        })
    }
}

impl core::fmt::Debug for Height {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        f.debug_struct("Height")
            .field("revision", &self.revision_number)
            .field("height", &self.revision_height)
            .finish()
    }
}

impl Display for Height {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}-{}", self.revision_number, self.revision_height)
    }
}

impl PartialOrd for Height {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Height {
    fn cmp(&self, other: &Self) -> Ordering {
        self.revision_number
            .cmp(&other.revision_number)
            .then(self.revision_height.cmp(&other.revision_height))
    }
}

impl TryFrom<RawHeight> for Height {
    type Error = TypesError;

    fn try_from(raw: RawHeight) -> Result<Self, Self::Error> {
        Height::new(raw.revision_number, raw.revision_height)
    }
}

impl From<Height> for RawHeight {
    fn from(height: Height) -> Self {
        RawHeight {
            revision_number: height.revision_number,
            revision_height: height.revision_height,
        }
    }
}

impl From<Height> for tendermint::block::Height {
    fn from(height: Height) -> Self {
        tendermint::block::Height::try_from(height.revision_height)
            .expect("revision height out of tendermint range")
    }
}

impl FromStr for Height {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (rev, height) = s
            .split_once('-')
            .ok_or_else(|| TypesError::invalid_height(s.to_string()))?;

        let revision_number = rev
            .parse()
            .map_err(|_| TypesError::invalid_height(s.to_string()))?;
        let revision_height = height
            .parse()
            .map_err(|_| TypesError::invalid_height(s.to_string()))?;

        Height::new(revision_number, revision_height)
    }
}

#[cfg(test)]
pub mod height_tests {
    use std::str::FromStr;

    use super::Height;

    #[test]
    pub fn height_ordering_works() {
        let h1 = Height::new(0, 5).unwrap();
        let h2 = Height::new(0, 6).unwrap();
        let h3 = Height::new(1, 1).unwrap();

        assert!(h1 < h2);
        assert!(h2 < h3);
        assert_eq!(h1.increment(), Height::new(0, 6).unwrap());
        assert_eq!(h2.decrement().unwrap(), h1);
    }

    #[test]
    pub fn zero_height_fails() {
        assert!(Height::new(1, 0).is_err());
        assert!(Height::new(0, 1).unwrap().decrement().is_err());
    }

    #[test]
    pub fn height_from_str_works() {
        let h = Height::from_str("2-3456").expect("height parse error!");
        assert_eq!(h.revision_number(), 2);
        assert_eq!(h.revision_height(), 3456);

        assert!(Height::from_str("17").is_err());
        assert!(Height::from_str("1-x").is_err());
    }
}
