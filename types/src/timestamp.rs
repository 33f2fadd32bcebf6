use std::fmt::{Display, Error as FmtError, Formatter};
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A timestamp in nanoseconds since the unix epoch. Zero means "no timestamp",
/// matching the packet timeout convention on the wire.
#[derive(
    Copy, Clone, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Timestamp {
    nanoseconds: u64,
}

impl Timestamp {
    pub fn from_nanoseconds(nanoseconds: u64) -> Self {
        Self { nanoseconds }
    }

    pub fn none() -> Self {
        Self { nanoseconds: 0 }
    }

    pub fn nanoseconds(&self) -> u64 {
        self.nanoseconds
    }

    pub fn is_none(&self) -> bool {
        self.nanoseconds == 0
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}", self.nanoseconds)
    }
}

impl FromStr for Timestamp {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self {
            nanoseconds: s.parse()?,
        })
    }
}

#[cfg(test)]
pub mod timestamp_tests {
    use std::str::FromStr;

    use super::Timestamp;

    #[test]
    pub fn timestamp_parse_works() {
        let ts = Timestamp::from_str("123456789").expect("timestamp parse error!");
        assert_eq!(ts.nanoseconds(), 123456789);
        assert!(!ts.is_none());
        assert!(Timestamp::none().is_none());
    }
}
