use std::fmt::{Display, Error as FmtError, Formatter};
use std::str::FromStr;

use ibc_proto::ibc::core::client::v1::Height as RawHeight;

use crate::error::TypesError;
use crate::ibc_core::ics02_client::height::Height;

#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum TimeoutHeight {
    Never,
    At(Height),
}

impl TimeoutHeight {
    pub fn no_timeout() -> Self {
        Self::Never
    }

    /// Revision number to be used in packet commitment computation
    pub fn commitment_revision_number(&self) -> u64 {
        match self {
            Self::At(height) => height.revision_number(),
            Self::Never => 0,
        }
    }

    /// Revision height to be used in packet commitment computation
    pub fn commitment_revision_height(&self) -> u64 {
        match self {
            Self::At(height) => height.revision_height(),
            Self::Never => 0,
        }
    }

    /// Check if a height is *strictly past* the timeout height, and thus is
    /// deemed expired.
    pub fn has_expired(&self, height: Height) -> bool {
        match self {
            Self::At(timeout_height) => height > *timeout_height,
            Self::Never => false,
        }
    }
}

impl Default for TimeoutHeight {
    fn default() -> Self {
        Self::Never
    }
}

impl TryFrom<Option<RawHeight>> for TimeoutHeight {
    type Error = TypesError;

    fn try_from(raw: Option<RawHeight>) -> Result<Self, Self::Error> {
        match raw {
            None => Ok(Self::Never),
            Some(h) if h.revision_number == 0 && h.revision_height == 0 => Ok(Self::Never),
            Some(h) => Ok(Self::At(Height::try_from(h)?)),
        }
    }
}

impl From<TimeoutHeight> for Option<RawHeight> {
    fn from(timeout: TimeoutHeight) -> Self {
        match timeout {
            TimeoutHeight::At(height) => Some(height.into()),
            TimeoutHeight::Never => None,
        }
    }
}

impl Display for TimeoutHeight {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        match self {
            Self::At(height) => write!(f, "{height}"),
            Self::Never => write!(f, "0-0"),
        }
    }
}

impl FromStr for TimeoutHeight {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "0-0" {
            return Ok(Self::Never);
        }

        Height::from_str(s).map(Self::At)
    }
}

#[cfg(test)]
pub mod timeout_tests {
    use std::str::FromStr;

    use super::TimeoutHeight;
    use crate::ibc_core::ics02_client::height::Height;

    #[test]
    pub fn timeout_expiry_works() {
        let timeout = TimeoutHeight::At(Height::new(0, 100).unwrap());

        assert!(!timeout.has_expired(Height::new(0, 100).unwrap()));
        assert!(timeout.has_expired(Height::new(0, 101).unwrap()));
        assert!(!TimeoutHeight::Never.has_expired(Height::new(0, u64::MAX - 1).unwrap()));
    }

    #[test]
    pub fn timeout_from_str_works() {
        assert_eq!(
            TimeoutHeight::from_str("0-0").unwrap(),
            TimeoutHeight::Never
        );
        assert_eq!(
            TimeoutHeight::from_str("2-3456").unwrap(),
            TimeoutHeight::At(Height::new(2, 3456).unwrap())
        );
    }
}
