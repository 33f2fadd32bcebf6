use std::fmt::{Display, Error as FmtError, Formatter};

use ibc_proto::ibc::lightclients::tendermint::v1::Fraction;
use serde::{Deserialize, Serialize};

use crate::error::TypesError;

/// The fraction of the trusted validator set whose overlap is required for a
/// header to be accepted.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrustThreshold {
    numerator: u64,
    denominator: u64,
}

impl TrustThreshold {
    pub const ONE_THIRD: Self = Self {
        numerator: 1,
        denominator: 3,
    };

    pub const TWO_THIRDS: Self = Self {
        numerator: 2,
        denominator: 3,
    };

    pub fn new(numerator: u64, denominator: u64) -> Result<Self, TypesError> {
        if denominator == 0 || numerator > denominator {
            return Err(TypesError::invalid_trust_threshold(numerator, denominator));
        }

        Ok(Self {
            numerator,
            denominator,
        })
    }

    pub fn numerator(&self) -> u64 {
        self.numerator
    }

    pub fn denominator(&self) -> u64 {
        self.denominator
    }
}

impl Default for TrustThreshold {
    fn default() -> Self {
        Self::ONE_THIRD
    }
}

impl Display for TrustThreshold {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

impl TryFrom<Fraction> for TrustThreshold {
    type Error = TypesError;

    fn try_from(raw: Fraction) -> Result<Self, Self::Error> {
        Self::new(raw.numerator, raw.denominator)
    }
}

impl From<TrustThreshold> for Fraction {
    fn from(threshold: TrustThreshold) -> Self {
        Fraction {
            numerator: threshold.numerator,
            denominator: threshold.denominator,
        }
    }
}

#[cfg(test)]
pub mod trust_level_tests {
    use super::TrustThreshold;

    #[test]
    pub fn trust_threshold_new_works() {
        assert!(TrustThreshold::new(1, 3).is_ok());
        assert!(TrustThreshold::new(2, 1).is_err());
        assert!(TrustThreshold::new(1, 0).is_err());
        assert_eq!(TrustThreshold::default(), TrustThreshold::ONE_THIRD);
    }
}
