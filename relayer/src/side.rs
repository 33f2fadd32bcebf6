use std::fmt::{Display, Error as FmtError, Formatter};
use std::str::FromStr;

/// Names one of the two chains a `Link` spans. All direction-parameterised
/// operations take the side whose chain is the packet source.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

impl Display for Side {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        match self {
            Side::A => write!(f, "A"),
            Side::B => write!(f, "B"),
        }
    }
}

impl FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" | "a" => Ok(Side::A),
            "B" | "b" => Ok(Side::B),
            other => Err(format!("not a side: {other}")),
        }
    }
}

#[cfg(test)]
pub mod side_tests {
    use super::Side;

    #[test]
    pub fn other_is_an_involution() {
        assert_eq!(Side::A.other(), Side::B);
        assert_eq!(Side::B.other(), Side::A);
        assert_eq!(Side::A.other().other(), Side::A);
    }

    #[test]
    pub fn side_from_str_works() {
        assert_eq!("A".parse::<Side>().unwrap(), Side::A);
        assert_eq!("b".parse::<Side>().unwrap(), Side::B);
        assert!("C".parse::<Side>().is_err());
    }
}
