use std::fmt::{Display, Error as FmtError, Formatter};
use std::str::FromStr;

use flex_error::define_error;
use serde::{Deserialize, Serialize};

define_error! {
    SignerError {
        EmptySigner
            |_| { "signer cannot be empty" },
    }
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Signer(String);

impl FromStr for Signer {
    type Err = SignerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(SignerError::empty_signer());
        }

        Ok(Self(s.to_string()))
    }
}

impl Display for Signer {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Signer {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
pub mod signer_tests {
    use std::str::FromStr;

    use super::Signer;

    #[test]
    pub fn signer_from_str_works() {
        let signer = Signer::from_str("cosmos1ppl6vg9q4mum7qsfvlm0mstjmpy0sfhl53u0pr");
        assert!(signer.is_ok());
    }

    #[test]
    pub fn empty_signer_fails() {
        assert!(Signer::from_str("  ").is_err());
    }
}
